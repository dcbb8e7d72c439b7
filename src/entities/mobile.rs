use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A phone model listed in the catalog. Every spec sheet hangs off this row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "mobile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub brand_id: i32,
    #[sea_orm(unique)]
    pub model_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(unique)]
    pub slug: String,
    /// In-stock flag.
    pub inventory: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub screen_size: String,
    pub battery_capacity: String,
    pub camera_resolution: String,
    pub storage_capacity: String,
    pub ram: i32,
    pub operating_system: String,
    pub image_default_id: i32,
    pub release_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::ImageDefaultId",
        to = "super::image::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Image,
    #[sea_orm(has_many = "super::gallery_image::Entity")]
    GalleryImage,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryImage.def()
    }
}

impl Related<super::color::Entity> for Entity {
    fn to() -> RelationDef {
        super::mobile_color::Relation::Color.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::mobile_color::Relation::Mobile.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
