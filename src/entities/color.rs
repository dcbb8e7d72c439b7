use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::Serialize;

use crate::services::colors::{hex_code_for, normalize_hex};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "color")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub model_name: String,
    pub color: String,
    pub image_id: i32,
    pub hex_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::ImageId",
        to = "super::image::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Image,
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<super::mobile::Entity> for Entity {
    fn to() -> RelationDef {
        super::mobile_color::Relation::Mobile.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::mobile_color::Relation::Color.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Fills in `hex_code` from the color name when none was supplied.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let explicit = match &self.hex_code {
            ActiveValue::Set(hex) | ActiveValue::Unchanged(hex) if !hex.trim().is_empty() => {
                Some(normalize_hex(hex))
            }
            _ => None,
        };

        let hex_code = match explicit {
            Some(hex) => hex,
            None => match &self.color {
                ActiveValue::Set(name) | ActiveValue::Unchanged(name) => hex_code_for(name),
                ActiveValue::NotSet => hex_code_for(""),
            },
        };

        self.hex_code = ActiveValue::Set(hex_code);
        Ok(self)
    }
}
