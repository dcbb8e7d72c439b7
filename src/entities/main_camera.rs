use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

/// Rear camera sheet. Its phone cannot be deleted while this row exists.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "main_camera")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub camera: String,
    pub features: String,
    pub video: String,
    pub other: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mobile::Entity",
        from = "Column::MobileId",
        to = "super::mobile::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Mobile,
}

impl Related<super::mobile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mobile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Form shared by both camera sheets.
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CameraForm {
    #[validate(length(min = 1, max = 550))]
    pub camera: String,
    #[validate(length(min = 1, max = 500))]
    pub features: String,
    #[validate(length(min = 1, max = 500))]
    pub video: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = CameraForm;
    const KIND: &'static str = "main_camera";
    const LABEL: &'static str = "main camera";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: CameraForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            camera: Set(form.camera),
            features: Set(form.features),
            video: Set(form.video),
            other: Set(form.other),
        }
    }
}
