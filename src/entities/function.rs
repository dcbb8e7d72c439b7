use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

/// Platform sheet: OS and silicon.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "function")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub os: String,
    pub cpu: String,
    pub gpu: String,
    pub chipset: String,
    pub other: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mobile::Entity",
        from = "Column::MobileId",
        to = "super::mobile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Mobile,
}

impl Related<super::mobile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mobile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct FunctionForm {
    #[validate(length(min = 1, max = 500))]
    pub os: String,
    #[validate(length(min = 1, max = 500))]
    pub cpu: String,
    #[validate(length(min = 1, max = 500))]
    pub gpu: String,
    #[validate(length(min = 1, max = 500))]
    pub chipset: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = FunctionForm;
    const KIND: &'static str = "function";
    const LABEL: &'static str = "function";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: FunctionForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            os: Set(form.os),
            cpu: Set(form.cpu),
            gpu: Set(form.gpu),
            chipset: Set(form.chipset),
            other: Set(form.other),
        }
    }
}
