use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "display")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub type_display: String,
    pub resolution: String,
    pub screen_size: String,
    pub anti_shock: bool,
    pub refresh_rate: String,
    pub screen_always_on: bool,
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
pub struct DisplayForm {
    #[validate(length(min = 1, max = 500))]
    pub type_display: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub resolution: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub screen_size: String,
    #[serde(default)]
    pub anti_shock: bool,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub refresh_rate: String,
    #[serde(default)]
    pub screen_always_on: bool,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = DisplayForm;
    const KIND: &'static str = "display";
    const LABEL: &'static str = "display";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: DisplayForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            type_display: Set(form.type_display),
            resolution: Set(form.resolution),
            screen_size: Set(form.screen_size),
            anti_shock: Set(form.anti_shock),
            refresh_rate: Set(form.refresh_rate),
            screen_always_on: Set(form.screen_always_on),
            other: Set(form.other),
        }
    }
}
