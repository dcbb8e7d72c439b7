use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "body")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub dimensions: String,
    pub weight: String,
    pub build: String,
    pub sim: String,
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
pub struct BodyForm {
    #[validate(length(min = 1, max = 500))]
    pub dimensions: String,
    #[validate(length(min = 1, max = 500))]
    pub weight: String,
    #[validate(length(min = 1, max = 500))]
    pub build: String,
    #[validate(length(min = 1, max = 500))]
    pub sim: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = BodyForm;
    const KIND: &'static str = "body";
    const LABEL: &'static str = "body";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: BodyForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            dimensions: Set(form.dimensions),
            weight: Set(form.weight),
            build: Set(form.build),
            sim: Set(form.sim),
            other: Set(form.other),
        }
    }
}
