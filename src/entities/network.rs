use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "network")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub technology: String,
    pub bands_2g: String,
    pub bands_3g: String,
    pub bands_4g: String,
    pub bands_5g: String,
    pub speed: String,
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
pub struct NetworkForm {
    #[validate(length(min = 1, max = 255))]
    pub technology: String,
    #[validate(length(min = 1, max = 255))]
    pub bands_2g: String,
    #[validate(length(min = 1, max = 255))]
    pub bands_3g: String,
    #[validate(length(min = 1, max = 255))]
    pub bands_4g: String,
    #[validate(length(min = 1, max = 255))]
    pub bands_5g: String,
    #[validate(length(min = 1, max = 255))]
    pub speed: String,
}

impl SpecSheet for Entity {
    type Form = NetworkForm;
    const KIND: &'static str = "network";
    const LABEL: &'static str = "network";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: NetworkForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            technology: Set(form.technology),
            bands_2g: Set(form.bands_2g),
            bands_3g: Set(form.bands_3g),
            bands_4g: Set(form.bands_4g),
            bands_5g: Set(form.bands_5g),
            speed: Set(form.speed),
        }
    }
}
