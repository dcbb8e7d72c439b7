use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "battery")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub battery_type: String,
    pub charging: String,
    pub replaceable: bool,
    pub wireless_charge: bool,
    pub fast_charge: bool,
    pub charge_time: String,
    pub otg_support: bool,
    pub max_wattage: String,
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
pub struct BatteryForm {
    #[validate(length(min = 1, max = 500))]
    pub battery_type: String,
    #[validate(length(min = 1, max = 500))]
    pub charging: String,
    #[serde(default)]
    pub replaceable: bool,
    #[serde(default)]
    pub wireless_charge: bool,
    #[serde(default)]
    pub fast_charge: bool,
    #[validate(length(min = 1, max = 500))]
    pub charge_time: String,
    #[serde(default)]
    pub otg_support: bool,
    #[validate(length(min = 1, max = 225))]
    pub max_wattage: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = BatteryForm;
    const KIND: &'static str = "battery";
    const LABEL: &'static str = "battery";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: BatteryForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            battery_type: Set(form.battery_type),
            charging: Set(form.charging),
            replaceable: Set(form.replaceable),
            wireless_charge: Set(form.wireless_charge),
            fast_charge: Set(form.fast_charge),
            charge_time: Set(form.charge_time),
            otg_support: Set(form.otg_support),
            max_wattage: Set(form.max_wattage),
            other: Set(form.other),
        }
    }
}
