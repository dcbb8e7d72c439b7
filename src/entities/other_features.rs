use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::specs::SpecSheet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "other_features")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mobile_id: i32,
    pub nfc: bool,
    pub simcard: String,
    pub backup_5g: bool,
    pub multiple_user: bool,
    pub usb_version: i32,
    pub gps: bool,
    pub wifi: String,
    pub sensors: String,
    pub voice_command: bool,
    pub hotspot: bool,
    pub language_support: i32,
    pub bluetooth_version: String,
    pub support_persian: bool,
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
pub struct OtherFeaturesForm {
    #[serde(default)]
    pub nfc: bool,
    #[validate(length(min = 1, max = 500))]
    pub simcard: String,
    #[serde(default)]
    pub backup_5g: bool,
    #[serde(default)]
    pub multiple_user: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub usb_version: i32,
    #[serde(default)]
    pub gps: bool,
    #[validate(length(min = 1, max = 500))]
    pub wifi: String,
    #[validate(length(min = 1, max = 500))]
    pub sensors: String,
    #[serde(default)]
    pub voice_command: bool,
    #[serde(default)]
    pub hotspot: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub language_support: i32,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub bluetooth_version: String,
    #[serde(default)]
    pub support_persian: bool,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub other: String,
}

impl SpecSheet for Entity {
    type Form = OtherFeaturesForm;
    const KIND: &'static str = "other_features";
    const LABEL: &'static str = "other features";

    fn mobile_id_column() -> Column {
        Column::MobileId
    }

    fn from_form(mobile_id: i32, form: OtherFeaturesForm) -> ActiveModel {
        ActiveModel {
            mobile_id: Set(mobile_id),
            nfc: Set(form.nfc),
            simcard: Set(form.simcard),
            backup_5g: Set(form.backup_5g),
            multiple_user: Set(form.multiple_user),
            usb_version: Set(form.usb_version),
            gps: Set(form.gps),
            wifi: Set(form.wifi),
            sensors: Set(form.sensors),
            voice_command: Set(form.voice_command),
            hotspot: Set(form.hotspot),
            language_support: Set(form.language_support),
            bluetooth_version: Set(form.bluetooth_version),
            support_persian: Set(form.support_persian),
            other: Set(form.other),
        }
    }
}
