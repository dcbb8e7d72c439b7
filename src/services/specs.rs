use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::entities::{
    battery, body, display, function, main_camera, memory, network, other_features,
    selfie_camera, sound,
};

/// A 1:1 specification table keyed by the id of the phone it describes.
pub trait SpecSheet: EntityTrait {
    /// Admin form accepted when creating or replacing the sheet.
    type Form: DeserializeOwned + Validate + Send + 'static;

    /// Path segment under `/admin`.
    const KIND: &'static str;
    const LABEL: &'static str;

    fn mobile_id_column() -> Self::Column;
    fn from_form(mobile_id: i32, form: Self::Form) -> Self::ActiveModel;
}

pub async fn sheet_exists<S, C>(db: &C, mobile_id: i32) -> Result<bool, DbErr>
where
    S: SpecSheet,
    S::Model: Sync,
    C: ConnectionTrait,
{
    let count = S::find()
        .filter(S::mobile_id_column().eq(mobile_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn find_sheet<S, C>(db: &C, mobile_id: i32) -> Result<Option<S::Model>, DbErr>
where
    S: SpecSheet,
    C: ConnectionTrait,
{
    S::find()
        .filter(S::mobile_id_column().eq(mobile_id))
        .one(db)
        .await
}

pub async fn delete_sheet<S, C>(db: &C, mobile_id: i32) -> Result<u64, DbErr>
where
    S: SpecSheet,
    C: ConnectionTrait,
{
    let result = S::delete_many()
        .filter(S::mobile_id_column().eq(mobile_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Every sheet a phone may carry; absent sheets are `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpecSheets {
    pub network: Option<network::Model>,
    pub memory: Option<memory::Model>,
    pub body: Option<body::Model>,
    pub display: Option<display::Model>,
    pub function: Option<function::Model>,
    pub main_camera: Option<main_camera::Model>,
    pub selfie_camera: Option<selfie_camera::Model>,
    pub sound: Option<sound::Model>,
    pub battery: Option<battery::Model>,
    pub other_features: Option<other_features::Model>,
}

impl SpecSheets {
    pub async fn load<C: ConnectionTrait>(db: &C, mobile_id: i32) -> Result<Self, DbErr> {
        Ok(Self {
            network: find_sheet::<network::Entity, _>(db, mobile_id).await?,
            memory: find_sheet::<memory::Entity, _>(db, mobile_id).await?,
            body: find_sheet::<body::Entity, _>(db, mobile_id).await?,
            display: find_sheet::<display::Entity, _>(db, mobile_id).await?,
            function: find_sheet::<function::Entity, _>(db, mobile_id).await?,
            main_camera: find_sheet::<main_camera::Entity, _>(db, mobile_id).await?,
            selfie_camera: find_sheet::<selfie_camera::Entity, _>(db, mobile_id).await?,
            sound: find_sheet::<sound::Entity, _>(db, mobile_id).await?,
            battery: find_sheet::<battery::Entity, _>(db, mobile_id).await?,
            other_features: find_sheet::<other_features::Entity, _>(db, mobile_id).await?,
        })
    }
}
