//! One set of admin routes per spec sheet kind, all driven by [`SpecSheet`].

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::entities::{
    battery, body, display, function, main_camera, memory, mobile, network, other_features,
    selfie_camera, sound,
};
use crate::error::ApiError;
use crate::services::specs::{delete_sheet, find_sheet, SpecSheet};

pub fn specs_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(sheet_router::<network::Entity>())
        .merge(sheet_router::<memory::Entity>())
        .merge(sheet_router::<body::Entity>())
        .merge(sheet_router::<display::Entity>())
        .merge(sheet_router::<function::Entity>())
        .merge(sheet_router::<main_camera::Entity>())
        .merge(sheet_router::<selfie_camera::Entity>())
        .merge(sheet_router::<sound::Entity>())
        .merge(sheet_router::<battery::Entity>())
        .merge(sheet_router::<other_features::Entity>())
        .layer(Extension(db))
}

fn sheet_router<S>() -> Router
where
    S: SpecSheet + Send + Sync,
    S::Model: Serialize + Sync + IntoActiveModel<S::ActiveModel>,
    S::ActiveModel: ActiveModelTrait<Entity = S> + ActiveModelBehavior + Send + Sync,
{
    Router::new()
        .route(&format!("/admin/{}", S::KIND), get(list_sheets::<S>))
        .route(
            &format!("/admin/{}/:mobile_id", S::KIND),
            get(get_sheet::<S>)
                .put(put_sheet::<S>)
                .delete(remove_sheet::<S>),
        )
}

async fn list_sheets<S>(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<S::Model>>, ApiError>
where
    S: SpecSheet + Send + Sync,
    S::Model: Serialize + Sync,
{
    let sheets = S::find()
        .order_by_asc(S::mobile_id_column())
        .all(&*db)
        .await?;
    Ok(Json(sheets))
}

async fn get_sheet<S>(
    Path(mobile_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<S::Model>, ApiError>
where
    S: SpecSheet + Send + Sync,
    S::Model: Serialize + Sync,
{
    find_sheet::<S, _>(&*db, mobile_id)
        .await?
        .map(Json)
        .ok_or_else(|| missing_sheet::<S>(mobile_id))
}

/// Creates the sheet, or replaces every field of an existing one.
async fn put_sheet<S>(
    Path(mobile_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<S::Form>,
) -> Result<(StatusCode, Json<S::Model>), ApiError>
where
    S: SpecSheet + Send + Sync,
    S::Model: Serialize + Sync + IntoActiveModel<S::ActiveModel>,
    S::ActiveModel: ActiveModelTrait<Entity = S> + ActiveModelBehavior + Send + Sync,
{
    payload.validate()?;

    let txn = db.begin().await?;
    if mobile::Entity::find_by_id(mobile_id).one(&txn).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "No mobile with id {mobile_id} was found."
        )));
    }

    let exists = find_sheet::<S, _>(&txn, mobile_id).await?.is_some();
    let active = S::from_form(mobile_id, payload);
    let (status, saved) = if exists {
        (StatusCode::OK, active.update(&txn).await?)
    } else {
        (StatusCode::CREATED, active.insert(&txn).await?)
    };
    txn.commit().await?;

    info!(kind = S::KIND, mobile_id, replaced = exists, "Saved spec sheet");
    Ok((status, Json(saved)))
}

async fn remove_sheet<S>(
    Path(mobile_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError>
where
    S: SpecSheet + Send + Sync,
{
    match delete_sheet::<S, _>(&*db, mobile_id).await? {
        0 => Err(missing_sheet::<S>(mobile_id)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

fn missing_sheet<S: SpecSheet>(mobile_id: i32) -> ApiError {
    ApiError::NotFound(format!(
        "No {} sheet for mobile {mobile_id} was found.",
        S::LABEL
    ))
}
