use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::entities::{color, mobile_color};
use crate::error::ApiError;
use crate::services::colors::HEX_CODE_REGEX;
use crate::services::mobiles::ensure_image;

pub fn color_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/admin/color", get(list_colors).post(create_color))
        .route(
            "/admin/color/:id",
            get(get_color).patch(patch_color).delete(delete_color),
        )
        .layer(Extension(db))
}

async fn list_colors(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<color::Model>>, ApiError> {
    let colors = color::Entity::find()
        .order_by_asc(color::Column::Id)
        .all(&*db)
        .await?;
    Ok(Json(colors))
}

async fn create_color(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateColor>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    ensure_image(&*db, payload.image_id).await?;

    // An unset hex code is derived from the color name on save.
    let created = color::ActiveModel {
        model_name: Set(payload.model_name),
        color: Set(payload.color),
        image_id: Set(payload.image_id),
        hex_code: Set(payload.hex_code.unwrap_or_default()),
        ..Default::default()
    }
    .insert(&*db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_color(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<color::Model>, ApiError> {
    Ok(Json(find_color(&db, id).await?))
}

async fn patch_color(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchColor>,
) -> Result<Json<color::Model>, ApiError> {
    payload.validate()?;
    if let Some(image_id) = payload.image_id {
        ensure_image(&*db, image_id).await?;
    }

    let mut active: color::ActiveModel = find_color(&db, id).await?.into();
    if let Some(model_name) = payload.model_name {
        active.model_name = Set(model_name);
    }
    if let Some(image_id) = payload.image_id {
        active.image_id = Set(image_id);
    }
    if let Some(name) = payload.color {
        active.color = Set(name);
        // renamed without an explicit hex: derive it again
        if payload.hex_code.is_none() {
            active.hex_code = Set(String::new());
        }
    }
    if let Some(hex_code) = payload.hex_code {
        active.hex_code = Set(hex_code);
    }

    Ok(Json(active.update(&*db).await?))
}

async fn delete_color(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError> {
    let txn = db.begin().await?;
    let color = color::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No color with id {id} was found.")))?;

    mobile_color::Entity::delete_many()
        .filter(mobile_color::Column::ColorId.eq(color.id))
        .exec(&txn)
        .await?;
    color::Entity::delete_by_id(color.id).exec(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_color(db: &DatabaseConnection, id: i32) -> Result<color::Model, ApiError> {
    color::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No color with id {id} was found.")))
}

#[derive(Deserialize, Validate)]
struct CreateColor {
    #[validate(length(min = 1, max = 255))]
    model_name: String,
    #[validate(length(min = 1, max = 100))]
    color: String,
    image_id: i32,
    #[validate(regex(path = *HEX_CODE_REGEX))]
    hex_code: Option<String>,
}

#[derive(Deserialize, Validate)]
struct PatchColor {
    #[validate(length(min = 1, max = 255))]
    model_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    color: Option<String>,
    image_id: Option<i32>,
    #[validate(regex(path = *HEX_CODE_REGEX))]
    hex_code: Option<String>,
}
