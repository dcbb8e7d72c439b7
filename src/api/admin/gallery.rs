use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::entities::{gallery_image, mobile};
use crate::error::ApiError;
use crate::services::mobiles::ensure_image;

pub fn gallery_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/admin/gallery_image", get(list_gallery).post(create_gallery_image))
        .route("/admin/gallery_image/:id", delete(delete_gallery_image))
        .layer(Extension(db))
}

async fn list_gallery(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Vec<gallery_image::Model>>, ApiError> {
    let mut filter = Condition::all();
    if let Some(mobile_id) = query.mobile_id {
        filter = filter.add(gallery_image::Column::MobileId.eq(mobile_id));
    }

    let images = gallery_image::Entity::find()
        .filter(filter)
        .order_by_asc(gallery_image::Column::Id)
        .all(&*db)
        .await?;
    Ok(Json(images))
}

async fn create_gallery_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateGalleryImage>,
) -> Result<impl IntoResponse, ApiError> {
    if mobile::Entity::find_by_id(payload.mobile_id)
        .one(&*db)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No mobile with id {} was found.",
            payload.mobile_id
        )));
    }
    ensure_image(&*db, payload.image_id).await?;

    let created = gallery_image::ActiveModel {
        mobile_id: Set(payload.mobile_id),
        image_id: Set(payload.image_id),
        ..Default::default()
    }
    .insert(&*db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_gallery_image(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError> {
    let result = gallery_image::Entity::delete_by_id(id).exec(&*db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!(
            "No gallery image with id {id} was found."
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct GalleryQuery {
    mobile_id: Option<i32>,
}

#[derive(Deserialize)]
struct CreateGalleryImage {
    mobile_id: i32,
    image_id: i32,
}
