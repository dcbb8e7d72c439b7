use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::entities::slider_image;
use crate::error::ApiError;
use crate::services::mobiles::ensure_image;

pub fn slider_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/admin/slider_image", get(list_slides).post(create_slide))
        .route(
            "/admin/slider_image/:id",
            get(get_slide).patch(patch_slide).delete(delete_slide),
        )
        .layer(Extension(db))
}

async fn list_slides(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<slider_image::Model>>, ApiError> {
    let slides = slider_image::Entity::find()
        .order_by_asc(slider_image::Column::Id)
        .all(&*db)
        .await?;
    Ok(Json(slides))
}

async fn create_slide(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateSlide>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    ensure_image(&*db, payload.image_id).await?;

    let created = slider_image::ActiveModel {
        title: Set(payload.title),
        description: Set(payload.description),
        image_id: Set(payload.image_id),
        is_active: Set(payload.is_active),
        ..Default::default()
    }
    .insert(&*db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_slide(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<slider_image::Model>, ApiError> {
    Ok(Json(find_slide(&db, id).await?))
}

async fn patch_slide(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchSlide>,
) -> Result<Json<slider_image::Model>, ApiError> {
    payload.validate()?;
    if let Some(image_id) = payload.image_id {
        ensure_image(&*db, image_id).await?;
    }

    let mut active: slider_image::ActiveModel = find_slide(&db, id).await?.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image_id) = payload.image_id {
        active.image_id = Set(image_id);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    Ok(Json(active.update(&*db).await?))
}

async fn delete_slide(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError> {
    let result = slider_image::Entity::delete_by_id(id).exec(&*db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!(
            "No slider image with id {id} was found."
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_slide(db: &DatabaseConnection, id: i32) -> Result<slider_image::Model, ApiError> {
    slider_image::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No slider image with id {id} was found.")))
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize, Validate)]
struct CreateSlide {
    #[validate(length(min = 1, max = 100))]
    title: String,
    #[serde(default)]
    description: String,
    image_id: i32,
    #[serde(default = "default_active")]
    is_active: bool,
}

#[derive(Deserialize, Validate)]
struct PatchSlide {
    #[validate(length(min = 1, max = 100))]
    title: Option<String>,
    description: Option<String>,
    image_id: Option<i32>,
    is_active: Option<bool>,
}
