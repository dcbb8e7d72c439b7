use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Extension, Multipart, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::config::AppConfig;
use crate::entities::image::{self, FileExtension};
use crate::error::ApiError;
use crate::services::media::{
    delete_image as delete_unreferenced, remove_stored_file, store_image, FILE_NAME_REGEX,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn image_router(db: Arc<DatabaseConnection>, file_size_limit: usize) -> Router {
    Router::new()
        .route("/admin/image", get(list_images).post(upload))
        .route("/admin/image/:id", delete(delete_image))
        .layer(DefaultBodyLimit::max(file_size_limit + MULTIPART_OVERHEAD))
        .layer(Extension(db))
}

/// Stores the first multipart field. Its name becomes the display file name.
async fn upload(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<AppConfig>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
        .ok_or_else(|| ApiError::BadRequest("No file was sent.".to_string()))?;

    let content_type = field
        .content_type()
        .ok_or_else(|| ApiError::BadRequest("Content type is not set.".to_string()))?
        .to_owned();

    let extension = FileExtension::from_content_type(&content_type)
        .ok_or_else(|| ApiError::BadRequest("Unsupported content type.".to_string()))?;

    let file_name = field
        .name()
        .ok_or_else(|| ApiError::BadRequest("File name is not set.".to_string()))?
        .to_owned();

    if !FILE_NAME_REGEX.is_match(&file_name) {
        return Err(ApiError::BadRequest(
            "Invalid file name. It should contain only Latin letters, numbers, '-', or '_'."
                .to_string(),
        ));
    }

    let data = field.bytes().await.map_err(multipart_error)?;
    if data.len() > config.file_size_limit {
        debug!(bytes = data.len(), limit = config.file_size_limit, "Upload over limit");
        return Err(ApiError::PayloadTooLarge);
    }

    let image = store_image(&*db, &config.media_root, file_name, extension, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "File uploaded successfully.",
            "image": image,
            "url": image.url(),
        })),
    ))
}

async fn list_images(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<ImagesQuery>,
) -> Result<Json<Vec<image::Model>>, ApiError> {
    let filter = match query.query {
        Some(query) => {
            let mut condition = Condition::any().add(image::Column::FileName.contains(query.as_str()));
            if let Ok(id) = query.parse::<i32>() {
                condition = condition.add(image::Column::Id.eq(id));
            }
            condition
        }
        None => Condition::all(),
    };

    let images = image::Entity::find()
        .filter(filter)
        .order_by_asc(image::Column::Id)
        .all(&*db)
        .await?;
    Ok(Json(images))
}

async fn delete_image(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<AppConfig>>,
) -> Result<StatusCode, ApiError> {
    let txn = db.begin().await?;
    let removed = delete_unreferenced(&txn, id).await?;
    txn.commit().await?;
    remove_stored_file(&config.media_root, &removed).await;
    Ok(StatusCode::NO_CONTENT)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(format!("Multipart error: {}", err.body_text()))
    }
}

#[derive(Deserialize)]
struct ImagesQuery {
    query: Option<String>,
}
