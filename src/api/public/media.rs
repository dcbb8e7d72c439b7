use axum::{
    body::Body,
    extract::{Extension, Path},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::config::AppConfig;
use crate::entities::image::Entity as ImageEntity;
use crate::error::ApiError;
use crate::services::media::stored_path;

pub fn media_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/media/:id", get(serve_image))
        .layer(Extension(db))
}

async fn serve_image(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<AppConfig>>,
) -> Result<impl IntoResponse, ApiError> {
    let image = ImageEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No image with id {id} was found.")))?;

    let path = stored_path(&config.media_root, &image);
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|err| ApiError::NotFound(format!("Image file is missing: {err}")))?;

    let content_type = mime_guess::from_path(&path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("inline"),
    );

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((headers, body))
}
