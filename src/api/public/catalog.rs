use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::services::catalog::{catalog_listing, product_detail};
use crate::views::{render_detail, render_listing, render_not_found};

pub fn catalog_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/", get(mobile_list))
        .route("/mobile/:slug", get(mobile_detail))
        .layer(Extension(db))
}

async fn mobile_list(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Html<String>, ApiError> {
    let listing = catalog_listing(&*db).await?;
    Ok(Html(render_listing(&listing)))
}

async fn mobile_detail(
    Path(slug): Path<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    match product_detail(&*db, &slug).await? {
        Some(detail) => Ok(Html(render_detail(&detail)).into_response()),
        None => {
            debug!(slug = %slug, "No mobile for slug");
            Ok((StatusCode::NOT_FOUND, Html(render_not_found(&slug))).into_response())
        }
    }
}
