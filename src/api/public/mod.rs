pub mod catalog;
pub mod media;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use catalog::catalog_router;
use media::media_router;

pub fn public_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(catalog_router(db.clone()))
        .merge(media_router(db))
}
