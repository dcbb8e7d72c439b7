pub mod admin;
pub mod public;

use axum::{extract::Extension, middleware::from_fn, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use admin::admin_api_router;
use public::public_api_router;

use crate::config::AppConfig;
use crate::middleware::logging::logging_middleware;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>, config: Arc<AppConfig>) -> Router {
    Router::new()
        .merge(public_api_router(shared_db.clone()))
        .merge(admin_api_router(shared_db, &config))
        .layer(Extension(config))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
