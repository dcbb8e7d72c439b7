pub mod auth;
pub mod brand;
pub mod color;
pub mod gallery;
pub mod image;
pub mod mobile;
pub mod slider;
pub mod specs;

use axum::{extract::Extension, middleware::from_fn_with_state, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

use auth::login_router;
use brand::brand_router;
use color::color_router;
use gallery::gallery_router;
use image::image_router;
use mobile::mobile_router;
use slider::slider_router;
use specs::specs_router;

use crate::config::AppConfig;
use crate::middleware::auth::{auth_middleware, AuthState};

/// Models listed on the admin index, in registration order.
pub const REGISTERED_MODELS: [&str; 16] = [
    "brand",
    "color",
    "mobile",
    "gallery_image",
    "slider_image",
    "image",
    "network",
    "memory",
    "body",
    "display",
    "function",
    "main_camera",
    "selfie_camera",
    "sound",
    "battery",
    "other_features",
];

pub fn admin_api_router(db: Arc<DatabaseConnection>, config: &AppConfig) -> Router {
    let state = AuthState {
        db: db.clone(),
        secret: Arc::from(config.secret.as_str()),
        token_ttl_hours: config.token_ttl_hours,
    };

    let protected = Router::new()
        .route("/admin", get(admin_index))
        .merge(brand_router(db.clone()))
        .merge(mobile_router(db.clone()))
        .merge(color_router(db.clone()))
        .merge(gallery_router(db.clone()))
        .merge(slider_router(db.clone()))
        .merge(image_router(db.clone(), config.file_size_limit))
        .merge(specs_router(db))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(login_router(state)).merge(protected)
}

async fn admin_index(Extension(config): Extension<Arc<AppConfig>>) -> Json<Value> {
    let models: Vec<Value> = REGISTERED_MODELS
        .iter()
        .map(|name| json!({ "name": name, "url": format!("/admin/{name}") }))
        .collect();

    Json(json!({
        "site_header": config.site_header,
        "index_title": config.index_title,
        "models": models,
    }))
}
