pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod services;
pub mod views;

use axum::Router;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::api::create_api_router;
use crate::config::{AppConfig, ConfigError};
use crate::entities::{primary_setup, setup_schema};
use crate::error::SetupError;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connects, creates missing tables, seeds the operator and prepares the media directory.
pub async fn prepare(config: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = Database::connect(&config.database_url).await?;
    setup_schema(&db).await?;
    primary_setup(&db, config).await?;
    tokio::fs::create_dir_all(&config.media_root).await?;

    info!(media_root = %config.media_root.display(), "Store ready");
    Ok(db)
}

pub fn create_app(db: DatabaseConnection, config: AppConfig) -> Router {
    create_api_router(Arc::new(db), Arc::new(config))
}
