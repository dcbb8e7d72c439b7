use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures raised by the catalog services, independent of HTTP.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Validation(String),

    #[error("No {entity} with id {id} was found.")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0}")]
    Protected(String),

    #[error("Media storage error: {0}")]
    Storage(String),
}

/// Errors that abort startup.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("ADMIN_PASSWORD must be set to create the first operator")]
    MissingAdminPassword,

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Handler error. Renders as `{ "error": message }` with a matching status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Failed to validate: {0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Attached to error responses so the request logger can report the cause.
#[derive(Clone, Debug)]
pub struct LoggedError(pub String);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ApiError::Conflict(format!("Resource already exists: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ApiError::Conflict(format!("Resource is referenced elsewhere: {detail}"))
            }
            _ => ApiError::Database(err),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Database(err) => err.into(),
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            err @ CatalogError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CatalogError::Protected(msg) => ApiError::Conflict(msg),
            CatalogError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        response
            .extensions_mut()
            .insert(LoggedError(self.to_string()));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_map_to_statuses() {
        let not_found: ApiError = CatalogError::NotFound {
            entity: "mobile",
            id: 7,
        }
        .into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "No mobile with id 7 was found.");

        let protected: ApiError = CatalogError::Protected("blocked".into()).into();
        assert_eq!(protected.status(), StatusCode::CONFLICT);

        let invalid: ApiError = CatalogError::Validation("bad slug".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let response = ApiError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let logged = response.extensions().get::<LoggedError>().cloned();
        assert_eq!(
            logged.map(|l| l.0),
            Some("Internal server error: disk on fire".to_string())
        );
    }
}
