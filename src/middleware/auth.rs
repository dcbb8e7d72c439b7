use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::entities::user::Entity as UserEntity;
use crate::error::ApiError;

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = match validate_token(&state, token).await {
        Ok(claims) => claims,
        Err(AuthError::Database(err)) => return Err(ApiError::Database(err)),
        Err(err) => {
            debug!(error = %err, "Rejected operator token");
            return Err(ApiError::Unauthorized);
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub exp: usize,
}

#[derive(Clone, Debug)]
pub struct AuthState {
    pub db: Arc<DatabaseConnection>,
    pub secret: Arc<str>,
    pub token_ttl_hours: i64,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unknown operator")]
    UnknownUser,
    #[error("Token expired or malformed")]
    InvalidToken,
    #[error("Failed to generate token")]
    GenerationFail,
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub fn generate_token(state: &AuthState, user_id: i32) -> Result<String, AuthError> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(state.token_ttl_hours))
        .ok_or(AuthError::GenerationFail)?
        .timestamp() as usize;

    let claims = Claims { user_id, exp };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.secret.as_bytes()),
    )
    .map_err(|_| AuthError::GenerationFail)
}

/// Decodes the token and checks that its operator still exists.
pub async fn validate_token(state: &AuthState, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthError::InvalidToken)?
    .claims;

    match UserEntity::find_by_id(claims.user_id).one(&*state.db).await? {
        Some(_) => Ok(claims),
        None => Err(AuthError::UnknownUser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_token_decodes_with_same_secret() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let state = AuthState {
            db: Arc::new(db),
            secret: Arc::from("test-secret"),
            token_ttl_hours: 1,
        };

        let token = generate_token(&state, 42).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.user_id, 42);

        let wrong = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(wrong.is_err());
    }
}
