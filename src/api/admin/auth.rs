use axum::{extract::Extension, routing::post, Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::entities::user;
use crate::error::ApiError;
use crate::middleware::auth::{generate_token, AuthState};

pub fn login_router(state: AuthState) -> Router {
    Router::new()
        .route("/admin/login", post(login))
        .layer(Extension(state))
}

async fn login(
    Extension(state): Extension<AuthState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let operator = user::Entity::find()
        .filter(user::Column::Username.eq(payload.username.as_str()))
        .one(&*state.db)
        .await?;

    let operator = match operator {
        Some(operator) => operator,
        None => {
            warn!(username = %payload.username, "Login for unknown operator");
            return Err(ApiError::Unauthorized);
        }
    };

    if let Err(err) = operator.check_hash(&payload.password) {
        warn!(username = %payload.username, error = %err, "Login rejected");
        return Err(ApiError::Unauthorized);
    }

    let token = generate_token(&state, operator.id)
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    info!(user_id = operator.id, "Operator logged in");
    Ok(Json(json!({ "token": token })))
}

#[derive(Deserialize, Validate)]
struct LoginPayload {
    #[validate(length(min = 1, max = 150))]
    username: String,
    #[validate(length(min = 1))]
    password: String,
}
