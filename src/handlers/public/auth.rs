use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::handlers::extract::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Role;

#[derive(Debug, Deserialize)]
pub struct DummyLoginRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// POST /dummyLogin - token for any role, no credentials. Mounted only when enabled.
pub async fn dummy_login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<DummyLoginRequest>,
) -> ApiResult<serde_json::Value> {
    let token = state.services.users.dummy_login(&body.role)?;
    Ok(ApiResponse::success(json!({ "token": token })))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> ApiResult<RegisteredUser> {
    let user = state.services.users.register(&body.email, &body.password, &body.role).await?;
    Ok(ApiResponse::created(RegisteredUser { id: user.id, email: user.email, role: user.role }))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> ApiResult<serde_json::Value> {
    let token = state.services.users.login(&body.email, &body.password).await?;
    Ok(ApiResponse::success(json!({ "token": token })))
}
