use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /health - liveness plus a database ping when a pool is attached
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return Ok(ApiResponse::success(json!({ "status": "ok", "timestamp": now })));
    };

    database.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "database health check failed");
        ApiError::service_unavailable("database unavailable")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": now,
        "database": "ok"
    })))
}
