use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::app::AppState;
use crate::handlers::extract::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pub pvz_id: Uuid,
}

/// POST /receptions (client)
pub async fn create_reception(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateReceptionRequest>,
) -> ApiResult<Value> {
    let reception = state.services.receptions.create(body.pvz_id).await?;
    Ok(ApiResponse::message(StatusCode::CREATED, format!("reception {} created", reception.id)))
}
