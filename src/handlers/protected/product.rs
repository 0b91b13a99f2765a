use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::app::AppState;
use crate::handlers::extract::ValidJson;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(rename = "pvzId", alias = "PvzId")]
    pub pvz_id: Uuid,
}

/// POST /product (client)
pub async fn add_product(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AddProductRequest>,
) -> ApiResult<Value> {
    let product = state.services.products.add(&body.product_type, body.pvz_id).await?;
    Ok(ApiResponse::message(StatusCode::CREATED, format!("product {} added", product.id)))
}
