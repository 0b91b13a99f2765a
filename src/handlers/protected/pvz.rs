use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::app::AppState;
use crate::handlers::extract::{ValidJson, ValidPath, ValidQuery};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{PickupPoint, Product, Reception};
use crate::services::{ListQuery, PvzPage};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePvzRequest {
    pub city: String,
    #[serde(default)]
    pub registration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPvzParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// POST /pvz (moderator)
pub async fn create_pvz(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreatePvzRequest>,
) -> ApiResult<PickupPoint> {
    let pvz = state.services.pvz.create(&body.city, body.registration_date).await?;
    Ok(ApiResponse::created(pvz))
}

/// GET /pvz/:id
pub async fn get_pvz(State(state): State<AppState>, ValidPath(id): ValidPath<Uuid>) -> ApiResult<PickupPoint> {
    Ok(ApiResponse::success(state.services.pvz.get_by_id(id).await?))
}

/// GET /pvz?page=&limit=&startDate=&endDate=
pub async fn list_pvz(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListPvzParams>,
) -> ApiResult<PvzPage> {
    let query = ListQuery {
        page: params.page,
        limit: params.limit,
        start_date: params.start_date,
        end_date: params.end_date,
    };
    Ok(ApiResponse::success(state.services.pvz.list(query).await?))
}

/// POST /pvz/:id/delete_last_product (client)
pub async fn delete_last_product(State(state): State<AppState>, ValidPath(id): ValidPath<Uuid>) -> ApiResult<Value> {
    let removed: Product = state.services.products.remove_last(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, format!("product {} deleted", removed.id)))
}

/// POST /pvz/:id/close_last_reception (client)
pub async fn close_last_reception(State(state): State<AppState>, ValidPath(id): ValidPath<Uuid>) -> ApiResult<Reception> {
    Ok(ApiResponse::success(state.services.receptions.close(id).await?))
}
