use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, DeptId, StoreId};
use tracing::{debug, error, instrument};

use crate::schemas::{AppState, ErrorResponse, forecast_error_response};

/// List the stores offered by the store selector
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "catalog",
    responses(
        (status = 200, description = "Stores retrieved successfully", body = ApiResponse<Vec<u32>>),
        (status = 502, description = "Forecast provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StoreId>>>, (StatusCode, Json<ErrorResponse>)> {
    match state.dashboard.stores().await {
        Ok(stores) => {
            debug!("Retrieved {} stores", stores.len());
            Ok(Json(ApiResponse::ok(stores, "Stores retrieved successfully")))
        }
        Err(e) => {
            error!("Failed to retrieve stores: {}", e);
            Err(forecast_error_response(&e))
        }
    }
}

/// List the departments offered by the department selector
#[utoipa::path(
    get,
    path = "/api/v1/depts",
    tag = "catalog",
    responses(
        (status = 200, description = "Departments retrieved successfully", body = ApiResponse<Vec<u32>>),
        (status = 502, description = "Forecast provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_depts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DeptId>>>, (StatusCode, Json<ErrorResponse>)> {
    match state.dashboard.depts().await {
        Ok(depts) => {
            debug!("Retrieved {} departments", depts.len());
            Ok(Json(ApiResponse::ok(depts, "Departments retrieved successfully")))
        }
        Err(e) => {
            error!("Failed to retrieve departments: {}", e);
            Err(forecast_error_response(&e))
        }
    }
}
