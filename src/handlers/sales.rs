use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{AlignedSeries, ApiResponse, DeptId, StoreId};
use tracing::{error, info, instrument};

use crate::schemas::{AppState, ErrorResponse, forecast_error_response};

/// Get the actual vs predicted chart series for a store and department
#[utoipa::path(
    get,
    path = "/api/v1/sales/{store}/{dept}/chart",
    tag = "sales",
    params(
        ("store" = u32, Path, description = "Store ID"),
        ("dept" = u32, Path, description = "Department ID"),
    ),
    responses(
        (status = 200, description = "Chart series retrieved successfully", body = ApiResponse<AlignedSeries>),
        (status = 502, description = "Forecast provider unavailable or returned a malformed series", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_sales_chart(
    Path((store, dept)): Path<(StoreId, DeptId)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AlignedSeries>>, (StatusCode, Json<ErrorResponse>)> {
    match state.dashboard.align_for_chart(store, dept).await {
        Ok(series) => {
            info!(
                "Chart series for store {} dept {} has {} weeks",
                store,
                dept,
                series.len()
            );
            Ok(Json(ApiResponse::ok(series, "Chart series retrieved successfully")))
        }
        Err(e) => {
            error!("Failed to build chart series for store {} dept {}: {}", store, dept, e);
            Err(forecast_error_response(&e))
        }
    }
}
