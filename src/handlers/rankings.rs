use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{ApiResponse, Rankings};
use compute::aggregate::SamplingLimits;
use tracing::{debug, error, info, instrument, trace};

use crate::schemas::{AppState, ErrorResponse, RankingsQuery, forecast_error_response};

/// Rank the best and worst predicted (store, department) pairs
///
/// Evaluates the leading `max_stores` x `max_depts` pairs. Pairs whose
/// series cannot be fetched are left out; the request fails only when the
/// store or department lists are unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/rankings",
    tag = "rankings",
    params(RankingsQuery),
    responses(
        (status = 200, description = "Rankings computed successfully", body = ApiResponse<Rankings>),
        (status = 400, description = "Invalid sampling parameters"),
        (status = 502, description = "Store or department discovery failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_rankings(
    Valid(Query(query)): Valid<Query<RankingsQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Rankings>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_rankings function");

    let defaults = state.dashboard.default_limits();
    let limits = SamplingLimits::new(
        query.max_stores.unwrap_or(defaults.max_stores),
        query.max_depts.unwrap_or(defaults.max_depts),
    );
    debug!(
        "Sampling {} stores x {} departments",
        limits.max_stores, limits.max_depts
    );

    match state.dashboard.aggregate_rankings(Some(limits)).await {
        Ok(rankings) => {
            info!(
                "Rankings computed with {} best and {} worst records",
                rankings.best.len(),
                rankings.worst.len()
            );
            Ok(Json(ApiResponse::ok(rankings, "Rankings computed successfully")))
        }
        Err(e) => {
            error!("Failed to compute rankings: {}", e);
            Err(forecast_error_response(&e))
        }
    }
}
