use axum::{http::StatusCode, response::Json};
use common::{AlignedSeries, ApiResponse, PredictionRecord, Rankings, SeriesPoint};
use compute::dashboard::Dashboard;
use compute::error::ForecastError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Rankings and chart pipeline over the forecast provider
    pub dashboard: Dashboard,
}

/// Query parameters for the rankings endpoint
#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RankingsQuery {
    /// Number of leading stores to sample (defaults to the configured value)
    #[validate(range(min = 1, max = 100))]
    pub max_stores: Option<usize>,
    /// Number of leading departments to sample (defaults to the configured value)
    #[validate(range(min = 1, max = 100))]
    pub max_depts: Option<usize>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl From<&ForecastError> for ErrorResponse {
    fn from(err: &ForecastError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
            success: false,
        }
    }
}

/// Maps a pipeline error onto the HTTP status and body returned to clients.
///
/// Provider problems are reported as 502 since this service is a gateway to
/// the forecasting API.
pub fn forecast_error_response(err: &ForecastError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        ForecastError::ProviderUnavailable { .. } | ForecastError::MalformedSeries { .. } => {
            StatusCode::BAD_GATEWAY
        }
        ForecastError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(err)))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Forecast provider reachability
    pub provider: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::catalog::get_stores,
        crate::handlers::catalog::get_depts,
        crate::handlers::rankings::get_rankings,
        crate::handlers::sales::get_sales_chart,
    ),
    components(
        schemas(
            ApiResponse<Rankings>,
            ApiResponse<AlignedSeries>,
            ApiResponse<Vec<u32>>,
            ErrorResponse,
            HealthResponse,
            RankingsQuery,
            Rankings,
            PredictionRecord,
            AlignedSeries,
            SeriesPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Store and department selector endpoints"),
        (name = "rankings", description = "Best and worst prediction rankings"),
        (name = "sales", description = "Actual vs predicted sales charts"),
    ),
    info(
        title = "Salesboard API",
        description = "Sales forecast dashboard API - prediction rankings and forecast charts per store and department",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
