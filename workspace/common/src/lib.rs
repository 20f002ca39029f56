//! Common transport-layer types shared between the dashboard service and its
//! consumers. The provider payloads mirror the forecasting API's JSON so the
//! service can deserialize them without duplicating shapes, and the dashboard
//! payloads are what the rendering layer receives.

mod catalog;
mod ranking;
mod series;

pub use catalog::{DeptsResponse, StoresResponse};
pub use ranking::{PredictionRecord, Rankings};
pub use series::{AlignedSeries, SalesSeriesResponse, SeriesPoint};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque store identifier handed out by the forecasting API.
pub type StoreId = u32;

/// Opaque department identifier handed out by the forecasting API.
pub type DeptId = u32;

/// Generic API response wrapper used by the dashboard service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
