use common::{DeptId, StoreId};
use thiserror::Error;
use tracing::debug;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The provider could not be reached, answered with a failure status,
    /// or returned a body that could not be decoded
    #[error("Provider unavailable at {endpoint}: {reason}")]
    ProviderUnavailable { endpoint: String, reason: String },

    /// The provider returned a series whose sequences disagree in length
    #[error("Malformed series for store {store}, dept {dept}: {reason}")]
    MalformedSeries {
        store: StoreId,
        dept: DeptId,
        reason: String,
    },

    /// Runtime error for unexpected situations
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ForecastError {
    pub fn provider_unavailable(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        let err = ForecastError::ProviderUnavailable {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        };
        debug!(?err, "Forecast provider request failed");
        err
    }

    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::ProviderUnavailable { .. } => "PROVIDER_UNAVAILABLE",
            ForecastError::MalformedSeries { .. } => "MALFORMED_SERIES",
            ForecastError::Runtime(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<tokio::task::JoinError> for ForecastError {
    fn from(error: tokio::task::JoinError) -> Self {
        let err = ForecastError::Runtime(format!("Fetch task failed: {}", error));
        debug!(?err, "Aggregation task did not complete");
        err
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
