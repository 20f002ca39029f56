use async_trait::async_trait;
use common::{DeptId, SalesSeriesResponse, StoreId};

use crate::error::Result;

pub mod http;

pub use http::HttpForecastProvider;

/// Source of forecast series, store ids and department ids.
///
/// Implementations talk to the forecasting backend. Every call is a single
/// independent request; retries, if any, are the implementation's business.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Lists the known store ids, in provider order.
    async fn stores(&self) -> Result<Vec<StoreId>>;

    /// Lists the known department ids, in provider order.
    async fn depts(&self) -> Result<Vec<DeptId>>;

    /// Returns the raw sales series for one pair.
    async fn sales(&self, store: StoreId, dept: DeptId) -> Result<SalesSeriesResponse>;
}
