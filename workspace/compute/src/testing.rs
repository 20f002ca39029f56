//! In-memory forecast provider and series builders for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{DeptId, SalesSeriesResponse, StoreId};

use crate::error::{ForecastError, Result};
use crate::provider::ForecastProvider;

/// Builds a provider payload from parallel slices; dates are generated.
pub fn sales_response(
    actual: &[Option<f64>],
    predicted: &[f64],
    actual_full: &[f64],
) -> SalesSeriesResponse {
    SalesSeriesResponse {
        dates: (0..actual.len()).map(week_date).collect(),
        actual: actual.to_vec(),
        predicted: predicted.to_vec(),
        actual_full: actual_full.to_vec(),
    }
}

/// A series whose last observed week has the given ground truth and
/// prediction, followed by `forecast_weeks` weeks without actuals.
pub fn series_with_error(actual: f64, predicted: f64, forecast_weeks: usize) -> SalesSeriesResponse {
    let mut actuals = vec![Some(actual * 0.9), Some(actual)];
    let mut predictions = vec![actual * 0.9, predicted];
    let mut truth = vec![actual * 0.9, actual];
    for _ in 0..forecast_weeks {
        actuals.push(None);
        predictions.push(predicted * 1.1);
        truth.push(actual * 1.1);
    }
    sales_response(&actuals, &predictions, &truth)
}

/// Date label used by the builders for week `index`.
pub fn week_date(index: usize) -> String {
    format!("2012-W{:02}", index + 1)
}

/// Forecast provider serving canned responses.
///
/// Pairs without a canned series answer like a provider returning 404.
/// The provider records how many `sales` requests were in flight at once.
#[derive(Debug, Default)]
pub struct StaticProvider {
    stores: Vec<StoreId>,
    depts: Vec<DeptId>,
    series: HashMap<(StoreId, DeptId), SalesSeriesResponse>,
    failing: HashSet<(StoreId, DeptId)>,
    discovery_down: bool,
    latency: Option<Duration>,
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StaticProvider {
    pub fn new(stores: Vec<StoreId>, depts: Vec<DeptId>) -> Self {
        Self {
            stores,
            depts,
            ..Default::default()
        }
    }

    pub fn with_series(mut self, store: StoreId, dept: DeptId, series: SalesSeriesResponse) -> Self {
        self.series.insert((store, dept), series);
        self
    }

    /// Makes `sales` fail for the pair as if the transport broke.
    pub fn with_failure(mut self, store: StoreId, dept: DeptId) -> Self {
        self.failing.insert((store, dept));
        self
    }

    /// Makes `stores` and `depts` fail.
    pub fn with_discovery_down(mut self) -> Self {
        self.discovery_down = true;
        self
    }

    /// Delays every `sales` answer, so concurrent requests overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of `sales` requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Highest number of `sales` requests observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn discovery(&self, endpoint: &str) -> Result<()> {
        if self.discovery_down {
            return Err(ForecastError::provider_unavailable(
                endpoint,
                "Request failed: connection refused",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ForecastProvider for StaticProvider {
    async fn stores(&self) -> Result<Vec<StoreId>> {
        self.discovery("/stores")?;
        Ok(self.stores.clone())
    }

    async fn depts(&self) -> Result<Vec<DeptId>> {
        self.discovery("/depts")?;
        Ok(self.depts.clone())
    }

    async fn sales(&self, store: StoreId, dept: DeptId) -> Result<SalesSeriesResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let endpoint = format!("/sales/{}/{}", store, dept);
        if self.failing.contains(&(store, dept)) {
            return Err(ForecastError::provider_unavailable(
                endpoint,
                "Request failed: connection reset",
            ));
        }
        self.series
            .get(&(store, dept))
            .cloned()
            .ok_or_else(|| ForecastError::provider_unavailable(endpoint, "HTTP error: 404 Not Found"))
    }
}
