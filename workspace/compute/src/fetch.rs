use std::sync::Arc;

use common::{DeptId, SalesSeriesResponse, StoreId};
use tracing::{debug, instrument};

use crate::error::{ForecastError, Result};
use crate::provider::ForecastProvider;

/// A provider series whose four sequences are known to have equal length.
///
/// The only way to obtain one is through [`RawSeries::validate`], so code that
/// holds a `RawSeries` may index all sequences with the same index.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    dates: Vec<String>,
    actual: Vec<Option<f64>>,
    predicted: Vec<f64>,
    actual_full: Vec<f64>,
}

impl RawSeries {
    /// Checks the equal-length invariant of a provider payload for one pair.
    pub fn validate(store: StoreId, dept: DeptId, response: SalesSeriesResponse) -> Result<Self> {
        let expected = response.dates.len();
        let lengths = [
            ("actual", response.actual.len()),
            ("predicted", response.predicted.len()),
            ("actual_full", response.actual_full.len()),
        ];

        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(ForecastError::MalformedSeries {
                store,
                dept,
                reason: format!("{} has {} entries, expected {}", name, len, expected),
            });
        }

        Ok(Self {
            dates: response.dates,
            actual: response.actual,
            predicted: response.predicted,
            actual_full: response.actual_full,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn actual(&self) -> &[Option<f64>] {
        &self.actual
    }

    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    pub fn actual_full(&self) -> &[f64] {
        &self.actual_full
    }
}

/// Fetches validated series for single pairs.
///
/// Cheap to clone; clones share the same provider.
#[derive(Clone)]
pub struct SeriesFetcher {
    provider: Arc<dyn ForecastProvider>,
}

impl SeriesFetcher {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn ForecastProvider> {
        &self.provider
    }

    /// Fetches the series of one pair. Failures are not retried.
    #[instrument(skip(self))]
    pub async fn fetch_series(&self, store: StoreId, dept: DeptId) -> Result<RawSeries> {
        let response = self.provider.sales(store, dept).await?;
        let series = RawSeries::validate(store, dept, response)?;
        debug!(store, dept, weeks = series.len(), "Fetched series");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StaticProvider, sales_response};

    #[test]
    fn test_validate_accepts_equal_lengths() {
        let response = sales_response(&[Some(1.0), None], &[1.5, 2.5], &[1.0, 3.0]);
        let series = RawSeries::validate(1, 1, response).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.actual(), &[Some(1.0), None]);
        assert_eq!(series.actual_full(), &[1.0, 3.0]);
    }

    #[test]
    fn test_validate_accepts_empty_series() {
        let series = RawSeries::validate(1, 1, sales_response(&[], &[], &[])).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        let mut response = sales_response(&[Some(1.0), Some(2.0)], &[1.0, 2.0], &[1.0, 2.0]);
        response.predicted.pop();

        let err = RawSeries::validate(3, 7, response).unwrap_err();
        assert_eq!(
            err,
            ForecastError::MalformedSeries {
                store: 3,
                dept: 7,
                reason: "predicted has 1 entries, expected 2".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_series_validates_response() {
        let mut broken = sales_response(&[Some(1.0)], &[1.0], &[1.0]);
        broken.actual_full.clear();
        let provider = StaticProvider::new(vec![1], vec![1, 2])
            .with_series(1, 1, sales_response(&[Some(1.0)], &[1.0], &[1.0]))
            .with_series(1, 2, broken);
        let fetcher = SeriesFetcher::new(Arc::new(provider));

        assert_eq!(fetcher.fetch_series(1, 1).await.unwrap().len(), 1);
        assert_eq!(
            fetcher.fetch_series(1, 2).await.unwrap_err().code(),
            "MALFORMED_SERIES"
        );
    }

    #[tokio::test]
    async fn test_fetch_series_propagates_provider_failure() {
        let provider = StaticProvider::new(vec![1], vec![1]).with_failure(1, 1);
        let fetcher = SeriesFetcher::new(Arc::new(provider));

        let err = fetcher.fetch_series(1, 1).await.unwrap_err();
        assert_eq!(err.code(), "PROVIDER_UNAVAILABLE");
    }
}
