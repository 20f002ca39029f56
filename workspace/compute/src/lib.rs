pub mod aggregate;
pub mod align;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod ranking;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::sync::Arc;

use aggregate::{DEFAULT_MAX_IN_FLIGHT, SamplingLimits};
use dashboard::Dashboard;
use provider::ForecastProvider;

/// Returns a dashboard with the default sample (5 stores x 3 departments)
/// and the default fetch concurrency. This is what the service uses unless
/// configured otherwise.
pub fn default_dashboard(provider: Arc<dyn ForecastProvider>) -> Dashboard {
    Dashboard::new(provider, DEFAULT_MAX_IN_FLIGHT, SamplingLimits::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::{StaticProvider, series_with_error};

    #[tokio::test]
    async fn test_default_dashboard_samples_five_by_three() {
        let mut provider = StaticProvider::new((1..=45).collect(), (1..=99).collect());
        for store in 1..=45 {
            for dept in 1..=99 {
                provider = provider.with_series(store, dept, series_with_error(100.0, 90.0, 1));
            }
        }
        let provider = Arc::new(provider);
        let dashboard = default_dashboard(provider.clone());

        let rankings = dashboard.aggregate_rankings(None).await.unwrap();

        assert_eq!(provider.requests(), 15);
        assert_eq!(rankings.best.len(), 10);
        assert_eq!(dashboard.default_limits(), SamplingLimits::new(5, 3));
    }
}
