#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use compute::aggregate::SamplingLimits;
    use compute::dashboard::Dashboard;
    use compute::testing::{StaticProvider, sales_response, series_with_error};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Provider with 8 stores and 4 departments. The default 5 x 3 sample
    /// has series whose errors grow by 10 per pair in sample order, except
    /// store 3 / dept 2 which is unreachable. Store 6 / dept 1 has a 20 week
    /// series for charts and store 7 / dept 1 a malformed one.
    pub fn sample_provider() -> StaticProvider {
        let mut provider = StaticProvider::new((1..=8).collect(), (1..=4).collect());
        let mut error = 0.0;
        for store in 1..=5 {
            for dept in 1..=3 {
                error += 10.0;
                if (store, dept) == (3, 2) {
                    provider = provider.with_failure(store, dept);
                    continue;
                }
                provider = provider.with_series(store, dept, series_with_error(20000.0, 20000.0 - error, 4));
            }
        }

        let actual: Vec<_> = (0..20u32).map(|i| (i < 16).then_some(15000.0 + f64::from(i))).collect();
        let predicted: Vec<_> = (0..20u32).map(|i| 15100.0 + f64::from(i)).collect();
        let actual_full: Vec<_> = (0..20u32).map(|i| 15000.0 + f64::from(i)).collect();
        provider = provider.with_series(6, 1, sales_response(&actual, &predicted, &actual_full));

        let mut malformed = sales_response(&[Some(1.0), Some(2.0)], &[1.0, 2.0], &[1.0, 2.0]);
        malformed.actual_full.pop();
        provider.with_series(7, 1, malformed)
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(provider: StaticProvider) -> AppState {
        let dashboard = Dashboard::new(Arc::new(provider), 4, SamplingLimits::default());
        AppState { dashboard }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing over the given provider
    pub fn setup_test_app_with(provider: StaticProvider) -> Router {
        let _ = init_test_tracing();
        create_router(setup_test_app_state(provider))
    }

    /// Create axum app for testing over [`sample_provider`]
    pub fn setup_test_app() -> Router {
        setup_test_app_with(sample_provider())
    }
}
