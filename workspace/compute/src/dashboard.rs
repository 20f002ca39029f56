use std::sync::Arc;

use common::{AlignedSeries, DeptId, Rankings, StoreId};
use tracing::{debug, error, info, instrument, trace};

use crate::aggregate::{ErrorAggregator, SamplingLimits};
use crate::align::align;
use crate::error::Result;
use crate::fetch::SeriesFetcher;
use crate::provider::ForecastProvider;
use crate::ranking::rank;

/// Entry point of the dashboard: selector catalog, rankings and chart data.
///
/// Holds no per-request state; every call fetches fresh data.
#[derive(Clone)]
pub struct Dashboard {
    fetcher: SeriesFetcher,
    aggregator: ErrorAggregator,
    default_limits: SamplingLimits,
}

impl Dashboard {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        max_in_flight: usize,
        default_limits: SamplingLimits,
    ) -> Self {
        let fetcher = SeriesFetcher::new(provider);
        let aggregator = ErrorAggregator::new(fetcher.clone(), max_in_flight);
        Self {
            fetcher,
            aggregator,
            default_limits,
        }
    }

    pub fn default_limits(&self) -> SamplingLimits {
        self.default_limits
    }

    /// Store ids for the store selector.
    pub async fn stores(&self) -> Result<Vec<StoreId>> {
        self.fetcher.provider().stores().await
    }

    /// Department ids for the department selector.
    pub async fn depts(&self) -> Result<Vec<DeptId>> {
        self.fetcher.provider().depts().await
    }

    /// Ranks the best and worst predicted pairs of a bounded sample.
    ///
    /// Fails only when the store or department lists cannot be retrieved;
    /// pairs that cannot be fetched are left out of the rankings.
    #[instrument(skip(self))]
    pub async fn aggregate_rankings(&self, limits: Option<SamplingLimits>) -> Result<Rankings> {
        let limits = limits.unwrap_or(self.default_limits);
        trace!("Discovering stores and departments");

        let provider = self.fetcher.provider();
        let (stores, depts) = match tokio::try_join!(provider.stores(), provider.depts()) {
            Ok(lists) => lists,
            Err(e) => {
                error!("Discovery failed, rankings unavailable: {}", e);
                return Err(e);
            }
        };
        debug!("Discovered {} stores and {} departments", stores.len(), depts.len());

        let records = self.aggregator.aggregate(&stores, &depts, limits).await;
        let rankings = rank(records);

        info!(
            best = rankings.best.len(),
            worst = rankings.worst.len(),
            "Rankings computed"
        );
        Ok(rankings)
    }

    /// Chart data of one pair. Fetch errors are returned to the caller.
    #[instrument(skip(self))]
    pub async fn align_for_chart(&self, store: StoreId, dept: DeptId) -> Result<AlignedSeries> {
        let series = self.fetcher.fetch_series(store, dept).await?;
        let aligned = align(&series);
        debug!(
            weeks = aligned.len(),
            boundary = aligned.forecast_boundary_index,
            "Chart series aligned"
        );
        Ok(aligned)
    }
}
