use std::sync::Arc;

use common::{DeptId, PredictionRecord, StoreId};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::ForecastError;
use crate::fetch::{RawSeries, SeriesFetcher};

/// Number of stores sampled when the caller does not say otherwise.
pub const DEFAULT_MAX_STORES: usize = 5;
/// Number of departments sampled when the caller does not say otherwise.
pub const DEFAULT_MAX_DEPTS: usize = 3;
/// Fetches allowed in flight at once when the caller does not say otherwise.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Bounds of the store x department sample evaluated by one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingLimits {
    pub max_stores: usize,
    pub max_depts: usize,
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            max_stores: DEFAULT_MAX_STORES,
            max_depts: DEFAULT_MAX_DEPTS,
        }
    }
}

impl SamplingLimits {
    pub fn new(max_stores: usize, max_depts: usize) -> Self {
        Self { max_stores, max_depts }
    }

    /// Cross product of the leading stores and departments, store-major.
    pub fn sample_pairs(&self, stores: &[StoreId], depts: &[DeptId]) -> Vec<(StoreId, DeptId)> {
        let stores = &stores[..self.max_stores.min(stores.len())];
        let depts = &depts[..self.max_depts.min(depts.len())];

        stores
            .iter()
            .flat_map(|&store| depts.iter().map(move |&dept| (store, dept)))
            .collect()
    }
}

/// Rounds half-way values towards positive infinity (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Index of the last week with an observed actual value.
///
/// Falls back to the last week when nothing was observed, and returns `None`
/// only for an empty series.
pub fn last_observed_index(actual: &[Option<f64>]) -> Option<usize> {
    if actual.is_empty() {
        return None;
    }
    Some(
        actual
            .iter()
            .rposition(Option::is_some)
            .unwrap_or(actual.len() - 1),
    )
}

/// Builds the error record of one pair from its last observed week.
///
/// The error is measured against `actual_full`, which has a value even where
/// the displayed `actual` is null. Returns `None` for an empty series.
pub fn extract_record(store: StoreId, dept: DeptId, series: &RawSeries) -> Option<PredictionRecord> {
    let index = last_observed_index(series.actual())?;
    let truth = series.actual_full()[index];
    let predicted = series.predicted()[index];
    let error = (truth - predicted).abs();

    Some(PredictionRecord {
        store,
        dept,
        date: series.dates()[index].clone(),
        actual: round_half_up(truth),
        predicted: round_half_up(predicted),
        error: round_half_up(error),
    })
}

/// Evaluates a bounded sample of pairs and emits one error record per pair.
///
/// Series are fetched concurrently, at most `max_in_flight` at a time. A pair
/// whose fetch fails is logged and skipped; the others are still evaluated.
#[derive(Clone)]
pub struct ErrorAggregator {
    fetcher: SeriesFetcher,
    max_in_flight: usize,
}

impl ErrorAggregator {
    pub fn new(fetcher: SeriesFetcher, max_in_flight: usize) -> Self {
        Self {
            fetcher,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Returns the records of the sampled pairs in sample order, regardless
    /// of the order in which the fetches completed.
    #[instrument(skip(self, stores, depts))]
    pub async fn aggregate(
        &self,
        stores: &[StoreId],
        depts: &[DeptId],
        limits: SamplingLimits,
    ) -> Vec<PredictionRecord> {
        let pairs = limits.sample_pairs(stores, depts);
        debug!(
            "Aggregating {} pairs with at most {} fetches in flight",
            pairs.len(),
            self.max_in_flight
        );

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();
        for (ordinal, &(store, dept)) in pairs.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire().await {
                    Ok(_permit) => fetcher.fetch_series(store, dept).await,
                    Err(e) => Err(ForecastError::Runtime(format!("Semaphore error: {}", e))),
                };
                (ordinal, store, dept, result)
            });
        }

        let mut collected = Vec::with_capacity(pairs.len());
        let mut failed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((ordinal, store, dept, Ok(series))) => match extract_record(store, dept, &series) {
                    Some(record) => {
                        trace!(store, dept, error = record.error, "Pair evaluated");
                        collected.push((ordinal, record));
                    }
                    None => debug!(store, dept, "Series has no weeks, no record emitted"),
                },
                Ok((_, store, dept, Err(err))) => {
                    failed += 1;
                    warn!(store, dept, error = %err, "Skipping pair");
                }
                Err(join_error) => {
                    failed += 1;
                    let err = ForecastError::from(join_error);
                    warn!(error = %err, "Skipping pair");
                }
            }
        }

        collected.sort_by_key(|(ordinal, _)| *ordinal);
        info!(
            pairs = pairs.len(),
            records = collected.len(),
            failed,
            "Aggregation finished"
        );
        collected.into_iter().map(|(_, record)| record).collect()
    }
}
