use common::{PredictionRecord, Rankings};
use tracing::debug;

/// Length of the best and worst tables shown on the dashboard.
pub const RANKING_SIZE: usize = 10;

/// Ranks records into the ten best and ten worst predictions.
pub fn rank(records: Vec<PredictionRecord>) -> Rankings {
    rank_top(records, RANKING_SIZE)
}

/// Ranks records by error into the `size` best and `size` worst predictions.
///
/// The sort is stable, so records with equal errors keep their input order.
/// `worst` is reversed, its first record has the largest error. With fewer
/// than `2 * size` records the two lists share records.
pub fn rank_top(mut records: Vec<PredictionRecord>, size: usize) -> Rankings {
    records.sort_by_key(|record| record.error);

    let best: Vec<_> = records.iter().take(size).cloned().collect();
    let worst: Vec<_> = records.iter().rev().take(size).cloned().collect();

    debug!(
        "Ranked {} records into {} best and {} worst",
        records.len(),
        best.len(),
        worst.len()
    );
    Rankings { best, worst }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(store: u32, error: i64) -> PredictionRecord {
        PredictionRecord {
            store,
            dept: 1,
            date: "2012-10-26".to_string(),
            actual: 1000,
            predicted: 1000 + error,
            error,
        }
    }

    fn errors(records: &[PredictionRecord]) -> Vec<i64> {
        records.iter().map(|r| r.error).collect()
    }

    #[test]
    fn test_rank_small_set() {
        let rankings = rank(vec![record(1, 5), record(2, 50), record(3, 1)]);

        assert_eq!(errors(&rankings.best), vec![1, 5, 50]);
        assert_eq!(errors(&rankings.worst), vec![50, 5, 1]);
    }

    #[test]
    fn test_rank_empty() {
        let rankings = rank(vec![]);
        assert!(rankings.best.is_empty());
        assert!(rankings.worst.is_empty());
    }

    #[test]
    fn test_rank_truncates_to_ten() {
        let records: Vec<_> = (0..25).map(|i| record(i, i64::from(i) * 3)).collect();
        let rankings = rank(records);

        assert_eq!(rankings.best.len(), 10);
        assert_eq!(rankings.worst.len(), 10);
        assert_eq!(rankings.best[0].error, 0);
        assert_eq!(rankings.worst[0].error, 72);
        assert_eq!(rankings.worst[9].error, 45);
        assert!(
            rankings
                .best
                .iter()
                .all(|b| !rankings.worst.contains(b))
        );
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let rankings = rank(vec![record(1, 7), record(2, 3), record(3, 7), record(4, 3)]);

        let best: Vec<_> = rankings.best.iter().map(|r| r.store).collect();
        assert_eq!(best, vec![2, 4, 1, 3]);
        let worst: Vec<_> = rankings.worst.iter().map(|r| r.store).collect();
        assert_eq!(worst, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_rank_extremes_lead_each_list() {
        let records = vec![record(1, 12), record(2, 900), record(3, 0), record(4, 45)];
        let rankings = rank(records.clone());

        let min = records.iter().map(|r| r.error).min().unwrap();
        let max = records.iter().map(|r| r.error).max().unwrap();
        assert_eq!(rankings.best[0].error, min);
        assert_eq!(rankings.worst[0].error, max);
    }

    #[test]
    fn test_rank_is_idempotent_on_sorted_input() {
        let records: Vec<_> = (0..15).map(|i| record(i, i64::from(i % 4))).collect();
        let once = rank_top(records, 15);
        let twice = rank_top(once.best.clone(), 15);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_small_set_overlaps() {
        let rankings = rank((0..12).map(|i| record(i, i64::from(i))).collect());
        let shared = rankings
            .best
            .iter()
            .filter(|b| rankings.worst.contains(b))
            .count();
        assert_eq!(shared, 8);
    }
}
