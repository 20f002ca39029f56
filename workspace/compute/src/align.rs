use common::{AlignedSeries, SeriesPoint};
use tracing::trace;

use crate::fetch::RawSeries;

/// Index where the chart starts labelling weeks as forecast: `floor(0.8 * len)`.
///
/// This is a fixed display convention. It is independent of where actual
/// values stop, see [`crate::aggregate::last_observed_index`].
pub fn forecast_boundary_index(len: usize) -> usize {
    len * 4 / 5
}

/// Zips dates, actuals and predictions into chart points, in series order.
pub fn align(series: &RawSeries) -> AlignedSeries {
    let points: Vec<SeriesPoint> = series
        .dates()
        .iter()
        .zip(series.actual())
        .zip(series.predicted())
        .enumerate()
        .map(|(index, ((date, actual), predicted))| {
            SeriesPoint::new(index, date.clone(), *actual, Some(*predicted))
        })
        .collect();

    let boundary = forecast_boundary_index(points.len());
    trace!("Aligned {} weeks, forecast boundary at {}", points.len(), boundary);
    AlignedSeries::new(points, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sales_response, week_date};

    fn series(len: usize, observed: usize) -> RawSeries {
        let actual: Vec<_> = (0..len)
            .map(|i| (i < observed).then_some(i as f64 * 10.0))
            .collect();
        let predicted: Vec<_> = (0..len).map(|i| i as f64 * 10.0 + 1.0).collect();
        let actual_full: Vec<_> = (0..len).map(|i| i as f64 * 10.0).collect();
        RawSeries::validate(1, 1, sales_response(&actual, &predicted, &actual_full)).unwrap()
    }

    #[test]
    fn test_forecast_boundary_index() {
        assert_eq!(forecast_boundary_index(20), 16);
        assert_eq!(forecast_boundary_index(10), 8);
        assert_eq!(forecast_boundary_index(143), 114);
        assert_eq!(forecast_boundary_index(4), 3);
        assert_eq!(forecast_boundary_index(1), 0);
        assert_eq!(forecast_boundary_index(0), 0);
    }

    #[test]
    fn test_boundary_matches_float_floor() {
        for len in 0..500usize {
            assert_eq!(
                forecast_boundary_index(len),
                (len as f64 * 0.8).floor() as usize,
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_align_length_20() {
        let aligned = align(&series(20, 14));

        assert_eq!(aligned.len(), 20);
        assert_eq!(aligned.forecast_boundary_index, 16);
        assert_eq!(aligned.forecast_start_week.as_deref(), Some("W17"));
    }

    #[test]
    fn test_align_preserves_order_and_values() {
        let aligned = align(&series(5, 3));

        for (i, point) in aligned.points.iter().enumerate() {
            assert_eq!(point.index, i);
            assert_eq!(point.date, week_date(i));
            assert_eq!(point.week, format!("W{}", i + 1));
            assert_eq!(point.predicted, Some(i as f64 * 10.0 + 1.0));
        }
        assert_eq!(aligned.points[2].actual, Some(20.0));
        assert_eq!(aligned.points[3].actual, None);
    }

    #[test]
    fn test_boundary_ignores_last_observation() {
        // Actuals stop at week 3, the boundary still sits at 80%.
        let aligned = align(&series(10, 3));
        assert_eq!(aligned.forecast_boundary_index, 8);
    }

    #[test]
    fn test_align_empty_series() {
        let aligned = align(&series(0, 0));
        assert!(aligned.is_empty());
        assert_eq!(aligned.forecast_boundary_index, 0);
        assert_eq!(aligned.forecast_start_week, None);
    }
}
