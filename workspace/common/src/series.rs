use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload of the provider's `GET /sales/{store}/{dept}`.
///
/// The four sequences are parallel and aligned by index to the same week.
/// Nothing here enforces equal lengths; the compute crate validates that
/// when it turns the payload into a `RawSeries`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SalesSeriesResponse {
    /// Week dates as reported by the provider
    pub dates: Vec<String>,
    /// Observed sales, `null` for forecast-only weeks
    pub actual: Vec<Option<f64>>,
    /// Predicted sales for every week
    pub predicted: Vec<f64>,
    /// Ground truth for every week, used for error computation
    pub actual_full: Vec<f64>,
}

/// A single week of an aligned series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeriesPoint {
    /// Zero-based position in the series
    pub index: usize,
    /// Axis label, `W1` for index 0
    pub week: String,
    /// Week date as reported by the provider
    pub date: String,
    /// Observed sales, absent for forecast-only weeks
    pub actual: Option<f64>,
    /// Predicted sales
    pub predicted: Option<f64>,
}

impl SeriesPoint {
    pub fn new(index: usize, date: String, actual: Option<f64>, predicted: Option<f64>) -> Self {
        Self {
            index,
            week: format!("W{}", index + 1),
            date,
            actual,
            predicted,
        }
    }
}

/// Display-ready actual vs predicted series for one (store, department) pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AlignedSeries {
    /// Weekly points in provider order
    pub points: Vec<SeriesPoint>,
    /// First index labelled as forecast on the chart
    pub forecast_boundary_index: usize,
    /// Week label at the boundary, absent when the boundary is past the end
    pub forecast_start_week: Option<String>,
}

impl AlignedSeries {
    pub fn new(points: Vec<SeriesPoint>, forecast_boundary_index: usize) -> Self {
        let forecast_start_week = points
            .get(forecast_boundary_index)
            .map(|point| point.week.clone());
        Self {
            points,
            forecast_boundary_index,
            forecast_start_week,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
