use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{DeptId, StoreId};

/// Error summary for one (store, department) pair, taken at the most recent
/// observed week of its series. All amounts are rounded to whole units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PredictionRecord {
    pub store: StoreId,
    pub dept: DeptId,
    /// Week date of the evaluated point
    pub date: String,
    /// Ground truth sales at that week
    pub actual: i64,
    /// Predicted sales at that week
    pub predicted: i64,
    /// Absolute prediction error, never negative
    pub error: i64,
}

/// Best and worst predicted pairs of one aggregation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Rankings {
    /// Lowest errors first
    pub best: Vec<PredictionRecord>,
    /// Highest errors first
    pub worst: Vec<PredictionRecord>,
}
