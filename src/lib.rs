//! Sales forecast dashboard service: serves best/worst prediction rankings
//! and actual vs predicted chart series computed from a forecasting API.

pub mod config;
pub mod handlers;
pub mod router;
pub mod schemas;

mod test_utils;
