use anyhow::Result;
use compute::aggregate::{
    DEFAULT_MAX_DEPTS, DEFAULT_MAX_IN_FLIGHT, DEFAULT_MAX_STORES, SamplingLimits,
};
use compute::dashboard::Dashboard;
use compute::provider::HttpForecastProvider;
use config::{Config, File};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::schemas::AppState;

/// Name of the optional settings file, looked up as `salesboard.toml` and
/// the other formats supported by `config`.
const SETTINGS_FILE: &str = "salesboard";

/// Service settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the forecasting API (`FORECAST_API_URL`)
    pub provider_url: String,
    /// Address the HTTP server binds to (`BIND_ADDRESS`)
    pub bind_address: String,
    /// Timeout applied to each request to the forecasting API
    pub request_timeout_secs: u64,
    /// Series fetches allowed in flight during one aggregation
    pub max_in_flight: usize,
    /// Stores sampled by default for rankings
    pub max_stores: usize,
    /// Departments sampled by default for rankings
    pub max_depts: usize,
}

impl Settings {
    /// Load settings from defaults, the optional settings file, `.env` and
    /// the `FORECAST_API_URL` / `BIND_ADDRESS` environment variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(
            Some(SETTINGS_FILE),
            std::env::var("FORECAST_API_URL").ok(),
            std::env::var("BIND_ADDRESS").ok(),
        )
    }

    fn from_sources(
        file: Option<&str>,
        provider_url: Option<String>,
        bind_address: Option<String>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("provider_url", "http://localhost:8000")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("request_timeout_secs", 30u64)?
            .set_default("max_in_flight", DEFAULT_MAX_IN_FLIGHT as u64)?
            .set_default("max_stores", DEFAULT_MAX_STORES as u64)?
            .set_default("max_depts", DEFAULT_MAX_DEPTS as u64)?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        let settings = builder
            .set_override_option("provider_url", provider_url)?
            .set_override_option("bind_address", bind_address)?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn sampling_limits(&self) -> SamplingLimits {
        SamplingLimits::new(self.max_stores, self.max_depts)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    tracing::info!("Using forecast provider at {}", settings.provider_url);
    let provider = HttpForecastProvider::new(&settings.provider_url, settings.request_timeout())?;

    let dashboard = Dashboard::new(
        Arc::new(provider),
        settings.max_in_flight,
        settings.sampling_limits(),
    );

    Ok(AppState { dashboard })
}
