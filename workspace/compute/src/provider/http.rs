use std::time::Duration;

use async_trait::async_trait;
use common::{DeptId, DeptsResponse, SalesSeriesResponse, StoreId, StoresResponse};
use serde::Deserialize;
use tracing::{debug, info, instrument, trace};

use super::ForecastProvider;
use crate::error::{ForecastError, Result};

/// Forecast provider backed by the forecasting API over HTTP/JSON.
///
/// One `reqwest::Client` is shared by all requests so connections are pooled
/// across the fetches of an aggregation pass.
#[derive(Debug, Clone)]
pub struct HttpForecastProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForecastProvider {
    /// Creates a provider for the API rooted at `base_url`
    /// (e.g. `http://localhost:8000`), applying `timeout` to every request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForecastError::provider_unavailable(&base_url, e))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, endpoint: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET request to: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::provider_unavailable(endpoint, format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::provider_unavailable(
                endpoint,
                format!("HTTP error: {}", status),
            ));
        }

        trace!("GET {} - Response received, parsing JSON", endpoint);
        let body = response.json::<T>().await.map_err(|e| {
            ForecastError::provider_unavailable(endpoint, format!("Failed to parse response: {}", e))
        })?;

        info!("GET {} - Success", endpoint);
        Ok(body)
    }
}

#[async_trait]
impl ForecastProvider for HttpForecastProvider {
    #[instrument(skip(self))]
    async fn stores(&self) -> Result<Vec<StoreId>> {
        let body: StoresResponse = self.get_json("/stores").await?;
        Ok(body.stores)
    }

    #[instrument(skip(self))]
    async fn depts(&self) -> Result<Vec<DeptId>> {
        let body: DeptsResponse = self.get_json("/depts").await?;
        Ok(body.depts)
    }

    #[instrument(skip(self))]
    async fn sales(&self, store: StoreId, dept: DeptId) -> Result<SalesSeriesResponse> {
        self.get_json(&format!("/sales/{}/{}", store, dept)).await
    }
}
