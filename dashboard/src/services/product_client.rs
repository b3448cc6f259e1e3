//! HTTP client for the backend product data source
//!
//! Performs the single read the dashboard needs and maps every transport or
//! protocol problem onto a `DataSourceError`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use std::time::Duration;

use shared::{Component, ProductRecord, component_debug, component_info, component_warn};

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::core::ingest::{failure_message, normalize_payload};
use crate::error::{DashboardError, DashboardResult, DataSourceError};
use crate::traits::ProductSource;

/// Path of the product list on the data source
pub const PRODUCTS_PATH: &str = "/api/productos-sap";

const CLIENT_USER_AGENT: &str = concat!("stock-dashboard/", env!("CARGO_PKG_VERSION"));

/// Real product source backed by reqwest
#[derive(Clone)]
pub struct RealProductSource {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RealProductSource {
    /// Create a client for the data source at `base_url`
    pub fn new(base_url: &str) -> DashboardResult<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PRODUCTS_PATH),
            timeout,
            client,
        })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> DataSourceError {
        if error.is_timeout() {
            DataSourceError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            DataSourceError::unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl ProductSource for RealProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, DataSourceError> {
        component_debug!(Component::DataSource, "📡 Requesting products from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        let parsed = serde_json::from_str::<Value>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(failure_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unexpected status").to_string());

            component_warn!(Component::DataSource, "❌ Data source answered {}: {}", status, message);
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload = parsed.map_err(|e| DataSourceError::malformed(format!("Response body is not valid JSON: {e}")))?;
        let products = normalize_payload(&payload)?;

        component_info!(Component::DataSource, "✅ Received {} products", products.len());
        Ok(products)
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}
