//! Type definitions for the dashboard HTTP API
//!
//! Request and response bodies that are not service traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ClassifiedProduct, KpiSummary, StockState};

use crate::core::filter::{FilterCriteria, SortDirective};
use crate::error::{DashboardError, DashboardResult};

/// Login form; fields are optional so missing ones produce a 400, not a decode error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

/// Query string of `/api/dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub state: Option<String>,
    pub sort: Option<String>,
}

impl DashboardQuery {
    /// Parse the raw selection; an empty state means "all states"
    pub fn into_selection(self) -> DashboardResult<(FilterCriteria, SortDirective)> {
        let state = match self.state.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<StockState>()?),
        };

        let sort = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .parse::<SortDirective>()
            .map_err(DashboardError::invalid_request)?;

        Ok((FilterCriteria::new(self.q.unwrap_or_default(), state), sort))
    }
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub query: String,
    pub state: Option<StockState>,
    pub sort: SortDirective,
    pub total_products: usize,
    pub visible_products: usize,
    /// States present in the full list, in criticality order
    pub states: Vec<StockState>,
    pub summary: KpiSummary,
    pub products: Vec<ClassifiedProduct>,
}

/// Result of an explicit reload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadOutcome {
    pub product_count: usize,
    pub loaded_at: DateTime<Utc>,
}
