//! Health and diagnostics endpoints

use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::DashboardState;
use crate::traits::{CredentialStore, ProductSource};

/// Health check endpoint
pub async fn health<P, C>(State(state): State<DashboardState<P, C>>) -> Json<Value>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "uptime": state.get_uptime_seconds(),
    }))
}

/// Diagnostics: data source wiring and catalog state
pub async fn api_test<P, C>(State(state): State<DashboardState<P, C>>) -> Json<Value>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    Json(json!({
        "success": true,
        "message": "Dashboard API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "dataSourceConfigured": !state.config.data_source_url.is_empty(),
        "dataSourceEndpoint": state.catalog.source().endpoint(),
        "classification": state.catalog.classification_mode(),
        "catalog": state.catalog.status().await,
        "configuredUsers": state.credentials.user_count(),
        "activeSessions": state.sessions.active_count().await,
        "timestamp": Utc::now(),
    }))
}
