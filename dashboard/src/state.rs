//! Dashboard server state
//!
//! Shared handles passed to every request handler through axum's `State`.

use axum::http::{HeaderMap, header};
use std::sync::Arc;
use std::time::Instant;

use crate::config::DashboardConfig;
use crate::core::auth::{AuthContext, token_from_cookie_header};
use crate::error::{DashboardError, DashboardResult};
use crate::services::{ProductCatalog, SessionStore};
use crate::traits::{CredentialStore, ProductSource};

pub struct DashboardState<P: ProductSource, C: CredentialStore> {
    pub config: Arc<DashboardConfig>,
    pub catalog: Arc<ProductCatalog<P>>,
    pub credentials: Arc<C>,
    pub sessions: Arc<SessionStore>,
    pub server_start_time: Instant,
}

// Handles are Arcs; P and C need not be Clone
impl<P: ProductSource, C: CredentialStore> Clone for DashboardState<P, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            catalog: self.catalog.clone(),
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            server_start_time: self.server_start_time,
        }
    }
}

impl<P: ProductSource, C: CredentialStore> DashboardState<P, C> {
    pub fn new(config: DashboardConfig, source: P, credentials: C) -> Self {
        let catalog = ProductCatalog::new(Arc::new(source), config.classification);

        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            credentials: Arc::new(credentials),
            sessions: Arc::new(SessionStore::new()),
            server_start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Session token carried by the request's cookie, if any
    pub fn session_token(headers: &HeaderMap) -> Option<&str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(token_from_cookie_header)
    }

    /// Resolve who is calling from the request headers
    pub async fn auth_context(&self, headers: &HeaderMap) -> AuthContext {
        self.sessions.context_for(Self::session_token(headers)).await
    }

    /// Like `auth_context`, but rejects anonymous callers
    pub async fn require_auth(&self, headers: &HeaderMap) -> DashboardResult<AuthContext> {
        let context = self.auth_context(headers).await;
        if context.is_authenticated() {
            Ok(context)
        } else {
            Err(DashboardError::Unauthorized)
        }
    }
}
