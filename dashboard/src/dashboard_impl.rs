//! Main dashboard server implementation
//!
//! Wires the injected product source and credential store into the shared
//! state and exposes the axum router.

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::{Component, component_info, logging};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::traits::{CredentialStore, ProductSource};
use crate::web::handlers::{auth, products, system};

/// Main dashboard server with dependency injection
pub struct DashboardServer<P: ProductSource, C: CredentialStore> {
    state: DashboardState<P, C>,
}

impl<P, C> DashboardServer<P, C>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    pub fn new(config: DashboardConfig, source: P, credentials: C) -> Self {
        Self {
            state: DashboardState::new(config, source, credentials),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Open routes
            .route("/health", get(system::health::<P, C>))
            .route("/api/test", get(system::api_test::<P, C>))
            .route("/api/auth", post(auth::login::<P, C>))
            .route("/api/logout", post(auth::logout::<P, C>))
            .route("/api/session", get(auth::session::<P, C>))
            // Session required
            .route("/api/products", get(products::list_products::<P, C>))
            .route("/api/products/reload", post(products::reload_products::<P, C>))
            .route("/api/dashboard", get(products::dashboard::<P, C>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> DashboardResult<()> {
        let address = self.state.config.bind_address;
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| DashboardError::ServerStartup {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        component_info!(Component::Server, "🌐 Dashboard listening on http://{}", address);
        component_info!(
            Component::Server,
            "📡 Product data source: {}",
            self.state.catalog.source().endpoint()
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    pub fn state(&self) -> &DashboardState<P, C> {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(Component::Server, "Received Ctrl+C signal"),
        Err(err) => logging::log_error(Component::Server, "Signal handling", &err),
    }
}
