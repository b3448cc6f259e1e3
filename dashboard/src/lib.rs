//! Stock dashboard library
//!
//! Fetches the product list from the backend data source, classifies each
//! product's stock level, and serves filtered views with KPI summaries over
//! an authenticated JSON API.

pub mod config;
pub mod core;
pub mod dashboard_impl;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;

// Re-export main types
pub use config::{DashboardConfig, UserCredential};
pub use dashboard_impl::DashboardServer;
pub use error::{DashboardError, DashboardResult, DataSourceError};
pub use state::DashboardState;
pub use types::*;

// Re-export trait definitions
pub use traits::{CredentialStore, ProductSource};

// Re-export service implementations
pub use services::{ProductCatalog, RealProductSource, SessionStore, StaticCredentialStore};
