//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;
use shared::ProductRecord;

use crate::error::DataSourceError;

/// Backend product data source
#[mockall::automock]
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch and normalize the full product list
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, DataSourceError>;

    /// Where the products come from, for diagnostics
    fn endpoint(&self) -> String;
}

/// Static allow-list of dashboard users
#[mockall::automock]
pub trait CredentialStore: Send + Sync {
    /// Check a username/password pair
    fn validate(&self, username: &str, password: &str) -> bool;

    /// Number of users that can log in
    fn user_count(&self) -> usize;
}
