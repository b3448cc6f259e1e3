//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod catalog;
pub mod credentials;
pub mod product_client;
pub mod session_store;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use catalog::{CatalogState, CatalogStatus, ProductCatalog};
pub use credentials::StaticCredentialStore;
pub use product_client::{PRODUCTS_PATH, RealProductSource};
pub use session_store::SessionStore;
