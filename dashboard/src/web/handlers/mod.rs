//! Request handlers
//!
//! Handlers are generic over the product source and credential store so the
//! router can be exercised with mocks.

pub mod auth;
pub mod products;
pub mod system;
