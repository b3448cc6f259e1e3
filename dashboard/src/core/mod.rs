//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod aggregator;
pub mod auth;
pub mod classifier;
pub mod filter;
pub mod ingest;
pub mod view;

// Re-export commonly used types
pub use aggregator::summarize;
pub use auth::{AuthContext, Session, SessionTable};
pub use classifier::{Classifier, OVERSTOCK_MULTIPLIER, classify};
pub use filter::{FilterCriteria, SortDirective, distinct_states, filter_products, sort_products};
pub use ingest::normalize_payload;
pub use view::DashboardView;
