//! Shared types for the stock dashboard
//!
//! Product records, stock states, KPI summaries and response envelopes, plus
//! the logging helpers used by every component.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    ApiEnvelope, ClassifiedProduct, FailureBody, KpiSummary, ProductRecord, StateBreakdown, StockState,
};
