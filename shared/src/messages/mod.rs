//! Data types exchanged between the data source, the dashboard and its clients
//!
//! - `product`: product records and their normalization from untyped JSON
//! - `stock`: stock-health states and criticality ranking
//! - `kpi`: aggregate statistics over a product set
//! - `envelope`: HTTP response envelopes

pub mod envelope;
pub mod kpi;
pub mod product;
pub mod stock;

pub use envelope::{ApiEnvelope, FailureBody};
pub use kpi::{KpiSummary, StateBreakdown};
pub use product::{ClassifiedProduct, ProductRecord};
pub use stock::StockState;
