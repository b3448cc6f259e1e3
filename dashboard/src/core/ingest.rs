//! Normalization of data-source payloads
//!
//! The data source answers either with a bare array of records or with a
//! `{ success, data, total, timestamp }` envelope. Both collapse to a plain
//! `Vec<ProductRecord>` here; nothing downstream looks at the payload shape.

use serde_json::Value;
use shared::{Component, ProductRecord, component_warn};

use crate::error::DataSourceError;

/// Turn a decoded response body into canonical product records
pub fn normalize_payload(payload: &Value) -> Result<Vec<ProductRecord>, DataSourceError> {
    match payload {
        Value::Array(items) => Ok(normalize_records(items)),
        Value::Object(object) => match object.get("success").and_then(Value::as_bool) {
            Some(true) => match object.get("data") {
                Some(Value::Array(items)) => Ok(normalize_records(items)),
                _ => Err(DataSourceError::malformed(
                    failure_message(payload).unwrap_or_else(|| "Response envelope has no product list".to_string()),
                )),
            },
            Some(false) => Err(DataSourceError::rejected(
                failure_message(payload).unwrap_or_else(|| DataSourceError::GENERIC_MESSAGE.to_string()),
            )),
            None => Err(DataSourceError::malformed(
                failure_message(payload).unwrap_or_else(|| DataSourceError::GENERIC_MESSAGE.to_string()),
            )),
        },
        _ => Err(DataSourceError::malformed(DataSourceError::GENERIC_MESSAGE)),
    }
}

/// Human-readable message carried by an error body, if any
pub fn failure_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

fn normalize_records(items: &[Value]) -> Vec<ProductRecord> {
    let records: Vec<ProductRecord> = items.iter().filter_map(ProductRecord::from_value).collect();

    let skipped = items.len() - records.len();
    if skipped > 0 {
        component_warn!(Component::DataSource, "Skipped {} non-object entries in product list", skipped);
    }

    records
}
