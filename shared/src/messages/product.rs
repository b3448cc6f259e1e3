//! Product-stock records as served by the backend data source
//!
//! Records arrive as untyped JSON objects. `ProductRecord::from_value` is the
//! single place where field names, numeric coercion and date parsing are
//! settled; every defect in an individual field normalizes to a safe default
//! (0 for numbers, `None` for dates) instead of failing the record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::stock::StockState;

const CODE_KEYS: &[&str] = &["code", "CodigoDeArticulo"];
const DESCRIPTION_KEYS: &[&str] = &["description", "DescripcionArticulo"];
const CURRENT_STOCK_KEYS: &[&str] = &["currentStock", "StockProducto"];
const SAFETY_STOCK_KEYS: &[&str] = &["safetyStock", "StockSeguridad"];
const REORDER_POINT_KEYS: &[&str] = &["reorderPoint", "PuntoDeReOrden"];
const PENDING_DISPATCH_KEYS: &[&str] = &["pendingDispatches", "DespachosPendientes"];
const CABLE_MOVEMENT_KEYS: &[&str] = &["lastCableMovementDate", "UltimaNE_C_Cables"];
const LAST_MOVEMENT_KEYS: &[&str] = &["lastMovementDate", "UltimaFechaMovimiento"];
const PRODUCT_TYPE_KEYS: &[&str] = &["productType", "TipoProducto"];
const UNIT_KEYS: &[&str] = &["unitOfMeasure", "UnidadMedida"];
const AVERAGE_STOCK_KEYS: &[&str] = &["averageStock", "PromedioStock"];
const STATE_KEYS: &[&str] = &["upstreamState", "EstadoStock"];

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Canonical product record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub code: String,
    pub description: String,
    pub current_stock: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub pending_dispatches: f64,
    pub last_cable_movement_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_movement_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub average_stock: f64,
    /// Raw state label precomputed by the data source, if it sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_state: Option<String>,
}

impl ProductRecord {
    /// Create a record with the figures the classifier looks at
    pub fn new(code: impl Into<String>, description: impl Into<String>, current_stock: f64, safety_stock: f64, reorder_point: f64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            current_stock,
            safety_stock,
            reorder_point,
            ..Self::default()
        }
    }

    pub fn with_pending_dispatches(mut self, pending: f64) -> Self {
        self.pending_dispatches = pending;
        self
    }

    pub fn with_cable_movement(mut self, date: DateTime<Utc>) -> Self {
        self.last_cable_movement_date = Some(date);
        self
    }

    pub fn with_upstream_state(mut self, label: impl Into<String>) -> Self {
        self.upstream_state = Some(label.into());
        self
    }

    /// Normalize one untyped record. Upstream and canonical key names are both accepted.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            code: coerce_string(lookup(object, CODE_KEYS)).unwrap_or_default(),
            description: coerce_string(lookup(object, DESCRIPTION_KEYS)).unwrap_or_default(),
            current_stock: coerce_number(lookup(object, CURRENT_STOCK_KEYS)),
            safety_stock: coerce_number(lookup(object, SAFETY_STOCK_KEYS)),
            reorder_point: coerce_number(lookup(object, REORDER_POINT_KEYS)),
            pending_dispatches: coerce_number(lookup(object, PENDING_DISPATCH_KEYS)),
            last_cable_movement_date: coerce_date(lookup(object, CABLE_MOVEMENT_KEYS)),
            last_movement_date: coerce_date(lookup(object, LAST_MOVEMENT_KEYS)),
            product_type: coerce_string(lookup(object, PRODUCT_TYPE_KEYS)),
            unit_of_measure: coerce_string(lookup(object, UNIT_KEYS)),
            average_stock: coerce_number(lookup(object, AVERAGE_STOCK_KEYS)),
            upstream_state: coerce_string(lookup(object, STATE_KEYS)),
        }
    }

    /// Normalize a JSON value; `None` if it is not an object
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_object)
    }

    /// The upstream label mapped onto a state, if it is recognised
    pub fn upstream_stock_state(&self) -> Option<StockState> {
        self.upstream_state.as_deref().and_then(StockState::from_upstream_label)
    }
}

/// A product with its derived stock state attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedProduct {
    #[serde(flatten)]
    pub record: ProductRecord,
    /// `None` only when the state is taken from upstream and the label was missing or unknown
    pub state: Option<StockState>,
}

impl ClassifiedProduct {
    pub fn new(record: ProductRecord, state: Option<StockState>) -> Self {
        Self { record, state }
    }

    pub fn rank(&self) -> u8 {
        StockState::rank_of(self.state)
    }
}

fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Coerce to a finite number; everything unusable becomes 0
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a date in any of the accepted shapes; anything else is `None`
pub fn coerce_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
