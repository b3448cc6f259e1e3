//! Stock-state classification
//!
//! Thresholds are checked in a fixed order and the first match wins, so a
//! product with no stock is `Critical` even when its safety stock is also 0.

use shared::{ClassificationMode, ClassifiedProduct, ProductRecord, StockState};

/// Current stock above `reorder_point * OVERSTOCK_MULTIPLIER` is overstock
pub const OVERSTOCK_MULTIPLIER: f64 = 2.0;

/// Classify one product from its stock figures
pub fn classify(current_stock: f64, safety_stock: f64, reorder_point: f64) -> StockState {
    if current_stock <= 0.0 {
        StockState::Critical
    } else if current_stock <= safety_stock {
        StockState::Caution
    } else if current_stock > reorder_point * OVERSTOCK_MULTIPLIER {
        StockState::Overstock
    } else {
        StockState::Normal
    }
}

/// Classify a normalized record
pub fn classify_record(record: &ProductRecord) -> StockState {
    classify(record.current_stock, record.safety_stock, record.reorder_point)
}

/// Attaches stock states to product records
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    mode: ClassificationMode,
}

impl Classifier {
    pub fn new(mode: ClassificationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ClassificationMode {
        self.mode
    }

    /// State for one record under the configured mode
    pub fn state_of(&self, record: &ProductRecord) -> Option<StockState> {
        match self.mode {
            ClassificationMode::Derive => Some(classify_record(record)),
            ClassificationMode::Upstream => record.upstream_stock_state(),
        }
    }

    /// Classify every record, keeping input order
    pub fn classify_all(&self, records: Vec<ProductRecord>) -> Vec<ClassifiedProduct> {
        records
            .into_iter()
            .map(|record| {
                let state = self.state_of(&record);
                ClassifiedProduct::new(record, state)
            })
            .collect()
    }
}
