//! KPI summary types shared with the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stock::StockState;

/// Count and share of products in one stock state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateBreakdown {
    pub count: usize,
    pub percentage: f64,
}

/// Aggregate statistics over the currently visible product set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total: usize,
    pub critical: StateBreakdown,
    pub caution: StateBreakdown,
    pub normal: StateBreakdown,
    pub overstock: StateBreakdown,
    pub mean_stock: f64,
    pub dispatch_percentage: f64,
    pub latest_cable_movement: Option<DateTime<Utc>>,
}

impl KpiSummary {
    /// Breakdown for a single state
    pub fn breakdown(&self, state: StockState) -> &StateBreakdown {
        match state {
            StockState::Critical => &self.critical,
            StockState::Caution => &self.caution,
            StockState::Normal => &self.normal,
            StockState::Overstock => &self.overstock,
        }
    }

    pub fn breakdown_mut(&mut self, state: StockState) -> &mut StateBreakdown {
        match state {
            StockState::Critical => &mut self.critical,
            StockState::Caution => &mut self.caution,
            StockState::Normal => &mut self.normal,
            StockState::Overstock => &mut self.overstock,
        }
    }

    /// Products counted in no state bucket
    pub fn unclassified(&self) -> usize {
        let classified: usize = StockState::ALL.iter().map(|s| self.breakdown(*s).count).sum();
        self.total.saturating_sub(classified)
    }
}
