//! Stock-health states and their canonical ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Categorical health label for a product's inventory level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockState {
    Critical,
    Caution,
    Normal,
    Overstock,
}

impl StockState {
    /// All states in criticality order
    pub const ALL: [StockState; 4] = [
        StockState::Critical,
        StockState::Caution,
        StockState::Normal,
        StockState::Overstock,
    ];

    /// Rank given to products that carry no recognised state
    pub const UNCLASSIFIED_RANK: u8 = 5;

    /// Criticality rank, 1 is most urgent
    pub fn rank(self) -> u8 {
        match self {
            StockState::Critical => 1,
            StockState::Caution => 2,
            StockState::Normal => 3,
            StockState::Overstock => 4,
        }
    }

    /// Rank of an optional state; unclassified products sort last
    pub fn rank_of(state: Option<StockState>) -> u8 {
        state.map(StockState::rank).unwrap_or(Self::UNCLASSIFIED_RANK)
    }

    /// Canonical English name
    pub fn name(self) -> &'static str {
        match self {
            StockState::Critical => "Critical",
            StockState::Caution => "Caution",
            StockState::Normal => "Normal",
            StockState::Overstock => "Overstock",
        }
    }

    /// Label used by the upstream data source
    pub fn upstream_label(self) -> &'static str {
        match self {
            StockState::Critical => "Critico",
            StockState::Caution => "Precaucion",
            StockState::Normal => "Dentro del rango",
            StockState::Overstock => "Sobre Produccion",
        }
    }

    /// Map an upstream label onto a state, `None` when unrecognised
    pub fn from_upstream_label(label: &str) -> Option<StockState> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.upstream_label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts canonical names and upstream labels, case-insensitively
impl FromStr for StockState {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_upstream_label(trimmed))
            .ok_or_else(|| SharedError::UnknownStockState { input: s.to_string() })
    }
}
