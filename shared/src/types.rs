//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SharedError;

/// Logical component of the dashboard that emitted a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// HTTP server and request handlers
    Server,
    /// Product catalog (load / reload lifecycle)
    Catalog,
    /// Backend product data source client
    DataSource,
    /// Login, logout and session table
    Auth,
    /// Classification, filtering and aggregation
    Pipeline,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Server => "server",
            Component::Catalog => "catalog",
            Component::DataSource => "data_source",
            Component::Auth => "auth",
            Component::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How each product receives its stock state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Compute the state locally from the stock figures
    #[default]
    Derive,
    /// Trust the label precomputed by the data source
    Upstream,
}

impl std::str::FromStr for ClassificationMode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derive" => Ok(ClassificationMode::Derive),
            "upstream" => Ok(ClassificationMode::Upstream),
            _ => Err(SharedError::InvalidConfig {
                field: "classification_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMode::Derive => write!(f, "derive"),
            ClassificationMode::Upstream => write!(f, "upstream"),
        }
    }
}
