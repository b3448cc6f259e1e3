//! Dashboard error types
//!
//! Boundary failures of the product data source are kept in their own enum so
//! the catalog can store them and the HTTP layer can report them verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use shared::{FailureBody, SharedError};
use thiserror::Error;

/// Failures while fetching or decoding the product list
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataSourceError {
    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },

    #[error("Data source did not respond within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Data source responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("{message}")]
    Malformed { message: String },
}

impl DataSourceError {
    pub const GENERIC_MESSAGE: &'static str = "Failed to load products";

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed { message: message.into() }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }

    /// HTTP status reported to dashboard clients
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Status { .. } | Self::Rejected { .. } | Self::Malformed { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartup { address: String, message: String },

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::InvalidRequest { details: details.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DataSource(e) => e.status_code(),
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingCredentials | Self::InvalidRequest { .. } | Self::Shared(_) => StatusCode::BAD_REQUEST,
            Self::Config { .. }
            | Self::ServerStartup { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::DataSource(e) => FailureBody::new(e.to_string()).retryable(),
            Self::Config { .. } | Self::ServerStartup { .. } | Self::Io(_) | Self::Json(_) | Self::Internal(_) => {
                shared::component_error!(shared::Component::Server, "Request failed: {}", self);
                FailureBody::new("Internal server error")
            }
            _ => FailureBody::new(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
