//! Runtime configuration for the dashboard process

use std::net::SocketAddr;
use std::time::Duration;

use shared::ClassificationMode;

use crate::error::{DashboardError, DashboardResult};

/// Default timeout for the product data source request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One allow-listed login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

/// Validated dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_address: SocketAddr,
    /// Base URL of the backend data source (without the products path)
    pub data_source_url: String,
    pub users: Vec<UserCredential>,
    pub classification: ClassificationMode,
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Build and validate a configuration from raw command line values
    pub fn new(
        host: &str,
        port: u16,
        data_source_url: &str,
        user_list: &str,
        classification: ClassificationMode,
        request_timeout_secs: u64,
    ) -> DashboardResult<Self> {
        let bind_address: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| DashboardError::config(format!("Invalid bind address {host}:{port}: {e}")))?;

        let data_source_url = data_source_url.trim().trim_end_matches('/').to_string();
        if !(data_source_url.starts_with("http://") || data_source_url.starts_with("https://")) {
            return Err(DashboardError::config(format!(
                "Data source URL must start with http:// or https://, got '{data_source_url}'"
            )));
        }

        if request_timeout_secs == 0 {
            return Err(DashboardError::config("Request timeout must be at least 1 second"));
        }

        Ok(Self {
            bind_address,
            data_source_url,
            users: parse_users(user_list)?,
            classification,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Parse `user:password` pairs separated by commas
///
/// The password is everything after the first colon, so it may itself contain colons.
pub fn parse_users(list: &str) -> DashboardResult<Vec<UserCredential>> {
    let mut users: Vec<UserCredential> = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (username, password) = entry
            .split_once(':')
            .ok_or_else(|| DashboardError::config(format!("User entry '{entry}' must be user:password")))?;

        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DashboardError::config(format!("User entry '{entry}' has an empty user or password")));
        }

        if users.iter().any(|u| u.username == username) {
            return Err(DashboardError::config(format!("User '{username}' is listed more than once")));
        }

        users.push(UserCredential {
            username: username.to_string(),
            password: password.to_string(),
        });
    }

    Ok(users)
}
