//! Stock dashboard entry point

use clap::Parser;
use shared::{ClassificationMode, Component, component_info, component_warn, logging};

use dashboard::config::DEFAULT_REQUEST_TIMEOUT;
use dashboard::{DashboardConfig, DashboardResult, DashboardServer, RealProductSource, StaticCredentialStore};

/// Command line arguments, each with an environment fallback
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Stock classification dashboard")]
struct Args {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "DASHBOARD_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, env = "DASHBOARD_PORT", default_value = "3000")]
    port: u16,

    /// Base URL of the product data source
    #[arg(long, env = "DATA_SOURCE_URL", default_value = "http://localhost:4353")]
    data_source_url: String,

    /// Allowed logins as comma separated user:password pairs
    #[arg(long, env = "DASHBOARD_USERS", default_value = "", hide_env_values = true)]
    users: String,

    /// How stock states are assigned (derive, upstream)
    #[arg(long, env = "CLASSIFICATION_MODE", default_value = "derive")]
    classification: ClassificationMode,

    /// Data source request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    request_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));

    let config = DashboardConfig::new(
        &args.host,
        args.port,
        &args.data_source_url,
        &args.users,
        args.classification,
        args.request_timeout,
    )?;

    logging::log_startup(
        Component::Server,
        &format!(
            "port {}, data source {}, {} classification",
            config.bind_address.port(),
            config.data_source_url,
            config.classification
        ),
    );

    if config.users.is_empty() {
        component_warn!(Component::Auth, "⚠️ No users configured; every login will be rejected");
    } else {
        component_info!(Component::Auth, "👥 {} users configured", config.users.len());
    }

    let source = RealProductSource::with_timeout(&config.data_source_url, config.request_timeout)?;
    let credentials = StaticCredentialStore::new(&config.users);

    let server = DashboardServer::new(config, source, credentials);
    server.run().await?;

    logging::log_success(Component::Server, "Dashboard stopped gracefully");
    Ok(())
}
