use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mtls_cert_manager::config::loader::load_config;
use mtls_cert_manager::config::validation::validate_config;
use mtls_cert_manager::{HttpServer, ProxyConfig};

#[derive(Parser)]
#[command(
    name = "mtls-cert-manager",
    about = "HTTP edge proxy and UI for Cloudflare mTLS certificate management"
)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address override.
    #[arg(long, env = "MTLS_MANAGER_BIND")]
    bind: Option<String>,

    /// Upstream API base URL override.
    #[arg(long, env = "MTLS_MANAGER_API_BASE")]
    api_base: Option<String>,

    /// Default X-Auth-Email fallback.
    #[arg(long, env = "MTLS_MANAGER_AUTH_EMAIL")]
    auth_email: Option<String>,

    /// Default X-Auth-Key fallback.
    #[arg(long, env = "MTLS_MANAGER_AUTH_KEY")]
    auth_key: Option<String>,

    /// Default account id for account-scoped operations.
    #[arg(long, env = "MTLS_MANAGER_ACCOUNT_ID")]
    account_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mtls_cert_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("mtls-cert-manager v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    // CLI/env overrides take precedence over the file.
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(api_base) = args.api_base {
        config.upstream.api_base = api_base;
    }
    if let Some(auth_email) = args.auth_email {
        config.upstream.auth_email = auth_email;
    }
    if let Some(auth_key) = args.auth_key {
        config.upstream.auth_key = auth_key;
    }
    if let Some(account_id) = args.account_id {
        config.upstream.account_id = account_id;
    }

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base = %config.upstream.api_base,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
