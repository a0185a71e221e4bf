//! edge-server
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                   EDGE SERVER                    │
//!   Request       │  ┌──────────┐   ┌──────────────┐                 │
//!   ──────────────┼─▶│  trace + │──▶│  security    │──┬─▶ /csp-report │
//!                 │  │ req. id  │   │  headers     │  ├─▶ /validate-  │
//!                 │  └──────────┘   └──────────────┘  │    ip-address │
//!                 │                                   ├─▶ /reload (dev)
//!   Response      │                                   └─▶ static root │
//!   ◀─────────────┼─── CSP, HSTS (non-dev), nosniff, x-request-id      │
//!                 └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_server::config::{resolve_config, ConfigOverrides, Environment};
use edge_server::lifecycle::startup;
use edge_server::observability::init_logging;
use edge_server::security::ContentSecurityPolicy;

#[derive(Parser)]
#[command(name = "edge-server")]
#[command(about = "Static asset edge server with security headers", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "EDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Environment name; only `development` disables HSTS and asset caching.
    #[arg(short, long, env = "EDGE_ENV")]
    environment: Option<Environment>,

    /// Address to bind, e.g. 127.0.0.1:3000.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory to serve static files from.
    #[arg(long)]
    static_root: Option<PathBuf>,

    /// Validate the configuration, print the Content-Security-Policy and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        environment: cli.environment,
        bind_address: cli.bind,
        static_root: cli.static_root,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    if cli.check_config {
        let policy = ContentSecurityPolicy::from_directives(&config.security.csp_directives)?;
        println!("configuration ok");
        println!("environment: {}", config.environment);
        println!("content-security-policy: {}", policy.as_str());
        return Ok(());
    }

    init_logging(&config.observability)?;

    tracing::info!("edge-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = %config.environment,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
