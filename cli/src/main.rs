//! IT Helpdesk — CLI Server
//!
//! Headless ticketing backend suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/it-helpdesk/config.toml)
//! helpdesk-service
//!
//! # Custom config path
//! helpdesk-service --config /etc/it-helpdesk/config.toml
//!
//! # Override the listen port
//! helpdesk-service --port 8080
//!
//! # Validate config without starting
//! helpdesk-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use helpdesk::config::AppConfig;
use helpdesk::server::{init_tracing, ServerHandle, ServerOptions};

/// IT Helpdesk: ticket submission and triage service.
#[derive(Parser, Debug)]
#[command(
    name = "helpdesk-service",
    version,
    about = "Internal IT-support ticketing service",
    long_about = "IT Helpdesk — REST API server where employees submit support tickets \
                  and administrators triage them.\n\n\
                  Default config: ~/.config/it-helpdesk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HELPDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the bootstrap admin account.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(helpdesk::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            // Fallback tracing init
            let level = cli.log_level.clone().unwrap_or_else(|| "info".to_string());
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(&level))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            let mut cfg = AppConfig::default();
            cfg.logging.level = level;
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(e) = config.validate() {
            error!("Configuration is invalid: {}", e);
            return Err(e.into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
