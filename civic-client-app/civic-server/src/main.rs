use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use civic_api::AppState;
use civic_security::{PasswordService, SystemClock};
use civic_shared::config::AppConfig;

#[derive(Parser)]
#[command(name = "civic-server", about = "Civic report admin server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print an Argon2 hash for admin.password_hash
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = cli.command {
        println!("{}", PasswordService::hash(&password)?);
        return Ok(());
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = civic_shared::telemetry::init_telemetry();

    info!("Civic admin server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.admin.password_hash.is_none() {
        warn!("Admin password is configured in plain text; prefer admin.password_hash");
    }

    // Create App State
    let state = AppState::from_config(&config, Arc::new(SystemClock))?;
    info!(
        ttl_seconds = state.sessions.ttl_seconds(),
        signed = state.sessions.is_signed(),
        secure_cookie = config.is_production(),
        "Admin sessions configured"
    );

    // Build router
    let app = civic_api::router(state, civic_api::static_pages(&config.app.static_dir));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
