//! `marqueed`: the marquee server binary.
//!
//! Usage:
//!   marqueed -c <context-name-or-path> [--listen <addr>]
//!   marqueed -c <context-name-or-path> token <user-id> [--name <display>]
//!   marqueed -c <context-name-or-path> audit
//!
//! The context name resolves to `/etc/marquee/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use marquee_core::{JwtService, Module};
use reactions::ReactionsModule;
use reactions::service::{ReactionService, ReactionsConfig};
use reactions::worker::{self, WorkerConfig};
use tracing::{error, info};

use config::ServerConfig;

/// Marquee server.
#[derive(Parser, Debug)]
#[command(name = "marqueed", about = "Movie reactions server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides `[server] listen`).
    #[arg(long = "listen")]
    listen: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mint a session token for a user id.
    Token {
        user_id: String,
        /// Display name carried in the token.
        #[arg(long)]
        name: Option<String>,
    },
    /// Recount reactions and repair drifted movie counters, then exit.
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    let jwt = JwtService::new(&server_config.jwt.secret, server_config.jwt.expire_secs);

    if let Some(Command::Token { user_id, name }) = &cli.command {
        let token = jwt.issue(user_id, name.as_deref().unwrap_or(user_id))?;
        println!("{}", token);
        return Ok(());
    }

    let kv = bootstrap::open_store(&server_config)?;
    let service = ReactionService::new(
        kv,
        ReactionsConfig {
            top_limit: server_config.reactions.top_limit,
        },
    );

    if let Some(Command::Audit) = &cli.command {
        let report = service.audit_stats()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if server_config.reactions.audit_on_start {
        let report = service.audit_stats()?;
        info!(
            "startup audit: {} movies checked, {} repaired",
            report.movies_checked, report.movies_repaired
        );
    }

    let audit_worker = match server_config.reactions.audit_interval_secs {
        0 => None,
        secs => Some(worker::start(
            Arc::clone(&service),
            WorkerConfig {
                audit_interval: secs,
            },
        )),
    };

    let module = ReactionsModule::new(Arc::clone(&service), Arc::new(jwt));
    info!("Reactions module initialized");

    let app = routes::build_router(vec![(module.name(), module.routes())]);

    let listen = cli
        .listen
        .clone()
        .unwrap_or_else(|| server_config.server.listen.clone());
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("marquee server listening on {}", listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(cancel) = audit_worker {
        cancel.cancel();
    }
    info!("marquee server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
