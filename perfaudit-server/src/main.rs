//! perfaudit-server: stub Lighthouse audit endpoint backed by randomized metrics.

mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use perfaudit::audit::endpoint::AUDIT_PATH;
use perfaudit::audit::MockMetricSource;
use perfaudit::config::load_config;
use perfaudit::logger;
use routes::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "perfaudit-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address (default: server.addr from config, then 127.0.0.1:3000)
    #[arg(long)]
    addr: Option<String>,

    /// Simulated audit latency in milliseconds (default: server.delayMs, then 2000)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for reproducible responses
    #[arg(long)]
    seed: Option<u64>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, env = "PERFAUDIT_LOG", default_value = "info")]
    log_level: LevelFilter,

    /// Path to config file (default: search .perfauditrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.log_level)?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?;

    let addr = args
        .addr
        .unwrap_or_else(|| config.server.addr().to_string());
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.server.delay());

    let source = match args.seed {
        Some(seed) => MockMetricSource::seeded(seed),
        None => MockMetricSource::new(),
    };
    let app = routes::router(AppState {
        source: Arc::new(source),
        delay,
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!(
        "listening on http://{}{} (delay {}ms)",
        addr,
        AUDIT_PATH,
        delay.as_millis()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
