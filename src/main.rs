//! HTTP server for the salary engine.
//!
//! Loads the regime tables (from a directory, or the embedded reference
//! tables) and serves the calculation API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use salary_engine::api::{create_router, AppState};
use salary_engine::config::ConfigLoader;

/// Vietnamese gross-to-net salary engine.
#[derive(Parser, Debug)]
#[command(name = "salary-engine", version, about, long_about = None)]
struct Args {
    /// Directory holding engine.yaml and regimes/*.yaml. Uses the embedded
    /// reference tables when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let loader = match &args.config {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("failed to load configuration from {}", dir.display()))?,
        None => ConfigLoader::builtin().context("failed to load embedded configuration")?,
    };

    let config = loader.config();
    info!(
        name = %config.settings().name,
        regimes = config.regimes().len(),
        baseline = config.baseline_regime().id(),
        proposed = config.proposed_regime().id(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(address = %args.bind, "Listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
