//! `timed serve`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::http::{serve, AppState};
use crate::adapters::trackers::TrackerRegistry;
use crate::domain::models::Config;

use super::open_database;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overriding server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding server.port
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let pool = open_database(&config).await?;
    let trackers = TrackerRegistry::from_settings(&config.trackers).context("Failed to build tracker clients")?;
    let state = AppState::new(pool, trackers, &config).context("Failed to build application state")?;

    serve(Arc::new(state), &config.server, shutdown_signal())
        .await
        .with_context(|| format!("Failed to serve on {}:{}", config.server.host, config.server.port))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
