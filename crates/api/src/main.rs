//! PauseCal - calendar pause/resume server
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use pausecal_api::utils::init_tracing;
use pausecal_api::{build_router, AppContext};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so configuration problems are visible
    init_tracing();

    let config = pausecal_infra::config::load().context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = Arc::new(AppContext::new(config).context("failed to build application context")?);
    ctx.configure_default_calendar().await;
    let mut scheduler =
        ctx.start_sweep_scheduler().await.context("failed to start sweep scheduler")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "PauseCal listening");

    axum::serve(listener, build_router(Arc::clone(&ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(err) = scheduler.stop().await {
            warn!(error = %err, "sweep scheduler did not stop cleanly");
        }
    }
    info!("PauseCal stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
