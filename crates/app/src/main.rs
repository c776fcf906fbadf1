//! Reelbreak - short-form video binge limiter
//!
//! Host process entry point. Speaks the page event protocol on
//! stdin/stdout; logs go to stderr.

use std::sync::Arc;

use anyhow::Context as _;
use reelbreak_app::{bridge, AppContext};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the overlay directive stream, so logging must stay off
    // it entirely.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = reelbreak_infra::config::load().context("failed to load configuration")?;
    info!(db = %config.database.path, "reelbreak starting");

    let (ctx, directives) =
        AppContext::new(config).await.context("failed to initialize application context")?;
    let ctx = Arc::new(ctx);

    ctx.start_schedulers().await.context("failed to start schedulers")?;

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    bridge::run(Arc::clone(&ctx), reader, writer, directives)
        .await
        .context("page event bridge failed")?;

    ctx.shutdown().await.context("shutdown failed")?;
    info!("reelbreak stopped");
    Ok(())
}
