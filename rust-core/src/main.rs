use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use hepsurv::artifacts::{self, FsArtifactRepo};
use hepsurv::common::config::AppCfg;
use hepsurv::common::log;

/// Serve the hepatitis survival classifier over HTTP.
#[derive(Debug, Parser)]
#[command(name = "hepsurv", version)]
struct Cli {
    /// Address to bind (overrides HEPSURV_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides HEPSURV_PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = AppCfg::load();
    if let Some(host) = cli.host {
        cfg.host = host;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    log::init(&cfg);

    let repo = FsArtifactRepo::new(&cfg);
    let pipeline = match artifacts::load(&repo) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!(code = err.code() as u32, error = %err, "startup failed");
            return Err(err).context("cannot start without model artifacts");
        }
    };

    let app = hepsurv::router(Arc::new(pipeline));
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("hepsurv stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
