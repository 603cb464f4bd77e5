//! Server assembly: state construction, binding and graceful shutdown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use expensesms_adapters::MoyskladClient;

use crate::api;
use crate::config::Config;
use crate::database;
use crate::state::AppState;

/// Open the account store and the MoySklad client described by `config`.
pub async fn build_state(config: Config) -> anyhow::Result<AppState> {
    let store = database::open(&config.storage)
        .await
        .context("failed to open account store")?;

    let adapter = MoyskladClient::new(
        &config.moysklad.api_url,
        Duration::from_secs(config.moysklad.request_timeout_secs),
    )
    .context("failed to build MoySklad client")?;

    Ok(AppState::new(config, store, Arc::new(adapter)))
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let workers = config.server.workers;
    let threads = config.server.threads;
    let timeout = config.server.timeout_secs;

    let state = build_state(config).await?;
    if !state.verifier.is_enforcing() {
        tracing::warn!("app secret is not set, signed requests are not verified");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, workers, threads, timeout_secs = timeout, "listening");
    serve(listener, state, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
