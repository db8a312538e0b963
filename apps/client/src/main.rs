mod candidates;
mod cli;
mod config;
mod error;
mod relay;
mod routes;

use error::WrapErr;

use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(command_line.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = config::Config::from_env().context("Load configuration error")?;
    info!("relaying to match-count service at {}", cfg.server_addr);
    if cfg.validate_results {
        info!("validating counts against the reference table");
    }

    let counter = Arc::new(relay::RpcMatchCounter::new(cfg.server_addr.clone()));
    let app = routes::router(routes::AppState::new(counter, cfg.validate_results));

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr())
        .await
        .with_context(|| format!("Listen on {} error", cfg.listen_addr()))?;
    info!("start server in port {}", cfg.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}

/// Resolves once `signal` fires. A signal that cannot be listened for never
/// resolves, so the relay keeps serving instead of stopping at startup.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            tracing::error!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_stops_server() {
        let stopped = tokio::time::timeout(Duration::from_secs(1), shutdown_on(async { Ok(()) }));
        assert!(stopped.await.is_ok());
    }

    #[tokio::test]
    async fn test_signal_error_keeps_serving() {
        let signal = async { Err(std::io::Error::other("no signal handler")) };
        let stopped = tokio::time::timeout(Duration::from_millis(200), shutdown_on(signal));
        assert!(stopped.await.is_err());
    }
}
