mod backoff;
mod cli;
mod config;
mod error;
mod runner;
mod target;

use error::WrapErr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(command_line.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = config::Config::from_env();
    let target = target::HttpTarget::new(cfg.base_url());

    info!("check connectivity: {}/_healthz", cfg.base_url());
    runner::wait_until_ready(&target, backoff::Backoff::default())
        .await
        .context("Client service is not reachable")?;

    info!("start client request loop");
    let succeeded =
        runner::run_requests(&target, runner::REQUEST_INTERVAL, command_line.requests).await;
    info!("{} requests succeeded", succeeded);

    Ok(())
}
