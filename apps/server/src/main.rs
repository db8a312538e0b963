mod cli;
mod command;
mod config;
mod error;

use error::WrapErr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(command_line.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = config::Config::load().context("Load configuration error")?;

    let cmd: Box<dyn command::Command> = match command_line.command {
        None | Some(cli::Commands::Serve) => Box::new(command::ServeCommand::new(cfg)),
        Some(cli::Commands::Count { query, corpus_dir }) => {
            Box::new(command::CountCommand::new(cfg, query, corpus_dir))
        }
    };
    cmd.execute().await?;

    Ok(())
}
