use clap::{ArgAction, Parser};

/// Waits for the front-end to report healthy, then requests `/` every two seconds.
///
/// The target comes from `CLIENT_ADDR` (default `0.0.0.0:8080`).
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Stop after this many requests instead of running forever
    #[arg(long)]
    pub requests: Option<u64>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
