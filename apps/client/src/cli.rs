use clap::{ArgAction, Parser};

/// HTTP front-end relaying requests to the match-count service.
///
/// Reads `SERVER_ADDR` (required), `PORT` and `VALIDATE_RESULTS` from the environment.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
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
