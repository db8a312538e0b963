use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the match-count RPC service (default)
    Serve,
    /// Count the matching lines once and print the result
    Count {
        /// Regular expression, matched case-insensitively
        query: String,
        /// Read the corpus from this directory instead of object storage
        #[arg(long)]
        corpus_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["server"], "info")]
    #[case(&["server", "-v", "serve"], "debug")]
    #[case(&["server", "serve", "-vvv"], "trace")]
    fn test_log_level(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(Cli::parse_from(args).log_level(), expected);
    }

    #[test]
    fn test_count_command() {
        let cli = Cli::parse_from(["server", "count", "to be", "--corpus-dir", "/tmp/corpus"]);
        match cli.command {
            Some(Commands::Count { query, corpus_dir }) => {
                assert_eq!(query, "to be");
                assert_eq!(corpus_dir, Some(PathBuf::from("/tmp/corpus")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
