use rpc::search::MatchCountError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid storage endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch pool is closed")]
    PoolClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query must not be empty")]
    Empty,

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("pattern {pattern:?} matches the empty string, so it would match every line")]
    MatchesEmpty { pattern: String },
}

impl From<QueryError> for MatchCountError {
    fn from(err: QueryError) -> Self {
        MatchCountError::InvalidQuery {
            reason: err.to_string(),
        }
    }
}

impl From<CorpusError> for MatchCountError {
    fn from(err: CorpusError) -> Self {
        MatchCountError::CorpusUnavailable {
            reason: err.to_string(),
        }
    }
}

pub type Result<T, E = CorpusError> = std::result::Result<T, E>;
