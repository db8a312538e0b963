use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCountResponse {
    pub match_count: u64,
}

/// Failures of `get_match_count`, carried over the wire.
///
/// A failed call never reports a count, so an invalid query or an
/// unreachable corpus can not be mistaken for zero matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum MatchCountError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("corpus unavailable: {reason}")]
    CorpusUnavailable { reason: String },

    #[error("internal error: {reason}")]
    Internal { reason: String },
}
