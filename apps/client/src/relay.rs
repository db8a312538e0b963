//! Forwards queries to the match-count service.

use crate::candidates::Candidate;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rpc::ShakespeareClient;
use rpc::search::MatchCountError;
use tarpc::{client, context, tokio_serde::formats::Bincode};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rpc failed: {0}")]
    Rpc(#[from] client::RpcError),

    #[error(transparent)]
    Remote(#[from] MatchCountError),

    #[error("unexpected match count for {query:?}: expected {expected}, got {actual}")]
    UnexpectedResult {
        query: String,
        expected: u64,
        actual: u64,
    },
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::Remote(MatchCountError::InvalidQuery { .. }) => StatusCode::BAD_REQUEST,
            RelayError::UnexpectedResult { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!("request failed: {}", self);
        (status, self.to_string()).into_response()
    }
}

/// Something that answers match-count queries
#[async_trait]
pub trait MatchCounter: Send + Sync {
    async fn match_count(&self, query: &str) -> Result<u64, RelayError>;
}

/// Opens a fresh RPC connection per query, so the relay keeps working when
/// the service starts after it or restarts.
#[derive(Debug, Clone)]
pub struct RpcMatchCounter {
    server_addr: String,
}

impl RpcMatchCounter {
    pub fn new(server_addr: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
        }
    }
}

#[async_trait]
impl MatchCounter for RpcMatchCounter {
    async fn match_count(&self, query: &str) -> Result<u64, RelayError> {
        let transport =
            tarpc::serde_transport::tcp::connect(self.server_addr.as_str(), Bincode::default)
                .await
                .map_err(|source| RelayError::Connect {
                    addr: self.server_addr.clone(),
                    source,
                })?;
        let client = ShakespeareClient::new(client::Config::default(), transport).spawn();

        let response = client
            .get_match_count(context::current(), query.to_string())
            .await??;
        Ok(response.match_count)
    }
}

/// Sends `candidate` and, when `validate` is set, checks the count against
/// the expected one.
pub async fn relay(
    counter: &dyn MatchCounter,
    candidate: Candidate,
    validate: bool,
) -> Result<u64, RelayError> {
    tracing::info!("query: {:?}", candidate.query);
    let count = counter.match_count(candidate.query).await?;
    tracing::info!("match count for {:?}: {}", candidate.query, count);

    if validate && count != candidate.expected_count {
        return Err(RelayError::UnexpectedResult {
            query: candidate.query.to_string(),
            expected: candidate.expected_count,
            actual: count,
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CANDIDATES;
    use futures::{future, prelude::*};
    use rpc::Shakespeare;
    use rpc::health::{HealthCheckResponse, HealthError, HealthStatus};
    use rpc::search::MatchCountResponse;
    use tarpc::server::{self, Channel};

    struct FixedCounter(Result<u64, MatchCountError>);

    #[async_trait]
    impl MatchCounter for FixedCounter {
        async fn match_count(&self, _query: &str) -> Result<u64, RelayError> {
            Ok(self.0.clone()?)
        }
    }

    #[tokio::test]
    async fn test_relay_without_validation() {
        let counter = FixedCounter(Ok(3));
        assert_eq!(relay(&counter, CANDIDATES[0], false).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_relay_validation() {
        let hello = CANDIDATES[0];
        let counter = FixedCounter(Ok(hello.expected_count));
        assert_eq!(relay(&counter, hello, true).await.unwrap(), 349);

        let counter = FixedCounter(Ok(348));
        let err = relay(&counter, hello, true).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::UnexpectedResult { expected: 349, actual: 348, .. }
        ));
    }

    #[tokio::test]
    async fn test_remote_error_passes_through() {
        let counter = FixedCounter(Err(MatchCountError::CorpusUnavailable {
            reason: "bucket unreachable".to_string(),
        }));
        let err = relay(&counter, CANDIDATES[1], true).await.unwrap_err();
        assert!(matches!(err, RelayError::Remote(MatchCountError::CorpusUnavailable { .. })));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_status_codes() {
        let invalid = RelayError::Remote(MatchCountError::InvalidQuery {
            reason: "query must not be empty".to_string(),
        });
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let unexpected = RelayError::UnexpectedResult {
            query: "world".to_string(),
            expected: 728,
            actual: 0,
        };
        assert_eq!(
            unexpected.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    /// Answers every query with its length
    #[derive(Clone)]
    struct LengthServer;

    impl Shakespeare for LengthServer {
        async fn ping(self, _c: context::Context) -> String {
            "Pong".to_string()
        }

        async fn get_match_count(
            self,
            _c: context::Context,
            query: String,
        ) -> Result<MatchCountResponse, MatchCountError> {
            Ok(MatchCountResponse {
                match_count: query.len() as u64,
            })
        }

        async fn check(self, _c: context::Context, _service: String) -> HealthCheckResponse {
            HealthCheckResponse {
                status: HealthStatus::Serving,
            }
        }

        async fn watch(
            self,
            _c: context::Context,
            _service: String,
        ) -> Result<HealthCheckResponse, HealthError> {
            Err(HealthError::Unimplemented)
        }
    }

    #[tokio::test]
    async fn test_rpc_counter_over_tcp() {
        let listener = tarpc::serde_transport::tcp::listen("127.0.0.1:0", Bincode::default)
            .await
            .unwrap();
        let addr = listener.local_addr();
        tokio::spawn(
            listener
                .filter_map(|r| future::ready(r.ok()))
                .map(server::BaseChannel::with_defaults)
                .for_each(|channel| async move {
                    tokio::spawn(channel.execute(LengthServer.serve()).for_each(|fut| async move {
                        tokio::spawn(fut);
                    }));
                }),
        );

        let counter = RpcMatchCounter::new(addr.to_string());
        assert_eq!(counter.match_count("insolence").await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_rpc_counter_connect_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RpcMatchCounter::new(addr.to_string())
            .match_count("hello")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Connect { .. }));
    }
}
