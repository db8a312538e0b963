pub mod health;
pub mod search;

use health::{HealthCheckResponse, HealthError};
use search::{MatchCountError, MatchCountResponse};

#[tarpc::service]
pub trait Shakespeare {
    /// Heartbeat
    async fn ping() -> String;

    /// Count the corpus lines matching `query` (case-insensitive regex)
    async fn get_match_count(query: String) -> Result<MatchCountResponse, MatchCountError>;

    /// Serving status of `service`; an empty name asks about the whole server
    async fn check(service: String) -> HealthCheckResponse;

    /// Streaming health updates. Not supported, always answers `Unimplemented`
    async fn watch(service: String) -> Result<HealthCheckResponse, HealthError>;
}
