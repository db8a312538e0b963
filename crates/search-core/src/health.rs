use config::constants::SERVICE_NAME;
use rpc::health::{HealthCheckResponse, HealthError, HealthStatus};
use std::sync::Arc;
use tokio::sync::watch;

/// Serving status of the process, shared between the RPC handlers and `main`.
#[derive(Debug, Clone)]
pub struct HealthReporter {
    status: Arc<watch::Sender<HealthStatus>>,
}

impl HealthReporter {
    /// Starts out `Unknown` until the server is listening.
    pub fn new() -> Self {
        Self {
            status: Arc::new(watch::Sender::new(HealthStatus::Unknown)),
        }
    }

    pub fn status(&self) -> HealthStatus {
        *self.status.borrow()
    }

    pub fn set_serving(&self) {
        self.status.send_replace(HealthStatus::Serving);
    }

    pub fn set_not_serving(&self) {
        self.status.send_replace(HealthStatus::NotServing);
    }

    pub fn check(&self, service: &str) -> HealthCheckResponse {
        let status = if service.is_empty() || service == SERVICE_NAME {
            self.status()
        } else {
            HealthStatus::ServiceUnknown
        };
        HealthCheckResponse { status }
    }

    pub fn watch(&self, _service: &str) -> Result<HealthCheckResponse, HealthError> {
        Err(HealthError::Unimplemented)
    }
}

impl Default for HealthReporter {
    fn default() -> Self {
        Self::new()
    }
}
