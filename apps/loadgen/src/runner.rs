//! Readiness probing and the steady request loop.

use crate::backoff::Backoff;
use crate::target::Target;
use std::time::Duration;
use tracing::{error, info, warn};

/// Pause between two steady-state requests
pub const REQUEST_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    #[error("exponential backoff exceeded the threshold after {attempts} health checks")]
    BackoffExhausted { attempts: u32 },
}

/// Polls `/_healthz` until it answers `ok`.
///
/// Transport failures and other bodies count as "not ready". Between attempts
/// it sleeps for the next backoff wait and gives up once the backoff is exhausted.
pub async fn wait_until_ready<T>(target: &T, mut backoff: Backoff) -> Result<(), ReadinessError>
where
    T: Target + ?Sized,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match target.healthz().await {
            Ok(body) if body == "ok" => {
                info!("confirmed connection to client service");
                return Ok(());
            }
            Ok(body) => info!("/_healthz response: {}", body),
            Err(e) => warn!("/_healthz failed: {}", e),
        }

        let Some(wait) = backoff.next_wait() else {
            error!("exponential backoff exceeded the threshold");
            return Err(ReadinessError::BackoffExhausted { attempts });
        };
        warn!("not connected. wait for {:?} and retry.", wait);
        tokio::time::sleep(wait).await;
    }
}

/// Requests `/` once per `interval`, `limit` times or forever.
///
/// Failed requests are logged and the loop goes on. Returns the number of
/// successful requests.
pub async fn run_requests<T>(target: &T, interval: Duration, limit: Option<u64>) -> u64
where
    T: Target + ?Sized,
{
    let mut sent = 0;
    let mut succeeded = 0;
    loop {
        sent += 1;
        match target.call().await {
            Ok(body) => {
                succeeded += 1;
                info!("count: {}", body);
            }
            Err(e) => warn!("request error: {}", e),
        }

        if limit.is_some_and(|limit| sent >= limit) {
            return succeeded;
        }
        tokio::time::sleep(interval).await;
    }
}
