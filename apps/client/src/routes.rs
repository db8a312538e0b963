use crate::candidates;
use crate::relay::{self, MatchCounter, RelayError};
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    counter: Arc<dyn MatchCounter>,
    validate_results: bool,
}

impl AppState {
    pub fn new(counter: Arc<dyn MatchCounter>, validate_results: bool) -> Self {
        Self {
            counter,
            validate_results,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/_healthz", get(handle_healthz))
        .with_state(state)
}

async fn handle_root(State(state): State<AppState>) -> Result<String, RelayError> {
    let candidate = candidates::choose(&mut rand::rng());
    let count = relay::relay(state.counter.as_ref(), candidate, state.validate_results).await?;
    Ok(count.to_string())
}

async fn handle_healthz() -> &'static str {
    "ok"
}
