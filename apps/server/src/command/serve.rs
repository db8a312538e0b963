use super::Command;
use crate::config::Config;
use crate::error::{Error, Result, WrapErr};
use futures::{future, prelude::*};
use tracing::info;

use rpc::{
    Shakespeare, ShakespeareRequest, ShakespeareResponse,
    health::{HealthCheckResponse, HealthError},
    search::{MatchCountError, MatchCountResponse},
};
use search_core::{HealthReporter, MatchCountService};
use tarpc::{
    ClientMessage, Response, Transport,
    context::Context,
    server::{self, Channel},
    tokio_serde::formats::Bincode,
};

async fn spawn(fut: impl Future<Output = ()> + Send + 'static) {
    tokio::spawn(fut);
}

#[derive(Clone)]
struct Server {
    service: MatchCountService,
    health: HealthReporter,
}

impl Shakespeare for Server {
    async fn ping(self, _c: Context) -> String {
        "Pong".to_string()
    }

    async fn get_match_count(
        self,
        _c: Context,
        query: String,
    ) -> Result<MatchCountResponse, MatchCountError> {
        let match_count = self.service.get_match_count(&query).await?;
        Ok(MatchCountResponse { match_count })
    }

    async fn check(self, _c: Context, service: String) -> HealthCheckResponse {
        self.health.check(&service)
    }

    async fn watch(
        self,
        _c: Context,
        service: String,
    ) -> Result<HealthCheckResponse, HealthError> {
        self.health.watch(&service)
    }
}

/// Accepts connections from `listener` until `shutdown` resolves.
///
/// Reports `Serving` while accepting. Once the loop stops the status turns
/// `NotServing` and the fetch pool is closed, whatever `shutdown` returned.
async fn serve_on<L, T, F>(listener: L, server: Server, shutdown: F) -> Result<()>
where
    L: Stream<Item = std::io::Result<T>> + Send,
    T: Transport<Response<ShakespeareResponse>, ClientMessage<ShakespeareRequest>>
        + Send
        + 'static,
    F: Future<Output = Result<()>> + Send,
{
    let health = server.health.clone();
    let service = server.service.clone();
    health.set_serving();

    let serving = listener
        .filter_map(|r| future::ready(r.ok()))
        .map(server::BaseChannel::with_defaults)
        .map(|channel| {
            let server = server.clone();
            channel.execute(server.serve()).for_each(spawn)
        })
        .buffer_unordered(10)
        .for_each(|_| async {});

    let stopped = tokio::select! {
        _ = serving => Ok(()),
        result = shutdown => result,
    };

    health.set_not_serving();
    service.shutdown();
    info!("server stopped");

    stopped
}

pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    pub fn new(cfg: Config) -> Self {
        Self { config: cfg }
    }
}

#[async_trait::async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        let service = MatchCountService::from_config(&self.config.search_config())
            .context("Create match-count service error")?;

        let addr = self.config.listen_addr();
        let mut listener = tarpc::serde_transport::tcp::listen(&addr, Bincode::default)
            .await
            .with_context(|| format!("Listen on {addr} error"))?;
        listener.config_mut().max_frame_length(usize::MAX);

        info!("listening on {}", listener.local_addr());
        info!(
            "fetch workers: {}, max concurrent requests: {}",
            self.config.fetch_workers, self.config.max_concurrent_requests
        );

        let server = Server {
            service,
            health: HealthReporter::new(),
        };
        let shutdown = async {
            tokio::signal::ctrl_c()
                .await
                .context("Wait for shutdown signal error")?;
            info!("shutdown signal received");
            Ok::<_, Error>(())
        };

        serve_on(listener, server, shutdown).await
    }
}
