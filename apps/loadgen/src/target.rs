use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// The front-end under load
#[async_trait]
pub trait Target: Send + Sync {
    /// Body of `GET /_healthz`
    async fn healthz(&self) -> Result<String, TransportError>;

    /// Body of `GET /`
    async fn call(&self) -> Result<String, TransportError>;
}

pub struct HttpTarget {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTarget {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_text(&self, url: String) -> Result<String, TransportError> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Target for HttpTarget {
    async fn healthz(&self) -> Result<String, TransportError> {
        self.get_text(format!("{}/_healthz", self.base_url)).await
    }

    async fn call(&self) -> Result<String, TransportError> {
        self.get_text(format!("{}/", self.base_url)).await
    }
}
