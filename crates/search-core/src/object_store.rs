//! Corpus loader backed by a Google Cloud Storage bucket.
//!
//! Objects are listed through the JSON API and downloaded through the public
//! media endpoint, e.g.
//! - `GET {endpoint}/storage/v1/b/{bucket}/o?prefix={prefix}`
//! - `GET {endpoint}/{bucket}/{object name}`

use crate::corpus::{CorpusLoader, Document};
use crate::error::{CorpusError, Result};
use crate::pool::FetchPool;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectStoreConfig {
    pub bucket: String,
    pub prefix: String,
    pub endpoint: String,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            bucket: config::constants::DEFAULT_BUCKET.to_string(),
            prefix: config::constants::DEFAULT_PREFIX.to_string(),
            endpoint: config::constants::DEFAULT_STORAGE_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectMeta>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
}

pub struct ObjectStoreLoader {
    client: Client,
    endpoint: Url,
    config: ObjectStoreConfig,
    pool: FetchPool,
}

impl ObjectStoreLoader {
    pub fn new(config: ObjectStoreConfig, pool: FetchPool) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| CorpusError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(CorpusError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: "not a base url".to_string(),
            });
        }

        Ok(Self {
            client: Client::new(),
            endpoint,
            config,
            pool,
        })
    }

    fn url_with_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.endpoint.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn list_url(&self) -> Url {
        self.url_with_segments(["storage", "v1", "b", self.config.bucket.as_str(), "o"])
    }

    fn object_url(&self, name: &str) -> Url {
        self.url_with_segments(std::iter::once(self.config.bucket.as_str()).chain(name.split('/')))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CorpusError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Names of every object under the prefix, following pagination.
    async fn list_objects(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.list_url();
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("prefix", &self.config.prefix);
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let page: ObjectList = self.get(url).await?.json().await?;
            names.extend(
                page.items
                    .into_iter()
                    .map(|item| item.name)
                    .filter(|name| !name.ends_with('/')),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(names)
    }

    async fn download(&self, name: String) -> Result<Document> {
        let bytes = self.get(self.object_url(&name)).await?.bytes().await?;
        tracing::debug!("downloaded {} ({} bytes)", name, bytes.len());
        Ok(Document::from_bytes(name, &bytes))
    }
}

#[async_trait]
impl CorpusLoader for ObjectStoreLoader {
    async fn load_corpus(&self) -> Result<Vec<Document>> {
        let names = self.list_objects().await?;
        tracing::debug!(
            "fetching {} objects from gs://{}/{}",
            names.len(),
            self.config.bucket,
            self.config.prefix
        );

        self.pool
            .run_all(names.into_iter().map(|name| self.download(name)))
            .await
    }
}
