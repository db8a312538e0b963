use crate::error::Result;
use config::constants;
use search_core::{CorpusSource, ObjectStoreConfig, SearchConfig};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

/// Server configuration, built once at startup.
///
/// Sources, later ones win: built-in defaults, `server.toml` in the config
/// directory, environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// `[::]` by default, which also accepts IPv4 on dual-stack hosts
    pub listen_host: IpAddr,
    pub port: u16,
    pub bucket: String,
    pub prefix: String,
    pub storage_endpoint: String,
    /// Read the corpus from a local directory instead of the bucket
    pub corpus_dir: Option<PathBuf>,
    pub fetch_workers: usize,
    pub max_concurrent_requests: usize,
}

impl Default for Config {
    fn default() -> Self {
        let store = ObjectStoreConfig::default();
        Config {
            listen_host: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: constants::DEFAULT_SERVER_PORT,
            bucket: store.bucket,
            prefix: store.prefix,
            storage_endpoint: store.endpoint,
            corpus_dir: None,
            fetch_workers: constants::DEFAULT_FETCH_WORKERS,
            max_concurrent_requests: constants::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    pub fn load() -> Result<Config> {
        let config_path = config::config_dir().join(constants::SERVER_CONFIG_FILE_NAME);

        let file_config = match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => {
                tracing::info!("loading {:?}", config_path);
                Self::load_str(&user_config_str)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::load_str("")?,
            Err(e) => return Err(e.into()),
        };

        file_config.with_overrides(config::env_var)
    }

    /// Applies `PORT`, `CORPUS_BUCKET`, `CORPUS_PREFIX`, `CORPUS_ENDPOINT`,
    /// `CORPUS_DIR`, `FETCH_WORKERS` and `MAX_CONCURRENT_REQUESTS`.
    fn with_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PORT") {
            self.port = config::parse_value("PORT", &raw)?;
        }
        if let Some(bucket) = lookup("CORPUS_BUCKET") {
            self.bucket = bucket;
        }
        if let Some(prefix) = lookup("CORPUS_PREFIX") {
            self.prefix = prefix;
        }
        if let Some(endpoint) = lookup("CORPUS_ENDPOINT") {
            self.storage_endpoint = endpoint;
        }
        if let Some(dir) = lookup("CORPUS_DIR") {
            self.corpus_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup("FETCH_WORKERS") {
            self.fetch_workers = config::parse_value("FETCH_WORKERS", &raw)?;
        }
        if let Some(raw) = lookup("MAX_CONCURRENT_REQUESTS") {
            self.max_concurrent_requests = config::parse_value("MAX_CONCURRENT_REQUESTS", &raw)?;
        }
        Ok(self)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_host, self.port)
    }

    pub fn search_config(&self) -> SearchConfig {
        let source = match &self.corpus_dir {
            Some(dir) => CorpusSource::Directory(dir.clone()),
            None => CorpusSource::ObjectStore(ObjectStoreConfig {
                bucket: self.bucket.clone(),
                prefix: self.prefix.clone(),
                endpoint: self.storage_endpoint.clone(),
            }),
        };

        SearchConfig {
            source,
            fetch_workers: self.fetch_workers,
            max_concurrent_requests: self.max_concurrent_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = Config::load_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.listen_addr().to_string(), "[::]:5050");
        assert_eq!(cfg.search_config(), SearchConfig::default());
    }

    #[test]
    fn test_file_keys_are_kebab_case() {
        let cfg = Config::load_str(
            r#"
listen-host = "127.0.0.1"
port = 6000
corpus-dir = "/srv/corpus"
fetch-workers = 2
"#,
        )
        .unwrap();
        assert_eq!(cfg.listen_addr().to_string(), "127.0.0.1:6000");
        assert_eq!(cfg.fetch_workers, 2);
        assert_eq!(
            cfg.search_config().source,
            CorpusSource::Directory(PathBuf::from("/srv/corpus"))
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::load_str("watch-paths = []").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = Config::default()
            .with_overrides(lookup_from(&[
                ("PORT", "7070"),
                ("CORPUS_BUCKET", "my-bucket"),
                ("MAX_CONCURRENT_REQUESTS", "16"),
            ]))
            .unwrap();

        assert_eq!(cfg.port, 7070);
        assert_eq!(cfg.max_concurrent_requests, 16);
        match cfg.search_config().source {
            CorpusSource::ObjectStore(store) => {
                assert_eq!(store.bucket, "my-bucket");
                assert_eq!(store.prefix, "shakespeare/");
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
