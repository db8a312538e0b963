//! 配置模块

use crate::object_store::ObjectStoreConfig;
use config::constants;
use std::path::PathBuf;

/// Where the corpus comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    ObjectStore(ObjectStoreConfig),
    Directory(PathBuf),
}

impl Default for CorpusSource {
    fn default() -> Self {
        CorpusSource::ObjectStore(ObjectStoreConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub source: CorpusSource,
    /// Size of the shared fetch pool
    pub fetch_workers: usize,
    /// Calls served at once, the rest wait
    pub max_concurrent_requests: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: CorpusSource::default(),
            fetch_workers: constants::DEFAULT_FETCH_WORKERS,
            max_concurrent_requests: constants::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}
