//! The match-count service.
//!
//! Every call validates the query, loads the whole corpus afresh and counts
//! the matching lines. Nothing is cached between calls.

use crate::config::{CorpusSource, SearchConfig};
use crate::corpus::{CorpusLoader, DirectoryLoader};
use crate::error::CorpusError;
use crate::matcher::MatchQuery;
use crate::object_store::ObjectStoreLoader;
use crate::pool::FetchPool;
use rpc::search::MatchCountError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

#[derive(Clone)]
pub struct MatchCountService {
    loader: Arc<dyn CorpusLoader>,
    pool: Option<FetchPool>,
    request_slots: Arc<Semaphore>,
}

impl MatchCountService {
    pub fn new(loader: Arc<dyn CorpusLoader>, max_concurrent_requests: usize) -> Self {
        Self {
            loader,
            pool: None,
            request_slots: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }

    /// Builds the fetch pool and the loader named by `config.source`.
    pub fn from_config(config: &SearchConfig) -> Result<Self, CorpusError> {
        let pool = FetchPool::new(config.fetch_workers);
        let loader: Arc<dyn CorpusLoader> = match &config.source {
            CorpusSource::ObjectStore(store) => {
                Arc::new(ObjectStoreLoader::new(store.clone(), pool.clone())?)
            }
            CorpusSource::Directory(dir) => Arc::new(DirectoryLoader::new(dir, pool.clone())),
        };

        let mut service = Self::new(loader, config.max_concurrent_requests);
        service.pool = Some(pool);
        Ok(service)
    }

    pub async fn get_match_count(&self, query: &str) -> Result<u64, MatchCountError> {
        info!("received query: {:?}", query);

        let query = MatchQuery::new(query).inspect_err(|e| warn!("rejected query: {}", e))?;

        let _slot = self
            .request_slots
            .acquire()
            .await
            .map_err(|e| MatchCountError::Internal {
                reason: e.to_string(),
            })?;

        let corpus = self
            .loader
            .load_corpus()
            .await
            .inspect_err(|e| warn!("failed to load corpus: {}", e))?;

        let documents = corpus.len();
        let count = tokio::task::spawn_blocking(move || query.count_corpus(&corpus))
            .await
            .map_err(|e| MatchCountError::Internal {
                reason: e.to_string(),
            })?;

        info!("match count {} across {} documents", count, documents);
        Ok(count)
    }

    /// Closes the fetch pool. Calls made afterwards fail with `CorpusUnavailable`.
    pub fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Document, StaticLoader};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_corpus() -> Vec<Document> {
        vec![
            Document::new(
                "hamlet.txt",
                "HAMLET\tTo be, or not to be: that is the question:\n\
                 HAMLET\tThe insolence of office and the spurns\n\
                 OPHELIA\tGood my lord,",
            ),
            Document::new(
                "tempest.txt",
                "MIRANDA\tO brave new world,\n\
                 MIRANDA\tThat has such people in't!\n\
                 PROSPERO\t'Tis new to thee. Hello, World",
            ),
        ]
    }

    fn sample_service() -> MatchCountService {
        MatchCountService::new(Arc::new(StaticLoader::new(sample_corpus())), 4)
    }

    struct FailingLoader;

    #[async_trait]
    impl CorpusLoader for FailingLoader {
        async fn load_corpus(&self) -> crate::error::Result<Vec<Document>> {
            Err(CorpusError::Status {
                url: "https://storage.googleapis.com/dataflow-samples/shakespeare/hamlet.txt"
                    .to_string(),
                status: 503,
            })
        }
    }

    /// Counts loads, so tests can tell whether the corpus was fetched
    #[derive(Default)]
    struct CountingLoader {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl CorpusLoader for CountingLoader {
        async fn load_corpus(&self) -> crate::error::Result<Vec<Document>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(sample_corpus())
        }
    }

    #[rstest]
    #[case("world", 2)]
    #[case("WORLD", 2)]
    #[case("World", 2)]
    #[case("hello", 1)]
    #[case("to be, or not to be", 1)]
    #[case("insolence", 1)]
    #[case("hamlet", 2)]
    #[case("rosencrantz", 0)]
    #[tokio::test]
    async fn test_match_count(#[case] query: &str, #[case] expected: u64) {
        assert_eq!(sample_service().get_match_count(query).await, Ok(expected));
    }

    #[tokio::test]
    async fn test_repeated_calls_agree() {
        let service = sample_service();
        let first = service.get_match_count("new").await.unwrap();
        for _ in 0..3 {
            assert_eq!(service.get_match_count("new").await.unwrap(), first);
        }
        assert_eq!(first, 2);
    }

    #[tokio::test]
    async fn test_corpus_fetched_per_call() {
        let loader = Arc::new(CountingLoader::default());
        let service = MatchCountService::new(loader.clone(), 4);

        service.get_match_count("world").await.unwrap();
        service.get_match_count("world").await.unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[case("")]
    #[case("(to be")]
    #[case("x*")]
    #[tokio::test]
    async fn test_invalid_query_skips_fetch(#[case] query: &str) {
        let loader = Arc::new(CountingLoader::default());
        let service = MatchCountService::new(loader.clone(), 4);

        let err = service.get_match_count(query).await.unwrap_err();
        assert!(matches!(err, MatchCountError::InvalidQuery { .. }));
        assert_eq!(loader.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_loader_failure_is_not_a_count() {
        let service = MatchCountService::new(Arc::new(FailingLoader), 4);

        let err = service.get_match_count("hello").await.unwrap_err();
        match err {
            MatchCountError::CorpusUnavailable { reason } => assert!(reason.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_calls() {
        let service = sample_service();
        let calls = (0..16).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.get_match_count("world").await })
        });

        for result in futures::future::join_all(calls).await {
            assert_eq!(result.unwrap(), Ok(2));
        }
    }

    #[tokio::test]
    async fn test_from_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        for doc in sample_corpus() {
            std::fs::write(dir.path().join(&doc.name), &doc.text).unwrap();
        }
        let config = SearchConfig {
            source: CorpusSource::Directory(dir.path().to_path_buf()),
            ..Default::default()
        };

        let service = MatchCountService::from_config(&config).unwrap();
        assert_eq!(service.get_match_count("good my lord").await, Ok(1));

        service.shutdown();
        let err = service.get_match_count("good my lord").await.unwrap_err();
        assert!(matches!(err, MatchCountError::CorpusUnavailable { .. }));
    }
}
