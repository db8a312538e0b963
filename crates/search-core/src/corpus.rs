//! Corpus documents and the loaders that produce them.

use crate::error::{CorpusError, Result};
use crate::pool::FetchPool;
use async_trait::async_trait;
use std::path::PathBuf;

/// One text blob of the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Decodes raw bytes, replacing invalid UTF-8 sequences.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(name, String::from_utf8_lossy(bytes))
    }
}

/// Source of the full corpus.
///
/// A load either returns every document or fails. There is no partial corpus.
#[async_trait]
pub trait CorpusLoader: Send + Sync {
    async fn load_corpus(&self) -> Result<Vec<Document>>;
}

/// A corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    documents: Vec<Document>,
}

impl StaticLoader {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl CorpusLoader for StaticLoader {
    async fn load_corpus(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

/// Reads every regular file of a directory, in file name order.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    pool: FetchPool,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>, pool: FetchPool) -> Self {
        Self {
            root: root.into(),
            pool,
        }
    }

    async fn list_files(&self) -> Result<Vec<PathBuf>> {
        let io_err = |source| CorpusError::Io {
            path: self.root.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(io_err)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            if entry.file_type().await.map_err(io_err)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl CorpusLoader for DirectoryLoader {
    async fn load_corpus(&self) -> Result<Vec<Document>> {
        let files = self.list_files().await?;
        tracing::debug!("reading {} files from {:?}", files.len(), self.root);

        self.pool
            .run_all(files.into_iter().map(|path| async move {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| CorpusError::Io {
                        path: path.clone(),
                        source,
                    })?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(Document::from_bytes(name, &bytes))
            }))
            .await
    }
}
