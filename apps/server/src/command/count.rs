use super::Command;
use crate::config::Config;
use crate::error::{Result, WrapErr};
use search_core::{CorpusSource, MatchCountService};
use std::path::PathBuf;

/// Runs one match count in process, without the RPC layer.
pub struct CountCommand {
    config: Config,
    query: String,
    corpus_dir: Option<PathBuf>,
}

impl CountCommand {
    pub fn new(cfg: Config, query: String, corpus_dir: Option<PathBuf>) -> Self {
        Self {
            config: cfg,
            query,
            corpus_dir,
        }
    }
}

#[async_trait::async_trait]
impl Command for CountCommand {
    async fn execute(&self) -> Result<()> {
        let mut search_config = self.config.search_config();
        if let Some(dir) = &self.corpus_dir {
            search_config.source = CorpusSource::Directory(dir.clone());
        }

        let service = MatchCountService::from_config(&search_config)
            .context("Create match-count service error")?;
        let count = service
            .get_match_count(&self.query)
            .await
            .with_context(|| format!("Count matches of {:?} error", self.query))?;
        service.shutdown();

        println!("{count}");
        Ok(())
    }
}
