// search-core/src/lib.rs
//! Match-count core library
//!
//! Counts the corpus lines matching a query:
//! - corpus loading from object storage or a local directory
//! - a long-lived bounded fetch pool shared by all loads
//! - case-insensitive regex line matching
//! - the serving status reported by health checks

pub mod config;
pub mod corpus;
pub mod error;
pub mod health;
pub mod matcher;
pub mod object_store;
pub mod pool;
pub mod service;

pub use self::config::{CorpusSource, SearchConfig};
pub use corpus::{CorpusLoader, DirectoryLoader, Document, StaticLoader};
pub use error::{CorpusError, QueryError};
pub use health::HealthReporter;
pub use matcher::MatchQuery;
pub use object_store::{ObjectStoreConfig, ObjectStoreLoader};
pub use pool::FetchPool;
pub use service::MatchCountService;
