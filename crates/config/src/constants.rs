pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "shakesapp";
pub const APP_NAME: &str = "shakesapp";

pub const SERVER_CONFIG_FILE_NAME: &str = "server.toml";

/// Name under which the match-count service answers health checks
pub const SERVICE_NAME: &str = "shakesapp.ShakespeareService";

pub const DEFAULT_SERVER_PORT: u16 = 5050;
pub const DEFAULT_CLIENT_PORT: u16 = 8080;
pub const DEFAULT_CLIENT_ADDR: &str = "0.0.0.0:8080";

pub const DEFAULT_BUCKET: &str = "dataflow-samples";
pub const DEFAULT_PREFIX: &str = "shakespeare/";
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

pub const DEFAULT_FETCH_WORKERS: usize = 8;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;
