use config::constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `host:port` of the front-end
    pub client_addr: String,
}

impl Config {
    pub fn from_env() -> Config {
        Self::from_lookup(config::env_var)
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            client_addr: lookup("CLIENT_ADDR")
                .unwrap_or_else(|| constants::DEFAULT_CLIENT_ADDR.to_string()),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.client_addr)
    }
}
