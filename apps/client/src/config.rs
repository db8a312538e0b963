use config::constants;
use std::net::{Ipv4Addr, SocketAddr};

/// Relay configuration, read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address of the match-count service
    pub server_addr: String,
    pub port: u16,
    /// Compare every count with the expected value of its query
    pub validate_results: bool,
}

impl Config {
    pub fn from_env() -> config::Result<Config> {
        Self::from_lookup(config::env_var)
    }

    fn from_lookup<F>(lookup: F) -> config::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = config::required("SERVER_ADDR", lookup("SERVER_ADDR"))?;
        let port = match lookup("PORT") {
            Some(raw) => config::parse_value("PORT", &raw)?,
            None => constants::DEFAULT_CLIENT_PORT,
        };
        let validate_results = lookup("VALIDATE_RESULTS")
            .map(|raw| config::parse_flag(&raw))
            .unwrap_or(false);

        Ok(Config {
            server_addr,
            port,
            validate_results,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ConfigError;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> config::Result<Config> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_server_addr_is_required() {
        let err = from_pairs(&[("PORT", "9000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref key } if key == "SERVER_ADDR"));
    }

    #[test]
    fn test_defaults() {
        let cfg = from_pairs(&[("SERVER_ADDR", "serverservice:5050")]).unwrap();
        assert_eq!(cfg.server_addr, "serverservice:5050");
        assert_eq!(cfg.port, 8080);
        assert!(!cfg.validate_results);
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let cfg = from_pairs(&[
            ("SERVER_ADDR", "127.0.0.1:5050"),
            ("PORT", "9090"),
            ("VALIDATE_RESULTS", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9090);
        assert!(cfg.validate_results);
    }
}
