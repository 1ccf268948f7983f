use std::net::SocketAddr;

use crate::gemini::GeminiConfig;

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BLOGIPHILIA_BIND address {value:?}: {source}")]
    Bind {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind: SocketAddr,
    pub gemini: GeminiConfig,
}

impl Config {
    /// Reads settings from the process environment. The upstream URL is
    /// optional here; a missing one only fails when a request needs it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_value =
            std::env::var("BLOGIPHILIA_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::Bind {
                value: bind_value.clone(),
                source,
            })?;

        Ok(Self {
            bind,
            gemini: GeminiConfig {
                api_url: non_empty_var("GEMINI_API_URL"),
                api_key: non_empty_var("GEMINI_API_KEY"),
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_parses() {
        let addr: SocketAddr = DEFAULT_BIND.parse().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    // Only test in the crate that touches BLOGIPHILIA_BIND.
    #[test]
    fn from_env_reads_and_rejects_bind() {
        std::env::set_var("BLOGIPHILIA_BIND", "127.0.0.1:9123");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind, "127.0.0.1:9123".parse::<SocketAddr>().unwrap());

        std::env::set_var("BLOGIPHILIA_BIND", "not-an-addr");
        let err = Config::from_env().unwrap_err();
        std::env::remove_var("BLOGIPHILIA_BIND");
        assert!(err.to_string().contains("\"not-an-addr\""));
    }
}
