use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// HTTP listener settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long shutdown cleanup (closing the database pool) may take
    pub shutdown_timeout_secs: u64,
    /// Origins allowed by CORS; empty means "not configured"
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - SHUTDOWN_TIMEOUT_SECS: defaults to 30
    /// - CORS_ALLOWED_ORIGIN: comma-separated, optional
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse("PORT", "8080")?;
        let shutdown_timeout_secs = env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?;
        let cors_allowed_origins = parse_origins(&env_or_default("CORS_ALLOWED_ORIGIN", ""));

        Ok(Self {
            host,
            port,
            shutdown_timeout_secs,
            cors_allowed_origins,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            shutdown_timeout_secs: 30,
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("HOST", None::<&str>),
                ("PORT", None),
                ("SHUTDOWN_TIMEOUT_SECS", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "0.0.0.0:8080");
                assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
                assert!(config.cors_allowed_origins.is_empty());
            },
        );
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("4000")),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:5173, https://shop.example.com")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:4000");
                assert_eq!(
                    config.cors_allowed_origins,
                    vec!["http://localhost:5173", "https://shop.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_var("PORT", Some("99999"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_new_keeps_defaults() {
        let config = ServerConfig::new("localhost".to_string(), 3000);
        assert_eq!(config.address(), "localhost:3000");
        assert_eq!(config.shutdown_timeout_secs, 30);
    }
}
