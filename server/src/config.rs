//! Process configuration read from environment variables.
//!
//! | Variable                   | Default       |
//! |----------------------------|---------------|
//! | `HOST`                     | `0.0.0.0`     |
//! | `PORT`                     | `3000`        |
//! | `DATABASE_PATH`            | `./db.sqlite` |
//! | `DATABASE_MAX_CONNECTIONS` | `5`           |
//! | `TODO_FAIL_FAST`           | `false`       |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use todo_core::StoreConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
    /// Exit at startup if the database cannot be reached instead of
    /// serving and answering 500 until it comes back.
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            store: StoreConfig::default(),
            fail_fast: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables
    /// fall back to their defaults; set but unparsable ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup("HOST") {
            config.host = value.parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value,
                expected: "an IP address",
            })?;
        }
        if let Some(value) = lookup("PORT") {
            config.port = value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
                expected: "a port number",
            })?;
        }
        if let Some(value) = lookup("DATABASE_PATH") {
            config.store.path = PathBuf::from(value);
        }
        if let Some(value) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.store.max_connections = match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                        expected: "a positive integer",
                    })
                }
            };
        }
        if let Some(value) = lookup("TODO_FAIL_FAST") {
            config.fail_fast = parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "TODO_FAIL_FAST",
                value,
                expected: "true, false, 1 or 0",
            })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.store.path, PathBuf::from("./db.sqlite"));
        assert!(!config.fail_fast);
    }

    #[test]
    fn reads_every_variable() {
        let config = from_vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_PATH", "/tmp/todos.sqlite"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("TODO_FAIL_FAST", "TRUE"),
        ])
        .unwrap();
        assert_eq!(config.store.max_connections, 2);
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.store.path, PathBuf::from("/tmp/todos.sqlite"));
        assert!(config.fail_fast);
    }

    #[test]
    fn rejects_bad_port() {
        let err = from_vars(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn rejects_zero_connections() {
        let err = from_vars(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_fail_fast_flag() {
        let err = from_vars(&[("TODO_FAIL_FAST", "maybe")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"TODO_FAIL_FAST has invalid value "maybe": expected true, false, 1 or 0"#
        );
    }
}
