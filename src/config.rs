//! Runtime configuration: listen address and logging.

use clap::ValueEnum;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

/// Default location of the counter store
pub const DEFAULT_DB_PATH: &str = "counter.db";

/// Where the HTTP service listens and which store it uses
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. `RUST_LOG` wins over `level`.
    ///
    /// Logs go to stderr so command output on stdout stays clean.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format {
            LogFormat::Json => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init(),
            LogFormat::Pretty => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.db_path, PathBuf::from("counter.db"));
    }

    #[test]
    fn test_custom_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }
}
