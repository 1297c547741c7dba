use crate::config::{DEFAULT_DB_PATH, LogFormat, LoggingConfig};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "visitor-counter")]
#[command(about = "Persistent visitor counter web service")]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite counter store
    #[arg(long, global = true, env = "COUNTER_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the UI and the counter API
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },

    /// Print the current count without recording a visit
    Count,

    /// Set the count back to zero
    Reset,
}
