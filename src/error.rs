use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in the visitor counter
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Cannot open counter store at {}: {source}", path.display())]
    StoreInit {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cannot create store directory {}: {source}", path.display())]
    StoreDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    StoreWrite(#[from] rusqlite::Error),

    #[error("Counter record is missing. Was the store modified externally?")]
    MissingRecord,

    #[error("Stored count {0} is out of range")]
    CountOutOfRange(i128),

    #[error("Counter overflow")]
    Overflow,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CounterError>;
