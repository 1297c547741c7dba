use crate::error::{CounterError, Result};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the single-row counter store
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open database connection
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CounterError::StoreDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let init_err = |source| CounterError::StoreInit {
            path: path.clone(),
            source,
        };

        let conn = Connection::open(&path).map_err(init_err)?;

        // Must come first so concurrent openers wait instead of failing
        conn.busy_timeout(BUSY_TIMEOUT).map_err(init_err)?;

        // WAL keeps readers from blocking on the writer
        let mode: String = conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(init_err)?;
        debug!(path = %path.display(), journal_mode = %mode, "Opened counter store");

        Ok(Database { conn, path })
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| CounterError::StoreInit {
            path: path.clone(),
            source,
        })?;
        Ok(Database { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the table and seed the counter row if missing.
    ///
    /// Idempotent. Returns `true` when this call seeded the row.
    pub fn ensure_schema(&self) -> Result<bool> {
        let init_err = |source| CounterError::StoreInit {
            path: self.path.clone(),
            source,
        };

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS visitors (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    count INTEGER NOT NULL DEFAULT 0 CHECK (count >= 0)
                )",
                [],
            )
            .map_err(init_err)?;

        let seeded = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO visitors (id, count) VALUES (1, 0)",
                [],
            )
            .map_err(init_err)?
            > 0;

        if seeded {
            info!("Initialized visitor counter at 0");
        }
        Ok(seeded)
    }

    /// Current count
    pub fn read_count(&self) -> Result<u64> {
        read_count(&self.conn)
    }

    /// Replace the count atomically
    pub fn write_count(&mut self, value: u64) -> Result<()> {
        self.with_transaction(|conn| write_count(conn, value))
    }

    /// Run `f` inside an IMMEDIATE transaction.
    ///
    /// The write lock is taken at BEGIN, so two read-modify-write sequences
    /// never observe the same starting value. Rolls back if `f` fails.
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

// ==================== Row Access ====================

/// Read the count through any connection or open transaction
pub fn read_count(conn: &Connection) -> Result<u64> {
    let raw: Option<i64> = conn
        .query_row("SELECT count FROM visitors WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    let raw = raw.ok_or(CounterError::MissingRecord)?;
    u64::try_from(raw).map_err(|_| CounterError::CountOutOfRange(raw.into()))
}

/// Write the count through any connection or open transaction
pub fn write_count(conn: &Connection, value: u64) -> Result<()> {
    let stored = i64::try_from(value).map_err(|_| CounterError::CountOutOfRange(value.into()))?;
    let rows = conn.execute("UPDATE visitors SET count = ?1 WHERE id = 1", [stored])?;
    if rows == 0 {
        return Err(CounterError::MissingRecord);
    }
    Ok(())
}
