use crate::db::{self, Database};
use crate::error::{CounterError, Result};
use std::path::Path;
use tracing::debug;

/// Counter operations over an explicitly owned store handle
pub struct VisitorCounter {
    db: Database,
}

impl VisitorCounter {
    /// Wrap an already opened store. The schema must exist.
    pub fn new(db: Database) -> Self {
        VisitorCounter { db }
    }

    /// Open the store at `path` and make sure the counter row exists
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::open(path)?;
        db.ensure_schema()?;
        Ok(VisitorCounter { db })
    }

    /// Read the count without changing it
    pub fn current(&self) -> Result<u64> {
        self.db.read_count()
    }

    /// Add one visit and return the new total.
    ///
    /// Read, add and write happen in one transaction, so concurrent callers
    /// on any connection to the same file never lose an update.
    pub fn increment(&mut self) -> Result<u64> {
        let count = self.db.with_transaction(|conn| {
            let next = db::read_count(conn)?
                .checked_add(1)
                .ok_or(CounterError::Overflow)?;
            db::write_count(conn, next)?;
            Ok(next)
        })?;
        debug!(count, "Visitor count incremented");
        Ok(count)
    }

    /// Set the count back to zero
    pub fn reset(&mut self) -> Result<u64> {
        self.db.write_count(0)?;
        Ok(0)
    }
}
