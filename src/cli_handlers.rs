use crate::config::ServerConfig;
use crate::core::VisitorCounter;
use crate::error::Result;
use crate::server::run_server;
use std::path::Path;
use tracing::warn;

/// Handle the serve command
pub async fn handle_serve(config: ServerConfig) -> Result<()> {
    run_server(&config).await
}

/// Handle the count command
pub fn handle_count(db: &Path) -> Result<()> {
    let counter = VisitorCounter::open_at(db)?;
    println!("{}", counter.current()?);
    Ok(())
}

/// Handle the reset command
pub fn handle_reset(db: &Path) -> Result<()> {
    let mut counter = VisitorCounter::open_at(db)?;
    let count = counter.reset()?;
    warn!(db = %db.display(), "Visitor counter reset from command line");
    println!("{count}");
    Ok(())
}
