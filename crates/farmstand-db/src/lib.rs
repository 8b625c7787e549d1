pub mod config;
pub mod models;
pub mod queries;
pub mod regexp;
pub mod schema;

#[cfg(test)]
mod test_utils;

use anyhow::Result;
use rusqlite::Connection;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use config::DbConfig;

/// How long a session waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the marketplace database. Holds only configuration; every
/// request opens its own [`Session`].
#[derive(Debug, Clone)]
pub struct Database {
    config: DbConfig,
}

impl Database {
    /// Validate the configuration and bootstrap the schema.
    pub fn new(config: DbConfig) -> Result<Self> {
        config.validate()?;

        let conn = Connection::open(&config.path)?;

        // WAL mode so readers don't block the writer across sessions
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        schema::run(&conn)?;

        info!("Database ready at {} (journal_mode={})", config.path.display(), mode);
        Ok(Self { config })
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Open a connection scoped to the caller (usually one HTTP request).
    pub fn session(&self) -> Result<Session> {
        Session::open(&self.config)
    }

    /// Run `f` against a fresh session and release it afterwards, whether
    /// `f` succeeded or not. A failure to close is logged, not returned:
    /// by then every statement `f` ran has already committed.
    pub fn with_session<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        let mut session = self.session()?;
        let result = f(&mut session);

        if let Err(e) = session.close() {
            warn!("Failed to close database session: {:#}", e);
        }

        result
    }
}

/// One open connection. Statements run in autocommit mode, so each
/// mutating call is committed as soon as it returns.
#[derive(Debug)]
pub struct Session {
    pub(crate) conn: Connection,
}

impl Session {
    fn open(config: &DbConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        regexp::register(&conn)?;

        debug!("Opened session on {}", config.path.display());
        Ok(Self { conn })
    }

    /// Release the connection. Dropping a session releases it too; this
    /// variant reports the error SQLite gives back on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_conn, e)| e)?;
        debug!("Closed session");
        Ok(())
    }
}
