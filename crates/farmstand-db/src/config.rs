use anyhow::{Result, bail};
use std::path::PathBuf;

/// Environment variable naming the SQLite database file.
pub const DATABASE_PATH_VAR: &str = "FARMSTAND_DATABASE_PATH";

const DEFAULT_DATABASE_PATH: &str = "farmstand.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the database location from `FARMSTAND_DATABASE_PATH`, falling
    /// back to `farmstand.db` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(DATABASE_PATH_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.into());
        Self::new(path)
    }

    /// Every session opens its own connection, so the database has to live
    /// somewhere all of them can reach.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            bail!("database path is empty");
        }
        if self.path.as_os_str() == ":memory:" {
            bail!("in-memory databases are not shared between sessions; use a file path");
        }
        Ok(())
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}
