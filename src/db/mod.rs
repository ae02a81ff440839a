use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

pub mod migrations;

pub mod repositories;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Shared handle to the SQLite store.
///
/// The connection is opened on first use and then shared by every clone of
/// the pool. `close` tears it down; the next call reopens it.
#[derive(Clone, Debug)]
pub struct DbPool {
    path: PathBuf,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DbPool {
    pub fn new<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        let path = path.into();
        info!(target: "app::db", db_path = %path.display(), "registering database pool");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(None)),
        })
    }

    pub fn with_connection<F, T>(&self, callback: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let mut guard = self.lock()?;
        if guard.is_none() {
            *guard = Some(open_connection(&self.path)?);
        }
        match guard.as_ref() {
            Some(conn) => callback(conn),
            None => Err(AppError::persistence("database connection unavailable")),
        }
    }

    /// Closes the shared connection if it is open. Safe to call repeatedly.
    pub fn close(&self) -> AppResult<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, err)| AppError::from(err))?;
            info!(target: "app::db", db_path = %self.path.display(), "database connection closed");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Option<Connection>>> {
        self.conn.lock().map_err(|_| {
            warn!(target: "app::db", "database mutex poisoned");
            AppError::persistence("database lock poisoned")
        })
    }
}

fn open_connection(path: &Path) -> AppResult<Connection> {
    let mut conn = Connection::open(path)?;
    configure_connection(&mut conn)?;
    conn.execute_batch(SCHEMA_SQL)?;
    migrations::run(&conn)?;
    debug!(target: "app::db", db_path = %path.display(), "database connection ready");
    Ok(conn)
}

fn configure_connection(conn: &mut Connection) -> AppResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.pragma_update(None, "foreign_keys", &1)?;
    conn.pragma_update(None, "journal_mode", &"WAL")?;
    Ok(())
}
