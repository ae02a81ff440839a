use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{AppError, AppResult};

pub const ENV_DATA_DIR: &str = "AIMATURITY_DATA_DIR";
pub const ENV_DB_FILE: &str = "AIMATURITY_DB_FILE";
pub const ENV_LOG_DIRECTIVES: &str = "AIMATURITY_LOG_DIRECTIVES";
pub const ENV_RECENT_LIMIT: &str = "AIMATURITY_RECENT_LIMIT";

const DEFAULT_DB_FILE: &str = "aimaturity.sqlite";
const DEFAULT_LOG_DIRECTIVES: &str = "info,app::assessment=debug,app::leads=debug,app::db=info";
const DEFAULT_RECENT_LIMIT: usize = 20;

/// Upper bound for any listing request, configured or per call.
pub const MAX_LIST_LIMIT: usize = 100;

/// Runtime configuration. Every field has a default; environment variables
/// override them when the host process starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the platform app-data directory when set.
    pub data_dir: Option<PathBuf>,
    pub database_file: String,
    pub log_directives: String,
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: DEFAULT_DB_FILE.to_string(),
            log_directives: DEFAULT_LOG_DIRECTIVES.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = non_blank(lookup(ENV_DATA_DIR)) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(file) = non_blank(lookup(ENV_DB_FILE)) {
            if file.contains('/') || file.contains('\\') {
                return Err(AppError::invalid_field(
                    ENV_DB_FILE,
                    format!("{ENV_DB_FILE} must be a file name, not a path"),
                ));
            }
            config.database_file = file;
        }

        if let Some(directives) = non_blank(lookup(ENV_LOG_DIRECTIVES)) {
            config.log_directives = directives;
        }

        if let Some(raw) = non_blank(lookup(ENV_RECENT_LIMIT)) {
            let limit = raw.parse::<usize>().map_err(|_| {
                AppError::invalid_field(
                    ENV_RECENT_LIMIT,
                    format!("{ENV_RECENT_LIMIT} must be a positive integer, got {raw:?}"),
                )
            })?;
            if limit == 0 || limit > MAX_LIST_LIMIT {
                return Err(AppError::invalid_field(
                    ENV_RECENT_LIMIT,
                    format!("{ENV_RECENT_LIMIT} must be between 1 and {MAX_LIST_LIMIT}"),
                ));
            }
            config.recent_limit = limit;
        }

        debug!(target: "app::config", ?config, "configuration resolved");
        Ok(config)
    }

    /// Resolves a caller-supplied listing limit against the configured default.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|value| *value > 0)
            .unwrap_or(self.recent_limit)
            .min(MAX_LIST_LIMIT)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
