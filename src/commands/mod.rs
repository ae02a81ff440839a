pub mod assessment;
pub mod leads;
pub mod roi;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tauri::async_runtime;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::assessment_service::AssessmentService;
use crate::services::lead_service::LeadService;

const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
const PERSISTENCE_MESSAGE: &str = "We couldn't save your submission. Please try again later.";

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    assessment_service: Arc<AssessmentService>,
    lead_service: Arc<LeadService>,
}

impl AppState {
    pub fn new(db_pool: DbPool, config: AppConfig) -> AppResult<Self> {
        let assessment_service = Arc::new(AssessmentService::new(db_pool.clone(), config.clone()));
        let lead_service = Arc::new(LeadService::new(db_pool.clone(), config));

        Ok(Self {
            db_pool,
            assessment_service,
            lead_service,
        })
    }

    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment_service)
    }

    pub fn leads(&self) -> Arc<LeadService> {
        Arc::clone(&self.lead_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }

    /// Releases the shared database connection. Called once on process exit.
    pub fn shutdown(&self) {
        match self.db_pool.close() {
            Ok(()) => info!(target: "app::command", "application state shut down"),
            Err(err) => error!(target: "app::command", error = %err, "failed to close database"),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    pub fn internal() -> Self {
        CommandError::new("INTERNAL_ERROR", GENERIC_INTERNAL_MESSAGE, None)
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "The requested record does not exist", None)
            }
            AppError::Conflict { message } => {
                warn!(target: "app::command", %message, "conflict in command");
                CommandError::new("CONFLICT", message, None)
            }
            AppError::Persistence { message } => {
                error!(target: "app::command", %message, "persistence error in command");
                CommandError::new("INTERNAL_ERROR", PERSISTENCE_MESSAGE, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::internal()
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::internal()
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::internal()
            }
        }
    }
}

/// Runs a blocking service call off the async runtime.
pub async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| {
            error!(target: "app::command", error = %err, "blocking task failed");
            CommandError::internal()
        })?
        .map_err(CommandError::from)
}
