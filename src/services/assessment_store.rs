use crate::db::repositories::assessment_repository::{AssessmentRepository, AssessmentRow};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::assessment::{AssessmentRecord, AssessmentSummary};

/// Persistence collaborator for assessment records.
pub trait AssessmentStore: Send + Sync {
    fn insert(&self, record: &AssessmentRecord) -> AppResult<()>;

    fn find_by_id(&self, id: &str) -> AppResult<Option<AssessmentRecord>>;

    fn list_recent(&self, limit: usize) -> AppResult<Vec<AssessmentSummary>>;
}

#[derive(Clone)]
pub struct SqliteAssessmentStore {
    db: DbPool,
}

impl SqliteAssessmentStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl AssessmentStore for SqliteAssessmentStore {
    fn insert(&self, record: &AssessmentRecord) -> AppResult<()> {
        let row = AssessmentRow::from_record(record)?;
        self.db
            .with_connection(|conn| AssessmentRepository::insert(conn, &row))
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<AssessmentRecord>> {
        self.db
            .with_connection(|conn| AssessmentRepository::find_by_id(conn, id))?
            .map(AssessmentRow::into_record)
            .transpose()
    }

    fn list_recent(&self, limit: usize) -> AppResult<Vec<AssessmentSummary>> {
        self.db
            .with_connection(|conn| AssessmentRepository::list_recent(conn, limit))?
            .into_iter()
            .map(AssessmentRow::into_summary)
            .collect()
    }
}
