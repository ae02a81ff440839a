use tauri::State;

use crate::models::assessment::{
    AssessmentRecord, AssessmentSubmissionRequest, AssessmentSubmissionResponse,
    AssessmentSummary,
};

use super::{run_blocking, AppState, CommandResult};

/// Validate, score and store an AI-readiness assessment.
#[tauri::command]
pub async fn assessment_submit(
    state: State<'_, AppState>,
    request: AssessmentSubmissionRequest,
) -> CommandResult<AssessmentSubmissionResponse> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.assessments().submit(request)).await
}

#[tauri::command]
pub async fn assessment_get(
    state: State<'_, AppState>,
    id: String,
) -> CommandResult<AssessmentRecord> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.assessments().get_assessment(&id)).await
}

#[tauri::command]
pub async fn assessment_list_recent(
    state: State<'_, AppState>,
    limit: Option<usize>,
) -> CommandResult<Vec<AssessmentSummary>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.assessments().list_recent(limit)).await
}
