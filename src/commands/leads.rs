use tauri::State;

use crate::models::lead::{
    ConsultationRequestInput, ContactRequestInput, LeadKind, LeadReceipt, LeadRecord,
    NewsletterSignupInput,
};

use super::{run_blocking, AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn newsletter_subscribe(
    state: State<'_, AppState>,
    input: NewsletterSignupInput,
) -> CommandResult<LeadReceipt> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.leads().subscribe_newsletter(input)).await
}

#[tauri::command]
pub async fn contact_submit(
    state: State<'_, AppState>,
    input: ContactRequestInput,
) -> CommandResult<LeadReceipt> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.leads().submit_contact(input)).await
}

#[tauri::command]
pub async fn consultation_book(
    state: State<'_, AppState>,
    input: ConsultationRequestInput,
) -> CommandResult<LeadReceipt> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.leads().book_consultation(input)).await
}

/// List captured leads of one kind, newest first.
#[tauri::command]
pub async fn leads_list(
    state: State<'_, AppState>,
    kind: String,
    limit: Option<usize>,
) -> CommandResult<Vec<LeadRecord>> {
    let kind: LeadKind = kind
        .parse()
        .map_err(|e: String| CommandError::new("VALIDATION_ERROR", e, None))?;

    let app_state = state.inner().clone();
    run_blocking(move || app_state.leads().list_leads(kind, limit)).await
}
