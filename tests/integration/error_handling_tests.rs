// Validation, persistence-failure and test-double behavior of the submission handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use aimaturity_app_lib::commands::CommandError;
use aimaturity_app_lib::config::AppConfig;
use aimaturity_app_lib::error::{AppError, AppResult};
use aimaturity_app_lib::models::assessment::{
    AssessmentRecord, AssessmentResponses, AssessmentSubmissionRequest, AssessmentSummary,
    MaturityScore, UserInfoInput,
};
use aimaturity_app_lib::services::assessment_service::AssessmentService;
use aimaturity_app_lib::services::assessment_store::AssessmentStore;
use aimaturity_app_lib::services::maturity_scorer::{MaturityScorer, MaturityScoring};
use aimaturity_app_lib::utils::ids::IdGenerator;

#[derive(Default)]
struct RecordingStore {
    inserts: Mutex<Vec<AssessmentRecord>>,
}

impl AssessmentStore for RecordingStore {
    fn insert(&self, record: &AssessmentRecord) -> AppResult<()> {
        self.inserts
            .lock()
            .map_err(|_| AppError::other("poisoned"))?
            .push(record.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<AssessmentRecord>> {
        Ok(self
            .inserts
            .lock()
            .map_err(|_| AppError::other("poisoned"))?
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    fn list_recent(&self, _limit: usize) -> AppResult<Vec<AssessmentSummary>> {
        Ok(Vec::new())
    }
}

impl RecordingStore {
    fn insert_count(&self) -> usize {
        self.inserts.lock().map(|inserts| inserts.len()).unwrap_or(0)
    }
}

struct UnavailableStore;

impl AssessmentStore for UnavailableStore {
    fn insert(&self, _record: &AssessmentRecord) -> AppResult<()> {
        Err(AppError::persistence("connection refused: db.internal:5432"))
    }

    fn find_by_id(&self, _id: &str) -> AppResult<Option<AssessmentRecord>> {
        Err(AppError::persistence("connection refused: db.internal:5432"))
    }

    fn list_recent(&self, _limit: usize) -> AppResult<Vec<AssessmentSummary>> {
        Err(AppError::persistence("connection refused: db.internal:5432"))
    }
}

struct RejectingStore;

impl AssessmentStore for RejectingStore {
    fn insert(&self, _record: &AssessmentRecord) -> AppResult<()> {
        Err(AppError::conflict("duplicate id"))
    }

    fn find_by_id(&self, _id: &str) -> AppResult<Option<AssessmentRecord>> {
        Ok(None)
    }

    fn list_recent(&self, _limit: usize) -> AppResult<Vec<AssessmentSummary>> {
        Ok(Vec::new())
    }
}

/// Always returns the same score, whatever the answers.
struct FixedScorer(MaturityScore);

impl MaturityScoring for FixedScorer {
    fn score(&self, _responses: &AssessmentResponses) -> MaturityScore {
        self.0
    }
}

#[derive(Default)]
struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("assessment-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn service_with(
    store: Arc<dyn AssessmentStore>,
    scorer: Arc<dyn MaturityScoring>,
) -> AssessmentService {
    AssessmentService::with_collaborators(
        store,
        scorer,
        Arc::new(SequentialIds::default()),
        AppConfig::default(),
    )
}

fn valid_user() -> UserInfoInput {
    UserInfoInput {
        name: Some("Alan Turing".to_string()),
        email: Some("alan@example.org".to_string()),
        ..Default::default()
    }
}

fn field_of(err: &CommandError) -> Option<&str> {
    err.details.as_ref().and_then(|d| d["field"].as_str())
}

#[test]
fn test_missing_email_is_rejected_without_persisting() {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let result = service.submit(AssessmentSubmissionRequest {
        user_info: Some(UserInfoInput {
            email: None,
            ..valid_user()
        }),
        responses: Some(AssessmentResponses::default().into()),
    });

    let err = CommandError::from(result.unwrap_err());
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(field_of(&err), Some("user_info.email"));
    assert_eq!(store.insert_count(), 0);
}

#[test]
fn test_missing_top_level_fields_are_client_errors() {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let no_user = CommandError::from(
        service
            .submit(AssessmentSubmissionRequest {
                user_info: None,
                responses: Some(AssessmentResponses::default().into()),
            })
            .unwrap_err(),
    );
    assert_eq!(no_user.code, "VALIDATION_ERROR");
    assert_eq!(field_of(&no_user), Some("user_info"));

    let no_responses = CommandError::from(
        service
            .submit(AssessmentSubmissionRequest {
                user_info: Some(valid_user()),
                responses: None,
            })
            .unwrap_err(),
    );
    assert_eq!(no_responses.code, "VALIDATION_ERROR");
    assert_eq!(field_of(&no_responses), Some("responses"));

    let neither = CommandError::from(
        service
            .submit(AssessmentSubmissionRequest::default())
            .unwrap_err(),
    );
    assert_eq!(neither.code, "VALIDATION_ERROR");

    assert_eq!(store.insert_count(), 0);
}

#[test]
fn test_malformed_email_and_blank_name_are_rejected() {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let bad_email = service.submit(AssessmentSubmissionRequest {
        user_info: Some(UserInfoInput {
            email: Some("alan-at-example".to_string()),
            ..valid_user()
        }),
        responses: Some(AssessmentResponses::default().into()),
    });
    assert!(bad_email.unwrap_err().is_validation());

    let blank_name = service.submit(AssessmentSubmissionRequest {
        user_info: Some(UserInfoInput {
            name: Some("   ".to_string()),
            ..valid_user()
        }),
        responses: Some(AssessmentResponses::default().into()),
    });
    assert!(blank_name.unwrap_err().is_validation());

    assert_eq!(store.insert_count(), 0);
}

#[test]
fn test_out_of_range_scale_answer_is_rejected() {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let result = service.submit(AssessmentSubmissionRequest {
        user_info: Some(valid_user()),
        responses: Some(AssessmentResponses {
            tech_infrastructure: Some(9),
            ..Default::default()
        }.into()),
    });

    let err = CommandError::from(result.unwrap_err());
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(field_of(&err), Some("responses.tech_infrastructure"));
    assert_eq!(store.insert_count(), 0);
}

#[test]
fn test_mistyped_scale_answer_from_json_is_a_validation_error() {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    for answer in [serde_json::json!("three"), serde_json::json!(3.5)] {
        let request: AssessmentSubmissionRequest = serde_json::from_value(serde_json::json!({
            "user_info": { "name": "Alan Turing", "email": "alan@example.org" },
            "responses": { "tech_infrastructure": answer, "ai_strategy": "yes" }
        }))
        .expect("request shape deserializes regardless of answer types");

        let err = CommandError::from(service.submit(request).unwrap_err());
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(field_of(&err), Some("responses.tech_infrastructure"));
    }
    assert_eq!(store.insert_count(), 0);
}

#[test]
fn test_numeric_string_scale_answer_from_json_is_scored() -> AppResult<()> {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let request: AssessmentSubmissionRequest = serde_json::from_value(serde_json::json!({
        "user_info": { "name": "Alan Turing", "email": "alan@example.org" },
        "responses": { "tech_infrastructure": "3", "ai_strategy": "yes" }
    }))?;

    // (60 + 100) / 2
    let response = service.submit(request)?;
    assert_eq!(response.maturity_score.value(), 80);
    assert_eq!(store.insert_count(), 1);
    Ok(())
}

#[test]
fn test_store_failure_surfaces_as_generic_internal_error() {
    let service = service_with(Arc::new(UnavailableStore), Arc::new(MaturityScorer));

    let result = service.submit(AssessmentSubmissionRequest {
        user_info: Some(valid_user()),
        responses: Some(AssessmentResponses::default().into()),
    });

    let app_err = result.unwrap_err();
    assert!(matches!(app_err, AppError::Persistence { .. }));

    let err = CommandError::from(app_err);
    assert_eq!(err.code, "INTERNAL_ERROR");
    assert!(!err.message.contains("db.internal"));
}

#[test]
fn test_store_rejection_is_reported_as_persistence_failure() {
    let service = service_with(Arc::new(RejectingStore), Arc::new(MaturityScorer));

    let result = service.submit(AssessmentSubmissionRequest {
        user_info: Some(valid_user()),
        responses: Some(AssessmentResponses::default().into()),
    });

    let err = CommandError::from(result.unwrap_err());
    assert_eq!(err.code, "INTERNAL_ERROR");
}

#[test]
fn test_fixed_scorer_double_drives_bracket_selection() -> AppResult<()> {
    let store = Arc::new(RecordingStore::default());

    for (fixed, expected_title) in [
        (24, "AI Foundation Building"),
        (25, "Process Automation Implementation"),
        (50, "Advanced AI Integration"),
        (75, "AI Innovation Leadership"),
    ] {
        let service = service_with(
            store.clone(),
            Arc::new(FixedScorer(MaturityScore::saturating(fixed))),
        );
        let response = service.submit(AssessmentSubmissionRequest {
            user_info: Some(valid_user()),
            responses: Some(AssessmentResponses::default().into()),
        })?;

        assert_eq!(response.maturity_score.value() as i64, fixed);
        assert_eq!(response.recommendations[0].title, expected_title);
        assert_eq!(response.assessment_id, "assessment-1");
    }

    assert_eq!(store.insert_count(), 4);
    Ok(())
}

#[test]
fn test_stored_record_matches_response() -> AppResult<()> {
    let store = Arc::new(RecordingStore::default());
    let service = service_with(store.clone(), Arc::new(MaturityScorer));

    let response = service.submit(AssessmentSubmissionRequest {
        user_info: Some(valid_user()),
        responses: Some(AssessmentResponses {
            ai_strategy: Some("yes".to_string()),
            ..Default::default()
        }.into()),
    })?;

    let stored = service.get_assessment(&response.assessment_id)?;
    assert_eq!(stored.maturity_score.value(), 100);
    assert_eq!(stored.user_info.email, "alan@example.org");
    assert_eq!(stored.submitted_at, response.timestamp);
    Ok(())
}
