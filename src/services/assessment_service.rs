use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::assessment::{
    AssessmentRecord, AssessmentResponses, AssessmentSubmissionRequest,
    AssessmentSubmissionResponse, AssessmentSummary, UserInfo, UserInfoInput,
};
use crate::services::assessment_store::{AssessmentStore, SqliteAssessmentStore};
use crate::services::maturity_scorer::{MaturityScorer, MaturityScoring};
use crate::services::recommendation_generator::generate_recommendations;
use crate::utils::ids::{IdGenerator, UuidGenerator};
use crate::utils::redact::mask_email;
use crate::utils::validation::{optional_field, require_email, require_field};

const SCALE_MIN: i64 = 1;
const SCALE_MAX: i64 = 5;
const SUCCESS_MESSAGE: &str = "Assessment completed successfully";

/// Validates assessment submissions, scores them and hands the record to the
/// store. Scoring, storage and id generation are injected.
pub struct AssessmentService {
    store: Arc<dyn AssessmentStore>,
    scorer: Arc<dyn MaturityScoring>,
    ids: Arc<dyn IdGenerator>,
    config: AppConfig,
}

impl AssessmentService {
    pub fn new(db: DbPool, config: AppConfig) -> Self {
        Self::with_collaborators(
            Arc::new(SqliteAssessmentStore::new(db)),
            Arc::new(MaturityScorer),
            Arc::new(UuidGenerator),
            config,
        )
    }

    pub fn with_collaborators(
        store: Arc<dyn AssessmentStore>,
        scorer: Arc<dyn MaturityScoring>,
        ids: Arc<dyn IdGenerator>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            scorer,
            ids,
            config,
        }
    }

    pub fn submit(
        &self,
        request: AssessmentSubmissionRequest,
    ) -> AppResult<AssessmentSubmissionResponse> {
        let (user_info, responses) = validate_request(request)?;

        let maturity_score = self.scorer.score(&responses);
        let recommendations = generate_recommendations(maturity_score);

        let record = AssessmentRecord {
            id: self.ids.next_id(),
            user_info,
            responses,
            maturity_score,
            recommendations,
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        // Single attempt; whatever the store reports becomes an internal error.
        self.store.insert(&record).map_err(|err| {
            error!(
                target: "app::assessment",
                assessment_id = %record.id,
                error = %err,
                "failed to persist assessment"
            );
            match err {
                AppError::Persistence { .. } => err,
                other => AppError::persistence(format!("failed to store assessment: {other}")),
            }
        })?;

        info!(
            target: "app::assessment",
            assessment_id = %record.id,
            email = %mask_email(&record.user_info.email),
            maturity_score = record.maturity_score.value(),
            bracket = %record.bracket(),
            "assessment submitted"
        );

        Ok(AssessmentSubmissionResponse {
            success: true,
            assessment_id: record.id,
            maturity_score: record.maturity_score,
            recommendations: record.recommendations,
            message: SUCCESS_MESSAGE.to_string(),
            timestamp: record.submitted_at,
        })
    }

    pub fn get_assessment(&self, id: &str) -> AppResult<AssessmentRecord> {
        let id = require_field("id", Some(id.to_string()))?;
        let record = self
            .store
            .find_by_id(&id)?
            .ok_or_else(AppError::not_found)?;
        debug!(target: "app::assessment", assessment_id = %record.id, "assessment fetched");
        Ok(record)
    }

    pub fn list_recent(&self, limit: Option<usize>) -> AppResult<Vec<AssessmentSummary>> {
        let limit = self.config.resolve_limit(limit);
        let summaries = self.store.list_recent(limit)?;
        debug!(target: "app::assessment", count = summaries.len(), limit, "assessments listed");
        Ok(summaries)
    }
}

fn validate_request(
    request: AssessmentSubmissionRequest,
) -> AppResult<(UserInfo, AssessmentResponses)> {
    let AssessmentSubmissionRequest {
        user_info,
        responses,
    } = request;

    let (user_info, responses) = match (user_info, responses) {
        (Some(user_info), Some(responses)) => (user_info, responses),
        (None, Some(_)) => {
            return Err(AppError::invalid_field("user_info", "user_info is required"))
        }
        (Some(_), None) => {
            return Err(AppError::invalid_field("responses", "responses are required"))
        }
        (None, None) => {
            return Err(AppError::validation_with_details(
                "user_info and responses are required",
                serde_json::json!({ "field": "user_info,responses" }),
            ))
        }
    };

    Ok((validate_user_info(user_info)?, parse_responses(responses)?))
}

fn validate_user_info(input: UserInfoInput) -> AppResult<UserInfo> {
    Ok(UserInfo {
        name: require_field("user_info.name", input.name)?,
        email: require_email("user_info.email", input.email)?,
        company: optional_field("user_info.company", input.company)?,
        industry: optional_field("user_info.industry", input.industry)?,
        company_size: optional_field("user_info.company_size", input.company_size)?,
    })
}

/// Reads the raw answers into typed responses. Unknown keys are ignored;
/// a mistyped or out-of-range answer is a validation error naming it.
fn parse_responses(raw: JsonValue) -> AppResult<AssessmentResponses> {
    let JsonValue::Object(answers) = raw else {
        return Err(AppError::invalid_field(
            "responses",
            "responses must be an object keyed by question",
        ));
    };

    Ok(AssessmentResponses {
        tech_infrastructure: scale_answer(&answers, "tech_infrastructure")?,
        ai_tools_usage: text_answer(&answers, "ai_tools_usage")?,
        data_management: text_answer(&answers, "data_management")?,
        team_readiness: scale_answer(&answers, "team_readiness")?,
        process_automation: scale_answer(&answers, "process_automation")?,
        ai_strategy: text_answer(&answers, "ai_strategy")?,
    })
}

/// Whole numbers 1-5. Numeric strings such as `"3"` are accepted.
fn scale_answer(answers: &Map<String, JsonValue>, question: &str) -> AppResult<Option<i64>> {
    let field = format!("responses.{question}");
    let value = match answers.get(question) {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::Number(number)) => number.as_i64(),
        Some(JsonValue::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(value) if (SCALE_MIN..=SCALE_MAX).contains(&value) => Ok(Some(value)),
        Some(value) => Err(AppError::invalid_field(
            &field,
            format!("{field} must be between {SCALE_MIN} and {SCALE_MAX}, got {value}"),
        )),
        None => Err(AppError::invalid_field(
            &field,
            format!("{field} must be a whole number between {SCALE_MIN} and {SCALE_MAX}"),
        )),
    }
}

fn text_answer(answers: &Map<String, JsonValue>, question: &str) -> AppResult<Option<String>> {
    match answers.get(question) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(text)) => Ok(Some(text.clone())),
        Some(_) => {
            let field = format!("responses.{question}");
            Err(AppError::invalid_field(&field, format!("{field} must be text")))
        }
    }
}
