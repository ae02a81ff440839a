use std::sync::Arc;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::db::repositories::lead_repository::{LeadRepository, LeadRow};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::lead::{
    ConsultationRequestInput, ContactRequestInput, LeadKind, LeadReceipt, LeadRecord,
    NewsletterSignupInput,
};
use crate::utils::ids::{IdGenerator, UuidGenerator};
use crate::utils::redact::{mask_email, redact_personal_data};
use crate::utils::validation::{optional_field, require_email, require_field, require_text};

const MAX_MESSAGE_CHARS: usize = 5000;

/// Captures newsletter, contact and consultation leads.
pub struct LeadService {
    db: DbPool,
    ids: Arc<dyn IdGenerator>,
    config: AppConfig,
}

impl LeadService {
    pub fn new(db: DbPool, config: AppConfig) -> Self {
        Self::with_id_generator(db, Arc::new(UuidGenerator), config)
    }

    pub fn with_id_generator(db: DbPool, ids: Arc<dyn IdGenerator>, config: AppConfig) -> Self {
        Self { db, ids, config }
    }

    /// Subscribing an address twice returns the first receipt. The insert and
    /// the read-back share one connection hold, and a unique index on
    /// newsletter emails backs it up across processes.
    pub fn subscribe_newsletter(&self, input: NewsletterSignupInput) -> AppResult<LeadReceipt> {
        let email = require_email("email", input.email)?;
        let name = optional_field("name", input.name)?;
        let source = optional_field("source", input.source)?;

        let candidate = self.new_record(
            LeadKind::Newsletter,
            email,
            name,
            json!({ "source": source }),
        );
        let row = LeadRow::from_record(&candidate)?;

        let (stored, inserted) = self.db.with_connection(|conn| {
            let inserted = LeadRepository::insert_if_absent(conn, &row)?;
            let stored =
                LeadRepository::find_by_kind_and_email(conn, LeadKind::Newsletter, &row.email)?
                    .ok_or_else(|| {
                        AppError::persistence("newsletter signup missing after insert")
                    })?;
            Ok((stored, inserted))
        })?;
        let record = stored.into_record()?;

        if !inserted {
            info!(
                target: "app::leads",
                lead_id = %record.id,
                email = %mask_email(&record.email),
                "newsletter signup already registered"
            );
            return Ok(receipt(&record, "You're already subscribed", true));
        }

        log_captured(&record);
        Ok(receipt(&record, "Thanks for subscribing", false))
    }

    pub fn submit_contact(&self, input: ContactRequestInput) -> AppResult<LeadReceipt> {
        let name = require_field("name", input.name)?;
        let email = require_email("email", input.email)?;
        let company = optional_field("company", input.company)?;
        let phone = optional_field("phone", input.phone)?;
        let message = require_text("message", input.message, MAX_MESSAGE_CHARS)?;

        let payload = json!({
            "company": company,
            "phone": phone,
            "message": message,
        });
        let record = self.store(LeadKind::Contact, email, Some(name), payload)?;
        Ok(receipt(&record, "Thanks for reaching out, we'll be in touch soon", false))
    }

    pub fn book_consultation(&self, input: ConsultationRequestInput) -> AppResult<LeadReceipt> {
        let name = require_field("name", input.name)?;
        let email = require_email("email", input.email)?;
        let company = optional_field("company", input.company)?;
        let preferred_date = parse_preferred_date(input.preferred_date)?;
        let preferred_time = optional_field("preferred_time", input.preferred_time)?;
        let topic = optional_field("topic", input.topic)?;

        let payload = json!({
            "company": company,
            "preferred_date": preferred_date.format("%Y-%m-%d").to_string(),
            "preferred_time": preferred_time,
            "topic": topic,
        });
        let record = self.store(LeadKind::Consultation, email, Some(name), payload)?;
        Ok(receipt(
            &record,
            "Consultation request received, we'll confirm your slot by email",
            false,
        ))
    }

    pub fn list_leads(&self, kind: LeadKind, limit: Option<usize>) -> AppResult<Vec<LeadRecord>> {
        let limit = self.config.resolve_limit(limit);
        let leads = self
            .db
            .with_connection(|conn| LeadRepository::list_by_kind(conn, kind, limit))?
            .into_iter()
            .map(LeadRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;
        debug!(target: "app::leads", %kind, count = leads.len(), "leads listed");
        Ok(leads)
    }

    fn new_record(
        &self,
        kind: LeadKind,
        email: String,
        name: Option<String>,
        payload: serde_json::Value,
    ) -> LeadRecord {
        LeadRecord {
            id: self.ids.next_id(),
            kind,
            email,
            name,
            payload,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    fn store(
        &self,
        kind: LeadKind,
        email: String,
        name: Option<String>,
        payload: serde_json::Value,
    ) -> AppResult<LeadRecord> {
        let record = self.new_record(kind, email, name, payload);
        let row = LeadRow::from_record(&record)?;
        self.db
            .with_connection(|conn| LeadRepository::insert(conn, &row))?;
        log_captured(&record);
        Ok(record)
    }
}

fn log_captured(record: &LeadRecord) {
    info!(
        target: "app::leads",
        lead_id = %record.id,
        kind = %record.kind,
        email = %mask_email(&record.email),
        "lead captured"
    );
    debug!(
        target: "app::leads",
        lead_id = %record.id,
        payload = %redact_personal_data(&record.payload),
        "lead payload"
    );
}

fn parse_preferred_date(raw: Option<String>) -> AppResult<NaiveDate> {
    let raw = require_field("preferred_date", raw)?;
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        AppError::invalid_field("preferred_date", "preferred_date must use the YYYY-MM-DD format")
    })?;
    if date < Utc::now().date_naive() {
        return Err(AppError::invalid_field(
            "preferred_date",
            "preferred_date cannot be in the past",
        ));
    }
    Ok(date)
}

fn receipt(record: &LeadRecord, message: &str, already_registered: bool) -> LeadReceipt {
    LeadReceipt {
        success: true,
        lead_id: record.id.clone(),
        kind: record.kind,
        message: message.to_string(),
        timestamp: record.created_at.clone(),
        already_registered,
    }
}
