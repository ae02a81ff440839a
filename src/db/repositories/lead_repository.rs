use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};
use crate::models::lead::{LeadKind, LeadRecord};

#[derive(Debug, Clone)]
pub struct LeadRow {
    pub id: String,
    pub kind: String,
    pub email: String,
    pub name: Option<String>,
    pub payload: String,
    pub created_at: String,
}

impl LeadRow {
    pub fn from_record(record: &LeadRecord) -> AppResult<Self> {
        Ok(Self {
            id: record.id.clone(),
            kind: record.kind.as_str().to_string(),
            email: record.email.clone(),
            name: record.name.clone(),
            payload: serialize_json(&record.payload)?,
            created_at: record.created_at.clone(),
        })
    }

    pub fn into_record(self) -> AppResult<LeadRecord> {
        let kind = LeadKind::try_from(self.kind.as_str())
            .map_err(|err| AppError::persistence(format!("corrupt lead row: {err}")))?;
        Ok(LeadRecord {
            id: self.id,
            kind,
            email: self.email,
            name: self.name,
            payload: deserialize_json(&self.payload)?,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<&Row<'_>> for LeadRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            kind: row.get("kind")?,
            email: row.get("email")?,
            name: row.get("name")?,
            payload: row.get("payload")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct LeadRepository;

impl LeadRepository {
    pub fn insert(conn: &Connection, row: &LeadRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO leads (id, kind, email, name, payload, created_at)
                VALUES (:id, :kind, :email, :name, :payload, :created_at)
            "#,
            named_params! {
                ":id": &row.id,
                ":kind": &row.kind,
                ":email": &row.email,
                ":name": &row.name,
                ":payload": &row.payload,
                ":created_at": &row.created_at,
            },
        )?;
        Ok(())
    }

    /// Inserts the row unless a uniqueness rule already covers it (one
    /// newsletter row per email). Returns whether a row was written.
    pub fn insert_if_absent(conn: &Connection, row: &LeadRow) -> AppResult<bool> {
        let inserted = conn.execute(
            r#"
                INSERT INTO leads (id, kind, email, name, payload, created_at)
                VALUES (:id, :kind, :email, :name, :payload, :created_at)
                ON CONFLICT DO NOTHING
            "#,
            named_params! {
                ":id": &row.id,
                ":kind": &row.kind,
                ":email": &row.email,
                ":name": &row.name,
                ":payload": &row.payload,
                ":created_at": &row.created_at,
            },
        )?;
        Ok(inserted > 0)
    }

    pub fn find_by_kind_and_email(
        conn: &Connection,
        kind: LeadKind,
        email: &str,
    ) -> AppResult<Option<LeadRow>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT id, kind, email, name, payload, created_at
                FROM leads
                WHERE kind = :kind AND email = :email
                ORDER BY created_at ASC
                LIMIT 1
            "#,
        )?;

        let row = stmt
            .query_row(
                named_params! {":kind": kind.as_str(), ":email": email},
                |row| LeadRow::try_from(row),
            )
            .optional()?;

        Ok(row)
    }

    pub fn list_by_kind(conn: &Connection, kind: LeadKind, limit: usize) -> AppResult<Vec<LeadRow>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT id, kind, email, name, payload, created_at
                FROM leads
                WHERE kind = :kind
                ORDER BY created_at DESC, id DESC
                LIMIT :limit
            "#,
        )?;

        let rows = stmt
            .query_map(
                named_params! {":kind": kind.as_str(), ":limit": limit as i64},
                |row| LeadRow::try_from(row),
            )?
            .map(|row| row.map_err(AppError::from))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(rows)
    }
}

fn serialize_json(value: &JsonValue) -> AppResult<String> {
    serde_json::to_string(value).map_err(AppError::from)
}

fn deserialize_json(raw: &str) -> AppResult<JsonValue> {
    serde_json::from_str(raw).map_err(AppError::from)
}
