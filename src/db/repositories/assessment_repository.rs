use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{AppError, AppResult};
use crate::models::assessment::{
    AssessmentRecord, AssessmentResponses, AssessmentSummary, MaturityBracket, MaturityScore,
    UserInfo,
};
use crate::models::recommendation::Recommendation;

#[derive(Debug, Clone)]
pub struct AssessmentRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub responses: String,
    pub maturity_score: i64,
    pub maturity_bracket: String,
    pub recommendations: String,
    pub submitted_at: String,
}

impl AssessmentRow {
    pub fn from_record(record: &AssessmentRecord) -> AppResult<Self> {
        Ok(Self {
            id: record.id.clone(),
            name: record.user_info.name.clone(),
            email: record.user_info.email.clone(),
            company: record.user_info.company.clone(),
            industry: record.user_info.industry.clone(),
            company_size: record.user_info.company_size.clone(),
            responses: serde_json::to_string(&record.responses)?,
            maturity_score: i64::from(record.maturity_score.value()),
            maturity_bracket: record.bracket().as_str().to_string(),
            recommendations: serde_json::to_string(&record.recommendations)?,
            submitted_at: record.submitted_at.clone(),
        })
    }

    pub fn into_record(self) -> AppResult<AssessmentRecord> {
        let responses: AssessmentResponses = serde_json::from_str(&self.responses)?;
        let recommendations: Vec<Recommendation> = serde_json::from_str(&self.recommendations)?;
        Ok(AssessmentRecord {
            id: self.id,
            user_info: UserInfo {
                name: self.name,
                email: self.email,
                company: self.company,
                industry: self.industry,
                company_size: self.company_size,
            },
            responses,
            maturity_score: parse_score(self.maturity_score)?,
            recommendations,
            submitted_at: self.submitted_at,
        })
    }

    pub fn into_summary(self) -> AppResult<AssessmentSummary> {
        let maturity_score = parse_score(self.maturity_score)?;
        let bracket = MaturityBracket::try_from(self.maturity_bracket.as_str())
            .unwrap_or_else(|_| maturity_score.bracket());
        Ok(AssessmentSummary {
            id: self.id,
            name: self.name,
            email: self.email,
            company: self.company,
            maturity_score,
            bracket,
            submitted_at: self.submitted_at,
        })
    }
}

impl TryFrom<&Row<'_>> for AssessmentRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        let maturity_score: i64 = row.get("maturity_score")?;
        let maturity_bracket: Option<String> = row.get("maturity_bracket")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            company: row.get("company")?,
            industry: row.get("industry")?,
            company_size: row.get("company_size")?,
            responses: row.get("responses")?,
            maturity_score,
            maturity_bracket: maturity_bracket.unwrap_or_else(|| {
                MaturityScore::saturating(maturity_score)
                    .bracket()
                    .as_str()
                    .to_string()
            }),
            recommendations: row.get("recommendations")?,
            submitted_at: row.get("submitted_at")?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    id,
    name,
    email,
    company,
    industry,
    company_size,
    responses,
    maturity_score,
    maturity_bracket,
    recommendations,
    submitted_at
"#;

pub struct AssessmentRepository;

impl AssessmentRepository {
    pub fn insert(conn: &Connection, row: &AssessmentRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO assessments (
                    id,
                    name,
                    email,
                    company,
                    industry,
                    company_size,
                    responses,
                    maturity_score,
                    maturity_bracket,
                    recommendations,
                    submitted_at
                ) VALUES (
                    :id,
                    :name,
                    :email,
                    :company,
                    :industry,
                    :company_size,
                    :responses,
                    :maturity_score,
                    :maturity_bracket,
                    :recommendations,
                    :submitted_at
                )
            "#,
            named_params! {
                ":id": &row.id,
                ":name": &row.name,
                ":email": &row.email,
                ":company": &row.company,
                ":industry": &row.industry,
                ":company_size": &row.company_size,
                ":responses": &row.responses,
                ":maturity_score": &row.maturity_score,
                ":maturity_bracket": &row.maturity_bracket,
                ":recommendations": &row.recommendations,
                ":submitted_at": &row.submitted_at,
            },
        )?;

        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: &str) -> AppResult<Option<AssessmentRow>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM assessments WHERE id = :id");
        let mut stmt = conn.prepare(&sql)?;

        let row = stmt
            .query_row(named_params! {":id": id}, |row| AssessmentRow::try_from(row))
            .optional()?;

        Ok(row)
    }

    pub fn list_recent(conn: &Connection, limit: usize) -> AppResult<Vec<AssessmentRow>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM assessments ORDER BY submitted_at DESC, id DESC LIMIT :limit"
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map(named_params! {":limit": limit as i64}, |row| {
                AssessmentRow::try_from(row)
            })?
            .map(|row| row.map_err(AppError::from))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(rows)
    }
}

fn parse_score(raw: i64) -> AppResult<MaturityScore> {
    MaturityScore::try_from(raw)
        .map_err(|err| AppError::persistence(format!("corrupt assessment row: {err}")))
}
