//! Daily fortune repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store at most one fortune per `(owner_id, date)`.
//! - Query an owner's fortunes by exact day or inclusive date range.
//!
//! # Invariants
//! - `fortune_date` is stored as `YYYY-MM-DD`, so text order is date order.
//! - `UNIQUE(owner_id, fortune_date)` backs the one-per-day rule; a losing
//!   concurrent insert resolves to the stored winner.

use super::{parse_record_id, RepoError, RepoResult};
use crate::model::fortune::{FortuneRecord, FortuneScores};
use crate::model::OwnerId;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

const FORTUNE_SELECT_SQL: &str = "SELECT
    uuid,
    owner_id,
    fortune_date,
    overall_score,
    love_score,
    career_score,
    health_score,
    wealth_score,
    analysis,
    suggestions,
    created_at,
    updated_at
FROM fortunes";

/// Persistence contract for daily fortune records.
pub trait FortuneRepository {
    fn find_fortune(&self, owner_id: OwnerId, date: NaiveDate) -> RepoResult<Option<FortuneRecord>>;
    /// Inserts `record` unless `(owner_id, date)` already exists, then
    /// returns the stored row for that key.
    fn create_fortune(&self, record: &FortuneRecord) -> RepoResult<FortuneRecord>;
    /// Records with `start <= date <= end`, newest date first.
    fn list_fortunes_in_range(
        &self,
        owner_id: OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<FortuneRecord>>;
}

/// SQLite-backed fortune repository.
pub struct SqliteFortuneRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFortuneRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FortuneRepository for SqliteFortuneRepository<'_> {
    fn find_fortune(
        &self,
        owner_id: OwnerId,
        date: NaiveDate,
    ) -> RepoResult<Option<FortuneRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FORTUNE_SELECT_SQL}
             WHERE owner_id = ?1
               AND fortune_date = ?2;"
        ))?;

        let mut rows = stmt.query(params![owner_id, date_to_db(date)])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_fortune_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_fortune(&self, record: &FortuneRecord) -> RepoResult<FortuneRecord> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO fortunes (
                uuid,
                owner_id,
                fortune_date,
                overall_score,
                love_score,
                career_score,
                health_score,
                wealth_score,
                analysis,
                suggestions,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT (owner_id, fortune_date) DO NOTHING;",
            params![
                record.id.to_string(),
                record.owner_id,
                date_to_db(record.date),
                record.scores.overall,
                record.scores.love,
                record.scores.career,
                record.scores.health,
                record.scores.wealth,
                record.analysis.as_str(),
                record.suggestions.as_str(),
                record.created_at,
                record.updated_at,
            ],
        )?;

        self.find_fortune(record.owner_id, record.date)?
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "fortune for owner {} on {} missing after insert",
                    record.owner_id, record.date
                ))
            })
    }

    fn list_fortunes_in_range(
        &self,
        owner_id: OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<FortuneRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FORTUNE_SELECT_SQL}
             WHERE owner_id = ?1
               AND fortune_date BETWEEN ?2 AND ?3
             ORDER BY fortune_date DESC;"
        ))?;

        let mut rows = stmt.query(params![owner_id, date_to_db(start), date_to_db(end)])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_fortune_row(row)?);
        }

        Ok(records)
    }
}

fn parse_fortune_row(row: &Row<'_>) -> RepoResult<FortuneRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_record_id(&uuid_text, "fortunes.uuid")?;

    let date_text: String = row.get("fortune_date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in fortunes.fortune_date"))
    })?;

    let record = FortuneRecord {
        id,
        owner_id: row.get("owner_id")?,
        date,
        scores: FortuneScores {
            overall: row.get("overall_score")?,
            love: row.get("love_score")?,
            career: row.get("career_score")?,
            health: row.get("health_score")?,
            wealth: row.get("wealth_score")?,
        },
        analysis: row.get("analysis")?,
        suggestions: row.get("suggestions")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    record.validate()?;
    Ok(record)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
