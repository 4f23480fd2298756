//! Divination repository contract and SQLite implementation.
//!
//! # Invariants
//! - Owner listings exclude soft-deleted rows and keep insertion order.
//! - Soft delete is the only update path.

use super::{parse_record_id, RepoError, RepoResult};
use crate::model::divination::{DivinationRecord, DivinationType};
use crate::model::{OwnerId, RecordId};
use rusqlite::{params, Connection, Row};

const DIVINATION_SELECT_SQL: &str = "SELECT
    uuid,
    owner_id,
    type,
    question,
    input,
    result,
    ai_analysis,
    created_at,
    updated_at,
    is_deleted
FROM divinations";

/// Persistence contract for divination records.
pub trait DivinationRepository {
    fn create_divination(&self, record: &DivinationRecord) -> RepoResult<RecordId>;
    fn get_divination(
        &self,
        id: RecordId,
        include_deleted: bool,
    ) -> RepoResult<Option<DivinationRecord>>;
    /// Active records for `owner_id`, oldest first.
    fn list_divinations_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<DivinationRecord>>;
    /// Marks the record deleted; `NotFound` when no row has `id`.
    fn soft_delete_divination(&self, id: RecordId, now_ms: i64) -> RepoResult<()>;
}

/// SQLite-backed divination repository.
pub struct SqliteDivinationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDivinationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DivinationRepository for SqliteDivinationRepository<'_> {
    fn create_divination(&self, record: &DivinationRecord) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO divinations (
                uuid,
                owner_id,
                type,
                question,
                input,
                result,
                ai_analysis,
                created_at,
                updated_at,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                record.id.to_string(),
                record.owner_id,
                record.kind.as_str(),
                record.question.as_str(),
                record.input.as_str(),
                record.result.as_str(),
                record.ai_analysis.as_str(),
                record.created_at,
                record.updated_at,
                record.is_deleted,
            ],
        )?;

        Ok(record.id)
    }

    fn get_divination(
        &self,
        id: RecordId,
        include_deleted: bool,
    ) -> RepoResult<Option<DivinationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DIVINATION_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), include_deleted])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_divination_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_divinations_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<DivinationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DIVINATION_SELECT_SQL}
             WHERE owner_id = ?1
               AND is_deleted = 0
             ORDER BY rowid ASC;"
        ))?;

        let mut rows = stmt.query([owner_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_divination_row(row)?);
        }

        Ok(records)
    }

    fn soft_delete_divination(&self, id: RecordId, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE divinations
             SET
                is_deleted = 1,
                updated_at = ?2
             WHERE uuid = ?1;",
            params![id.to_string(), now_ms],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_divination_row(row: &Row<'_>) -> RepoResult<DivinationRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_record_id(&uuid_text, "divinations.uuid")?;

    let type_text: String = row.get("type")?;
    let kind = DivinationType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid divination type `{type_text}` in divinations.type"))
    })?;

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in divinations.is_deleted"
            )));
        }
    };

    Ok(DivinationRecord {
        id,
        owner_id: row.get("owner_id")?,
        kind,
        question: row.get("question")?,
        input: row.get("input")?,
        result: row.get("result")?,
        ai_analysis: row.get("ai_analysis")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        is_deleted,
    })
}
