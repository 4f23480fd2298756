//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the persistence contracts consumed by services.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Writes are single statements; no partial-write cleanup exists.

use crate::db::DbError;
use crate::model::fortune::FortuneValidationError;
use crate::model::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod divination_repo;
pub mod fortune_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure surfaced by repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Validation(FortuneValidationError),
    NotFound(RecordId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<FortuneValidationError> for RepoError {
    fn from(value: FortuneValidationError) -> Self {
        Self::Validation(value)
    }
}

fn parse_record_id(value: &str, column: &str) -> RepoResult<RecordId> {
    RecordId::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}
