//! Service-level error taxonomy.

use crate::analysis::AnalysisError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Request rejected before any side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnsupportedType(String),
    EmptyQuestion,
    MissingBirthTime,
    InvalidBirthTime(String),
    MissingZodiacSign,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType(kind) => write!(f, "unsupported divination type `{kind}`"),
            Self::EmptyQuestion => write!(f, "question must not be empty"),
            Self::MissingBirthTime => write!(f, "bazi divination requires a birth time"),
            Self::InvalidBirthTime(value) => write!(
                f,
                "invalid birth time `{value}`; expected YYYY-MM-DD HH:MM:SS"
            ),
            Self::MissingZodiacSign => write!(f, "zodiac divination requires a zodiac sign"),
        }
    }
}

impl Error for ValidationError {}

/// Storage step that failed, used as the error's leading description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAction {
    SaveRecord,
    LoadRecord,
    LoadHistory,
    DeleteRecord,
    LoadFortune,
    SaveFortune,
    LoadFortuneHistory,
}

impl StorageAction {
    pub fn describe(self) -> &'static str {
        match self {
            Self::SaveRecord => "failed to save record",
            Self::LoadRecord => "failed to load record",
            Self::LoadHistory => "failed to load divination history",
            Self::DeleteRecord => "failed to delete record",
            Self::LoadFortune => "failed to load fortune record",
            Self::SaveFortune => "failed to save fortune record",
            Self::LoadFortuneHistory => "failed to load fortune history",
        }
    }
}

/// Failure of one service operation. Every variant is scoped to a single
/// request.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Analysis(AnalysisError),
    Serialization(serde_json::Error),
    Storage {
        action: StorageAction,
        source: RepoError,
    },
    NotFound(crate::model::RecordId),
}

impl ServiceError {
    pub(crate) fn storage(action: StorageAction) -> impl FnOnce(RepoError) -> Self {
        move |source| Self::Storage { action, source }
    }

    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Analysis(_) => "analysis_failed",
            Self::Serialization(_) => "serialization_failed",
            Self::Storage { .. } => "storage_failed",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Analysis(err) => write!(f, "failed to generate analysis: {err}"),
            Self::Serialization(err) => write!(f, "failed to serialize result: {err}"),
            Self::Storage { action, source } => write!(f, "{}: {source}", action.describe()),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Analysis(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Storage { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AnalysisError> for ServiceError {
    fn from(value: AnalysisError) -> Self {
        Self::Analysis(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
