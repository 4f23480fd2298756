//! Daily fortune record model.
//!
//! # Invariants
//! - Every score lies in `0..=100`.
//! - At most one record exists per `(owner_id, date)`; storage enforces it.

use super::{OwnerId, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Upper bound (inclusive) of every fortune score.
pub const MAX_SCORE: u8 = 100;

/// Validation errors for fortune scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FortuneValidationError {
    ScoreOutOfRange {
        field: &'static str,
        value: u8,
    },
}

impl Display for FortuneValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..={MAX_SCORE}, got {value}")
            }
        }
    }
}

impl Error for FortuneValidationError {}

/// The five daily scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneScores {
    #[serde(rename = "overall_score")]
    pub overall: u8,
    #[serde(rename = "love_score")]
    pub love: u8,
    #[serde(rename = "career_score")]
    pub career: u8,
    #[serde(rename = "health_score")]
    pub health: u8,
    #[serde(rename = "wealth_score")]
    pub wealth: u8,
}

impl FortuneScores {
    /// Returns `(field, value)` pairs in overall/love/career/health/wealth order.
    pub fn named(&self) -> [(&'static str, u8); 5] {
        [
            ("overall_score", self.overall),
            ("love_score", self.love),
            ("career_score", self.career),
            ("health_score", self.health),
            ("wealth_score", self.wealth),
        ]
    }

    pub fn validate(&self) -> Result<(), FortuneValidationError> {
        for (field, value) in self.named() {
            if value > MAX_SCORE {
                return Err(FortuneValidationError::ScoreOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Persisted daily fortune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,
    /// Calendar day, no time component.
    pub date: NaiveDate,
    #[serde(flatten)]
    pub scores: FortuneScores,
    pub analysis: String,
    pub suggestions: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl FortuneRecord {
    /// Creates a record with a generated id.
    pub fn new(
        owner_id: OwnerId,
        date: NaiveDate,
        scores: FortuneScores,
        analysis: impl Into<String>,
        suggestions: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            scores,
            analysis: analysis.into(),
            suggestions: suggestions.into(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    pub fn validate(&self) -> Result<(), FortuneValidationError> {
        self.scores.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{FortuneScores, FortuneValidationError};

    #[test]
    fn validate_rejects_scores_above_hundred() {
        let scores = FortuneScores {
            overall: 100,
            love: 0,
            career: 50,
            health: 101,
            wealth: 3,
        };
        assert_eq!(
            scores.validate(),
            Err(FortuneValidationError::ScoreOutOfRange {
                field: "health_score",
                value: 101
            })
        );
    }

    #[test]
    fn scores_serialize_with_score_suffix() {
        let scores = FortuneScores {
            overall: 1,
            love: 2,
            career: 3,
            health: 4,
            wealth: 5,
        };
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["overall_score"], 1);
        assert_eq!(json["wealth_score"], 5);
    }
}
