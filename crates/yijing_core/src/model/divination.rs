//! Divination record model.
//!
//! # Responsibility
//! - Define the closed set of supported divination types.
//! - Define the persisted divination record and its type-specific results.
//!
//! # Invariants
//! - `input` and `result` both hold the serialized computed result.
//! - `is_deleted` is the only field that changes after creation.

use super::bazi::BaziReading;
use super::tarot::TarotReading;
use super::{OwnerId, RecordId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported divination methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivinationType {
    Zodiac,
    Tarot,
    Yijing,
    Bazi,
}

impl DivinationType {
    pub const ALL: [DivinationType; 4] = [
        DivinationType::Zodiac,
        DivinationType::Tarot,
        DivinationType::Yijing,
        DivinationType::Bazi,
    ];

    /// Wire and storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            DivinationType::Zodiac => "zodiac",
            DivinationType::Tarot => "tarot",
            DivinationType::Yijing => "yijing",
            DivinationType::Bazi => "bazi",
        }
    }

    /// Parses an exact, case-sensitive type name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "zodiac" => Some(DivinationType::Zodiac),
            "tarot" => Some(DivinationType::Tarot),
            "yijing" => Some(DivinationType::Yijing),
            "bazi" => Some(DivinationType::Bazi),
            _ => None,
        }
    }
}

impl std::fmt::Display for DivinationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zodiac result: the caller's sign and the day it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZodiacReading {
    pub sign: String,
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// Yijing result: hexagram `1..=64` and its changing lines `1..=6`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramReading {
    pub hexagram: u8,
    pub changing_lines: Vec<u8>,
}

/// Type-specific computed result, serialized without a type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DivinationResult {
    Zodiac(ZodiacReading),
    Tarot(TarotReading),
    Yijing(HexagramReading),
    Bazi(BaziReading),
}

/// Persisted divination record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivinationRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,
    /// Serialized as `type` to match the external schema.
    #[serde(rename = "type")]
    pub kind: DivinationType,
    pub question: String,
    pub input: String,
    pub result: String,
    pub ai_analysis: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
    pub is_deleted: bool,
}

impl DivinationRecord {
    /// Creates a new active record with a generated id.
    ///
    /// `payload` is stored in both `input` and `result`.
    pub fn new(
        owner_id: OwnerId,
        kind: DivinationType,
        question: impl Into<String>,
        payload: impl Into<String>,
        ai_analysis: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        let payload = payload.into();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            kind,
            question: question.into(),
            input: payload.clone(),
            result: payload,
            ai_analysis: ai_analysis.into(),
            created_at: now_ms,
            updated_at: now_ms,
            is_deleted: false,
        }
    }
}
