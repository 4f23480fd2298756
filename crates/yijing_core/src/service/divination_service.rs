//! Divination use-case service.
//!
//! # Responsibility
//! - Validate divination requests and compute the type-specific result.
//! - Fetch the analysis text and persist the resulting record.
//!
//! # Invariants
//! - Validation failures touch neither the analysis client nor storage.
//! - An analysis failure aborts before anything is persisted.
//! - The serialized result is stored as both `input` and `result`.

use super::error::{ServiceError, StorageAction, ValidationError};
use crate::analysis::{divination_prompt, AnalysisClient};
use crate::chart::{calculate_reading, parse_birth_time};
use crate::deck::{draw_reading, three_card_spread};
use crate::effects::Effects;
use crate::model::divination::{
    DivinationRecord, DivinationResult, DivinationType, HexagramReading, ZodiacReading,
};
use crate::model::{OwnerId, RecordId};
use crate::repo::divination_repo::DivinationRepository;
use log::{error, info};
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;

const HEXAGRAM_COUNT: usize = 64;
const LINE_COUNT: usize = 6;

/// Request to create one divination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateDivinationRequest {
    /// Raw type name; validated against the closed set.
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
    /// Birth time for bazi, sign for zodiac, ignored otherwise.
    #[serde(default)]
    pub input: Option<Value>,
}

impl CreateDivinationRequest {
    pub fn new(kind: impl Into<String>, question: impl Into<String>, input: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            question: question.into(),
            input,
        }
    }
}

/// Divination service over injected storage, analysis and effects.
pub struct DivinationService<R: DivinationRepository, A: AnalysisClient> {
    repo: R,
    analysis: A,
    effects: Effects,
}

impl<R: DivinationRepository, A: AnalysisClient> DivinationService<R, A> {
    pub fn new(repo: R, analysis: A, effects: Effects) -> Self {
        Self {
            repo,
            analysis,
            effects,
        }
    }

    /// Creates and persists one divination record for `owner_id`.
    ///
    /// # Errors
    /// - `Validation` for an unknown type, blank question or bad input.
    /// - `Analysis` when the completion call fails.
    /// - `Storage` with "failed to save record" when the insert fails.
    pub fn create(
        &self,
        owner_id: OwnerId,
        request: &CreateDivinationRequest,
    ) -> Result<DivinationRecord, ServiceError> {
        let started_at = Instant::now();
        match self.create_inner(owner_id, request) {
            Ok(record) => {
                info!(
                    "event=divination_create module=service status=ok owner_id={} type={} record_id={} duration_ms={}",
                    owner_id,
                    record.kind,
                    record.id,
                    started_at.elapsed().as_millis()
                );
                Ok(record)
            }
            Err(err) => {
                error!(
                    "event=divination_create module=service status=error owner_id={} duration_ms={} error_code={} error={}",
                    owner_id,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Active records for `owner_id`, in insertion order.
    pub fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<DivinationRecord>, ServiceError> {
        self.repo
            .list_divinations_by_owner(owner_id)
            .map_err(ServiceError::storage(StorageAction::LoadHistory))
    }

    /// One active record owned by `owner_id`.
    pub fn get(
        &self,
        owner_id: OwnerId,
        id: RecordId,
    ) -> Result<Option<DivinationRecord>, ServiceError> {
        let record = self
            .repo
            .get_divination(id, false)
            .map_err(ServiceError::storage(StorageAction::LoadRecord))?;
        Ok(record.filter(|record| record.owner_id == owner_id))
    }

    /// Soft-deletes one record owned by `owner_id`.
    ///
    /// Records of other owners and already-deleted records report `NotFound`.
    pub fn soft_delete(&self, owner_id: OwnerId, id: RecordId) -> Result<(), ServiceError> {
        if self.get(owner_id, id)?.is_none() {
            return Err(ServiceError::NotFound(id));
        }

        let now_ms = self.effects.clock.now().timestamp_millis();
        self.repo
            .soft_delete_divination(id, now_ms)
            .map_err(ServiceError::storage(StorageAction::DeleteRecord))?;
        info!(
            "event=divination_delete module=service status=ok owner_id={} record_id={}",
            owner_id, id
        );
        Ok(())
    }

    fn create_inner(
        &self,
        owner_id: OwnerId,
        request: &CreateDivinationRequest,
    ) -> Result<DivinationRecord, ServiceError> {
        let kind = DivinationType::parse(&request.kind)
            .ok_or_else(|| ValidationError::UnsupportedType(request.kind.clone()))?;
        if request.question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let result = self.compute_result(kind, request.input.as_ref())?;

        let prompt = divination_prompt(kind, &request.question);
        let analysis = self.analysis.complete(&prompt)?;

        let payload = serde_json::to_string(&result)?;
        let now_ms = self.effects.clock.now().timestamp_millis();
        let record = DivinationRecord::new(
            owner_id,
            kind,
            request.question.clone(),
            payload,
            analysis,
            now_ms,
        );

        self.repo
            .create_divination(&record)
            .map_err(ServiceError::storage(StorageAction::SaveRecord))?;
        Ok(record)
    }

    fn compute_result(
        &self,
        kind: DivinationType,
        input: Option<&Value>,
    ) -> Result<DivinationResult, ValidationError> {
        let random = self.effects.random.as_ref();
        let result = match kind {
            DivinationType::Tarot => {
                DivinationResult::Tarot(draw_reading(&three_card_spread(), random))
            }
            DivinationType::Bazi => {
                let text = input
                    .and_then(Value::as_str)
                    .ok_or(ValidationError::MissingBirthTime)?;
                let birth = parse_birth_time(text)
                    .map_err(|_| ValidationError::InvalidBirthTime(text.to_string()))?;
                DivinationResult::Bazi(calculate_reading(birth))
            }
            DivinationType::Zodiac => {
                let sign = input
                    .and_then(Value::as_str)
                    .filter(|sign| !sign.trim().is_empty())
                    .ok_or(ValidationError::MissingZodiacSign)?;
                DivinationResult::Zodiac(ZodiacReading {
                    sign: sign.to_string(),
                    date: self.effects.clock.now().format("%Y-%m-%d").to_string(),
                })
            }
            DivinationType::Yijing => DivinationResult::Yijing(HexagramReading {
                hexagram: (random.below(HEXAGRAM_COUNT) + 1) as u8,
                changing_lines: vec![(random.below(LINE_COUNT) + 1) as u8],
            }),
        };
        Ok(result)
    }
}
