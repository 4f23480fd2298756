//! Daily fortune use-case service.
//!
//! # Responsibility
//! - Return today's fortune for an owner, generating it at most once.
//! - List an owner's fortunes within a date range.
//!
//! # Invariants
//! - An existing record for today is returned unchanged with no analysis call.
//! - Scores are independent uniform draws in `0..=100`.
//! - `analysis` and `suggestions` hold the same completion text.
//! - An analysis failure persists nothing.

use super::error::{ServiceError, StorageAction};
use crate::analysis::{fortune_prompt, AnalysisClient};
use crate::effects::{Effects, RandomSource};
use crate::model::fortune::{FortuneRecord, FortuneScores, MAX_SCORE};
use crate::model::OwnerId;
use crate::repo::fortune_repo::FortuneRepository;
use chrono::NaiveDate;
use log::{error, info};
use std::time::Instant;

/// Fortune service over injected storage, analysis and effects.
pub struct FortuneService<R: FortuneRepository, A: AnalysisClient> {
    repo: R,
    analysis: A,
    effects: Effects,
}

impl<R: FortuneRepository, A: AnalysisClient> FortuneService<R, A> {
    pub fn new(repo: R, analysis: A, effects: Effects) -> Self {
        Self {
            repo,
            analysis,
            effects,
        }
    }

    /// Returns the owner's fortune for the clock's current calendar day.
    ///
    /// # Errors
    /// - `Analysis` when the completion call fails.
    /// - `Storage` when the lookup or insert fails.
    pub fn calculate_today(&self, owner_id: OwnerId) -> Result<FortuneRecord, ServiceError> {
        let started_at = Instant::now();
        let today = self.effects.clock.now().date_naive();

        match self.calculate_for(owner_id, today) {
            Ok((record, generated)) => {
                info!(
                    "event=fortune_today module=service status=ok owner_id={} date={} generated={} record_id={} duration_ms={}",
                    owner_id,
                    today,
                    generated,
                    record.id,
                    started_at.elapsed().as_millis()
                );
                Ok(record)
            }
            Err(err) => {
                error!(
                    "event=fortune_today module=service status=error owner_id={} date={} duration_ms={} error_code={} error={}",
                    owner_id,
                    today,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Fortunes dated `start..=end`, newest first. `start > end` is empty.
    pub fn list_by_owner_in_range(
        &self,
        owner_id: OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FortuneRecord>, ServiceError> {
        self.repo
            .list_fortunes_in_range(owner_id, start, end)
            .map_err(ServiceError::storage(StorageAction::LoadFortuneHistory))
    }

    /// Returns the stored record and whether this call generated it.
    fn calculate_for(
        &self,
        owner_id: OwnerId,
        date: NaiveDate,
    ) -> Result<(FortuneRecord, bool), ServiceError> {
        let existing = self
            .repo
            .find_fortune(owner_id, date)
            .map_err(ServiceError::storage(StorageAction::LoadFortune))?;
        if let Some(record) = existing {
            return Ok((record, false));
        }

        let scores = generate_scores(self.effects.random.as_ref());
        let text = self.analysis.complete(&fortune_prompt(&scores))?;

        let now_ms = self.effects.clock.now().timestamp_millis();
        let record = FortuneRecord::new(owner_id, date, scores, text.clone(), text, now_ms);
        let stored = self
            .repo
            .create_fortune(&record)
            .map_err(ServiceError::storage(StorageAction::SaveFortune))?;

        // A concurrent request may have won the insert; its row is returned.
        let generated = stored.id == record.id;
        Ok((stored, generated))
    }
}

/// Draws the five scores in overall/love/career/health/wealth order.
pub fn generate_scores(random: &dyn RandomSource) -> FortuneScores {
    let draw = || random.below(usize::from(MAX_SCORE) + 1) as u8;
    FortuneScores {
        overall: draw(),
        love: draw(),
        career: draw(),
        health: draw(),
        wealth: draw(),
    }
}
