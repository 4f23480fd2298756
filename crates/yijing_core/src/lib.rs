//! Core domain logic for the yijing divination service.
//! This crate is the single source of truth for divination and fortune
//! invariants.

pub mod analysis;
pub mod chart;
pub mod config;
pub mod db;
pub mod deck;
pub mod effects;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analysis::{AnalysisClient, AnalysisError, ChatCompletionClient};
pub use config::{AppConfig, ConfigError};
pub use effects::{
    Clock, Effects, FixedClock, RandomSource, SeededRandom, SystemClock, ThreadRandom,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::divination::{DivinationRecord, DivinationResult, DivinationType};
pub use model::fortune::{FortuneRecord, FortuneScores};
pub use model::{OwnerId, RecordId};
pub use repo::divination_repo::{DivinationRepository, SqliteDivinationRepository};
pub use repo::fortune_repo::{FortuneRepository, SqliteFortuneRepository};
pub use repo::{RepoError, RepoResult};
pub use service::divination_service::{CreateDivinationRequest, DivinationService};
pub use service::error::{ServiceError, StorageAction, ValidationError};
pub use service::fortune_service::FortuneService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
