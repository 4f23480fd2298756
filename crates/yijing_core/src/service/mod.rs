//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate computation, analysis and persistence per request.
//! - Keep callers decoupled from storage and HTTP details.
//!
//! Collaborators are passed at construction; nothing reads process-wide
//! state.

pub mod divination_service;
pub mod error;
pub mod fortune_service;
