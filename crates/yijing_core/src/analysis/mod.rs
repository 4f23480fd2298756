//! Natural-language analysis delegated to an external chat-completion API.
//!
//! # Responsibility
//! - Build the fixed prompts sent for divinations and daily fortunes.
//! - Define the `AnalysisClient` boundary and its HTTP implementation.
//!
//! # Invariants
//! - Returned text is opaque to the core; it is stored, never parsed.
//! - Failures are returned to the caller unchanged; nothing retries.

pub mod client;
pub mod prompt;

pub use client::{AnalysisClient, AnalysisError, ChatCompletionClient};
pub use prompt::{divination_prompt, fortune_prompt};
