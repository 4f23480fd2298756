#![allow(dead_code)]

use chrono::DateTime;
use std::cell::{Cell, RefCell};
use yijing_core::{AnalysisClient, AnalysisError, Effects, FixedClock, SeededRandom};

/// Analysis double that records prompts and returns a fixed reply.
pub struct ScriptedAnalysis {
    reply: Option<String>,
    calls: Cell<usize>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedAnalysis {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: Cell::new(0),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Cell::new(0),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.borrow().last().cloned()
    }
}

impl AnalysisClient for ScriptedAnalysis {
    fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone().ok_or(AnalysisError::EmptyResponse)
    }
}

/// Frozen clock plus seeded randomness at an RFC 3339 instant.
pub fn effects_at(rfc3339: &str, seed: u64) -> Effects {
    let now = DateTime::parse_from_rfc3339(rfc3339).unwrap();
    Effects::new(FixedClock::new(now), SeededRandom::new(seed))
}

pub fn count_rows(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
