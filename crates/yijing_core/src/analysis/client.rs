//! Analysis client boundary and the OpenAI-compatible HTTP implementation.
//!
//! # Invariants
//! - One request per call, single user message, no conversation state.
//! - No retry and no fallback text.
//! - Prompt and completion text are never logged.

use crate::config::AnalysisConfig;
use log::{error, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Failure of one completion call.
#[derive(Debug)]
pub enum AnalysisError {
    /// The configured API key environment variable is unset or empty.
    MissingApiKey(String),
    Transport(reqwest::Error),
    Status {
        status: u16,
        body: String,
    },
    Decode(reqwest::Error),
    /// The response carried no choice with message content.
    EmptyResponse,
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey(var) => write!(f, "analysis API key not set in `{var}`"),
            Self::Transport(err) => write!(f, "analysis request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "analysis service returned status {status}: {body}")
            }
            Self::Decode(err) => write!(f, "invalid analysis response: {err}"),
            Self::EmptyResponse => write!(f, "analysis response contained no choices"),
        }
    }
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) | Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// Single-turn text completion.
pub trait AnalysisClient {
    fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}

impl<T: AnalysisClient + ?Sized> AnalysisClient for &T {
    fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        (**self).complete(prompt)
    }
}

impl<T: AnalysisClient + ?Sized> AnalysisClient for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        (**self).complete(prompt)
    }
}

/// Blocking client for `POST {base_url}/chat/completions`.
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionClient {
    /// Builds a client reading the API key from `config.api_key_env`.
    ///
    /// # Errors
    /// - `MissingApiKey` when the variable is unset or blank.
    /// - `Transport` when the HTTP client cannot be built.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AnalysisError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(
        config: &AnalysisConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, AnalysisError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AnalysisError::Transport)?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn send(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(AnalysisError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().map_err(AnalysisError::Decode)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AnalysisError::EmptyResponse)
    }
}

impl AnalysisClient for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let started_at = Instant::now();
        info!(
            "event=analysis_complete module=analysis status=start model={} prompt_chars={}",
            self.model,
            prompt.chars().count()
        );

        match self.send(prompt) {
            Ok(text) => {
                info!(
                    "event=analysis_complete module=analysis status=ok model={} duration_ms={} text_chars={}",
                    self.model,
                    started_at.elapsed().as_millis(),
                    text.chars().count()
                );
                Ok(text)
            }
            Err(err) => {
                error!(
                    "event=analysis_complete module=analysis status=error model={} duration_ms={} error={}",
                    self.model,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
