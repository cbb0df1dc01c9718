//! The answering client: one dataset, one question, one outcome value.

use std::error::Error as _;
use std::fmt;

use painel_core::Dataset;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::credential::Credential;
use crate::prompt::{build_request, DEFAULT_SYSTEM_PROMPT};
use crate::transport::{Transport, TransportError};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";

const PARSE_FAILURE_TEXT: &str = "error processing the completion response";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub system_prompt: String,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Outcome of one `ask`. Failures are values, never panics or `Err`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    Success(String),
    /// Network error or non-2xx status, with a human-readable cause.
    TransportFailure(String),
    /// A reply arrived but had no `choices[0].message.content`.
    ParseFailure,
}

impl AnswerResult {
    /// What goes into the transcript as the answer for this turn.
    pub fn transcript_text(&self) -> String {
        match self {
            AnswerResult::Success(text) => text.clone(),
            AnswerResult::TransportFailure(msg) => msg.clone(),
            AnswerResult::ParseFailure => PARSE_FAILURE_TEXT.to_string(),
        }
    }
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.transcript_text())
    }
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a response body.
pub(crate) fn extract_answer(body: &str) -> Option<String> {
    let out: Resp = serde_json::from_str(body).ok()?;
    let content = out.choices.into_iter().next()?.message.content?;
    Some(content)
}

fn describe(err: &TransportError) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

pub struct AnsweringClient<T: Transport> {
    config: AssistConfig,
    transport: T,
}

impl<T: Transport> AnsweringClient<T> {
    pub fn new(config: AssistConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Ask one question about `dataset`. Single attempt; blocks until the
    /// endpoint answers or the transport gives up.
    ///
    /// The question is sent as given, blank or not. Interactive callers go
    /// through [`Session::submit`](crate::Session::submit), which turns
    /// blank input away before any request is made.
    pub fn ask(&self, dataset: &Dataset, question: &str, credential: &Credential) -> AnswerResult {
        let request = build_request(dataset, question, &self.config);
        info!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            records = dataset.len(),
            "asking completion endpoint"
        );

        let reply = match self
            .transport
            .post_json(&self.config.endpoint, credential, &request)
        {
            Ok(r) => r,
            Err(e) => {
                let cause = describe(&e);
                warn!(error = %cause, "completion request failed");
                return AnswerResult::TransportFailure(format!(
                    "error connecting to the completion endpoint: {cause}"
                ));
            }
        };

        if !reply.is_success() {
            warn!(status = reply.status, "completion endpoint returned an error status");
            return AnswerResult::TransportFailure(format!(
                "error connecting to the completion endpoint: HTTP {} {}",
                reply.status,
                reply.body.trim()
            ));
        }

        match extract_answer(&reply.body) {
            Some(answer) => AnswerResult::Success(answer),
            None => {
                warn!(bytes = reply.body.len(), "completion response had no answer");
                AnswerResult::ParseFailure
            }
        }
    }
}
