//! Per-session state: the loaded dataset plus its running transcript.
//!
//! A submission moves Idle -> Submitted -> {Success, TransportFailure,
//! ParseFailure} -> Idle. Blank questions never leave Idle.

use painel_core::{Conversation, Dataset};
use tracing::debug;

use crate::client::{AnswerResult, AnsweringClient};
use crate::credential::Credential;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank or whitespace-only question: no request, no transcript entry.
    Rejected,
    Answered(AnswerResult),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Dataset,
    conversation: Conversation,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            conversation: Conversation::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// A new upload replaces the dataset wholesale; the transcript stays.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    /// Session reset: drop the transcript.
    pub fn reset(&mut self) {
        self.conversation.clear();
    }

    /// Ask `question` and record the outcome, failures included.
    pub fn submit<T: Transport>(
        &mut self,
        question: &str,
        credential: &Credential,
        client: &AnsweringClient<T>,
    ) -> Submission {
        if question.trim().is_empty() {
            debug!("blank question rejected");
            return Submission::Rejected;
        }

        let result = client.ask(&self.dataset, question, credential);
        self.conversation.record(question, result.transcript_text());
        Submission::Answered(result)
    }
}
