//! painel-assist: ask a chat-completion service questions about a loaded dataset.

pub mod client;
pub mod credential;
pub mod prompt;
pub mod session;
pub mod transport;

pub use client::{AnswerResult, AnsweringClient, AssistConfig};
pub use credential::Credential;
pub use prompt::{build_request, ChatMessage, CompletionRequest};
pub use session::{Session, Submission};
pub use transport::{HttpReply, HttpTransport, Transport, TransportError};
