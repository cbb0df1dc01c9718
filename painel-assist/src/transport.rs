//! The blocking boundary between the answering client and the network.
//!
//! One call is one POST: no retries, and no timeout beyond what the
//! underlying HTTP client applies by default.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;

use crate::credential::Credential;
use crate::prompt::CompletionRequest;

/// Status and raw body of whatever the endpoint sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub trait Transport {
    /// POST `body` as JSON to `url` with `Authorization: Bearer <credential>`.
    fn post_json(
        &self,
        url: &str,
        credential: &Credential,
        body: &CompletionRequest,
    ) -> Result<HttpReply, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        // Each blocking call may run on a fresh runtime; pooled connections
        // must not outlive the runtime that opened them.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }

    async fn post_json_async(
        &self,
        url: &str,
        credential: &Credential,
        body: &CompletionRequest,
    ) -> Result<HttpReply, TransportError> {
        let resp = self
            .client
            .post(url)
            .header(AUTHORIZATION, credential.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(status, bytes = body.len(), "completion endpoint replied");
        Ok(HttpReply { status, body })
    }
}

impl HttpTransport {
    fn post_on_own_runtime(
        &self,
        url: &str,
        credential: &Credential,
        body: &CompletionRequest,
    ) -> Result<HttpReply, TransportError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;
        rt.block_on(self.post_json_async(url, credential, body))
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        credential: &Credential,
        body: &CompletionRequest,
    ) -> Result<HttpReply, TransportError> {
        // A nested block_on panics inside a runtime, and block_in_place only
        // works on the multi-threaded flavor. A current-thread runtime gets a
        // scoped helper thread with its own runtime instead.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.post_json_async(url, credential, body)))
            }
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.post_on_own_runtime(url, credential, body))
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            }),
            Err(_) => self.post_on_own_runtime(url, credential, body),
        }
    }
}
