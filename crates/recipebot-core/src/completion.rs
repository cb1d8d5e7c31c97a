//! LLM completion client interface.
//!
//! The completion provider is an opaque collaborator: rendered prompt text in,
//! generated text out. Failures are returned as values so callers can decide
//! how to present them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by a [`CompletionClient`].
///
/// The `Display` text is what end users see after the `"Error: "` prefix, so
/// messages never include credentials.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("{message}")]
    Request { message: String, is_retryable: bool },

    /// The provider answered with a non-success status.
    #[error("completion API returned {status}: {message}")]
    Http {
        status: u16,
        message: String,
        is_retryable: bool,
    },

    /// The provider answered successfully but without any text.
    #[error("completion API returned no content in the response")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("failed to parse completion response: {0}")]
    Parse(String),

    /// The prompt template could not be rendered.
    #[error("failed to render prompt: {0}")]
    Prompt(String),
}

impl CompletionError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { is_retryable, .. } | Self::Http { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

/// A text-completion backend.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Short identifier of the model answering requests (for logs and UI).
    fn model(&self) -> &str;

    /// Sends a fully rendered prompt and returns the generated text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
