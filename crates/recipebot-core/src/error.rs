//! Error types for the RecipeBot application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::completion::CompletionError;

/// A shared error type for the entire RecipeBot application.
///
/// Per-request LLM failures are carried as [`CompletionError`] and are
/// normally turned into chat text by the router; the remaining variants
/// surface at startup or at the transport layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RecipeBotError {
    /// Configuration error (missing credential, unparseable setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Completion API failure
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecipeBotError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a completion error
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}

/// A type alias for `Result<T, RecipeBotError>`.
pub type Result<T> = std::result::Result<T, RecipeBotError>;
