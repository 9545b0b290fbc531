//! Error types for SliceVote.
//!
//! Library crates use [`SliceVoteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::Verb;

/// Top-level error type for all SliceVote operations.
#[derive(Debug, thiserror::Error)]
pub enum SliceVoteError {
    /// A resource object was passed as a reference but carried no self link.
    #[error("invalid resource reference: {detail}")]
    InvalidReference { detail: String },

    /// Network/HTTP failure without a parseable structured error body.
    #[error("transport error in {verb}: {message}")]
    Transport { verb: Verb, message: String },

    /// The backend answered with a structured `{message, path}` error body.
    #[error("backend error in {verb} {path}: {message}")]
    Backend {
        verb: Verb,
        status: u16,
        path: String,
        message: String,
    },

    /// Request body or response JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SliceVoteError>;

impl SliceVoteError {
    /// Create an invalid-reference error from any displayable detail.
    pub fn invalid_reference(detail: impl Into<String>) -> Self {
        Self::InvalidReference {
            detail: detail.into(),
        }
    }

    /// Create a transport error for the given verb.
    pub fn transport(verb: Verb, message: impl Into<String>) -> Self {
        Self::Transport {
            verb,
            message: message.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SliceVoteError::config("missing base URL");
        assert_eq!(err.to_string(), "config error: missing base URL");

        let err = SliceVoteError::Backend {
            verb: Verb::Patch,
            status: 403,
            path: "/vote/freeze".into(),
            message: "team is frozen".into(),
        };
        assert_eq!(
            err.to_string(),
            "backend error in PATCH /vote/freeze: team is frozen"
        );
    }

    #[test]
    fn invalid_reference_display() {
        let err = SliceVoteError::invalid_reference("resource has no self link");
        assert!(err.to_string().contains("no self link"));
    }
}
