//! Document lookup error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or reading a topic
#[derive(Debug, Error)]
pub enum DocError {
    #[error("No documentation found for topic '{topic}'")]
    NotFound { topic: String },

    #[error("Invalid topic '{topic}': {reason}")]
    InvalidTopic { topic: String, reason: &'static str },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 1,
            Self::InvalidTopic { .. } => 2,
            Self::Io { .. } => 3,
        }
    }
}
