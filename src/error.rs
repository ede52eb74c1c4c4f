//! Error types shared by the library surface

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Audio output unavailable: {message}")]
    AudioUnavailable { message: String },
}

impl Error {
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn audio_unavailable(message: impl Into<String>) -> Self {
        Self::AudioUnavailable {
            message: message.into(),
        }
    }
}
