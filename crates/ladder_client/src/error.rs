use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LadderClientError {
    #[error("ladder mode must not be empty")]
    InvalidMode,
    #[error("ladder backend does not know mode '{mode}'")]
    UnknownMode { mode: String },
    #[error("ladder backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to reach ladder backend: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed ladder response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid ladder url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("ladder backend error: {0}")]
    Backend(String),
}

impl LadderClientError {
    /// Maps a non-success response to an error, preferring the backend's
    /// structured error body when it sent one.
    pub fn from_response(mode: &str, status: u16, body: &str) -> Self {
        let api_error = serde_json::from_str::<ApiError>(body).ok();
        let unknown_mode = status == 404
            || matches!(
                api_error.as_ref().map(|err| err.code),
                Some(ErrorCode::UnknownMode)
            );
        if unknown_mode {
            return Self::UnknownMode {
                mode: mode.to_string(),
            };
        }

        let message = match api_error {
            Some(err) => err.message,
            None if body.trim().is_empty() => "empty response body".to_string(),
            None => body.trim().chars().take(200).collect(),
        };
        Self::Status { status, message }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}
