//! Bridge setup errors and the fetch failure value published to the view.

use ladder_client::LadderClientError;
use shared::domain::LadderMode;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no tokio runtime available for ladder fetches: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("failed to build ladder backend runtime: {0}")]
    RuntimeBuild(#[source] std::io::Error),
}

/// Coarse display grouping of a failed fetch. The controller handles every
/// category the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Transport,
    UnknownMode,
    Malformed,
    Unavailable,
    Unknown,
}

/// Outcome of a failed ladder fetch, kept as the bridge's error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ladder fetch for '{mode}' failed: {message}")]
pub struct FetchFailure {
    mode: LadderMode,
    category: FailureCategory,
    message: String,
}

impl FetchFailure {
    pub fn new(mode: LadderMode, category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            mode,
            category,
            message: message.into(),
        }
    }

    pub fn from_client_error(mode: &LadderMode, err: &LadderClientError) -> Self {
        let category = match err {
            LadderClientError::Transport(_) => FailureCategory::Transport,
            LadderClientError::InvalidMode | LadderClientError::UnknownMode { .. } => {
                FailureCategory::UnknownMode
            }
            LadderClientError::Decode(_) => FailureCategory::Malformed,
            LadderClientError::Status { status, .. }
                if matches!(*status, 429 | 502 | 503 | 504) =>
            {
                FailureCategory::Unavailable
            }
            LadderClientError::Status { .. }
            | LadderClientError::InvalidUrl { .. }
            | LadderClientError::Backend(_) => FailureCategory::Unknown,
        };
        Self::new(mode.clone(), category, err.to_string())
    }

    pub fn from_join_error(mode: &LadderMode, err: &JoinError) -> Self {
        let message = if err.is_panic() {
            "ladder client panicked while fetching".to_string()
        } else {
            "ladder fetch task was cancelled".to_string()
        };
        Self::new(mode.clone(), FailureCategory::Unknown, message)
    }

    pub fn mode(&self) -> &LadderMode {
        &self.mode
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short text suitable for a status line in the front end.
    pub fn user_message(&self) -> String {
        match self.category {
            FailureCategory::Transport => {
                "Ladder server unreachable; check your connection and retry.".to_string()
            }
            FailureCategory::UnknownMode => format!("No ladder exists for mode '{}'.", self.mode),
            FailureCategory::Malformed => {
                "The ladder server sent data the launcher could not read.".to_string()
            }
            FailureCategory::Unavailable => {
                "The ladder is temporarily unavailable; retry shortly.".to_string()
            }
            FailureCategory::Unknown => format!("Ladder fetch failed: {}", self.message),
        }
    }
}
