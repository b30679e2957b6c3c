use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a profile fetch failed. Kept for diagnostics only; every variant is
/// presented to the viewer as the same not-found page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed profile body: {0}")]
    Decode(String),
    #[error("no profile source configured")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("profile '{username}' unavailable: {failure}")]
pub struct ProfileUnavailable {
    pub username: String,
    pub failure: FetchFailure,
}

impl ProfileUnavailable {
    pub fn new(username: impl Into<String>, failure: FetchFailure) -> Self {
        Self {
            username: username.into(),
            failure,
        }
    }

    pub fn is_not_found_status(&self) -> bool {
        self.failure == FetchFailure::Status(404)
    }
}
