use std::{fmt, time::Duration};

use thiserror::Error;

pub type Result<T, E = MatchlensError> = std::result::Result<T, E>;

/// Unified error type covering common failure scenarios across subsystems.
#[derive(Debug, Error)]
pub enum MatchlensError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("operational error: {0}")]
    Ops(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatchlensError {
    /// Returns the provider failure when this error came from a document fetch.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            MatchlensError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

/// The two upstream documents a summary is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    MatchDetails,
    MatchTimeline,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::MatchDetails => f.write_str("match details"),
            DocumentKind::MatchTimeline => f.write_str("match timeline"),
        }
    }
}

/// Failures raised by a match data provider. These are transport or
/// provider conditions and are never folded into "player not in match".
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{document} for match {match_id} not found")]
    NotFound {
        match_id: String,
        document: DocumentKind,
    },
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error("{document} fetch timed out after {elapsed:?}")]
    Timeout {
        document: DocumentKind,
        elapsed: Duration,
    },
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ProviderError::Upstream(message.into())
    }
}
