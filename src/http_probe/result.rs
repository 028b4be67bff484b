use std::fmt;

use chrono::{DateTime, Local};

use super::status::{UNREACHABLE_DESCRIPTION, describe};

/// Why a probe did not receive an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// No response within the configured timeout.
    Timeout,
    /// Connection refused, name resolution failure or similar.
    Connect,
    /// The URL could not be parsed, even after adding a scheme.
    InvalidUrl,
    /// Any other transport error.
    Transport(String),
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Timeout => write!(f, "timed out"),
            ProbeFailure::Connect => write!(f, "connection failed"),
            ProbeFailure::InvalidUrl => write!(f, "invalid url"),
            ProbeFailure::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Responded {
        status: u16,
        last_modified: Option<String>,
    },
    Unreachable(ProbeFailure),
}

/// The outcome of probing one URL during one check run.
///
/// A status code exists exactly when a response was received; both are
/// derived from the same [`ProbeOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    url: String,
    outcome: ProbeOutcome,
    status_description: String,
    checked_at: DateTime<Local>,
}

impl ProbeResult {
    pub fn responded(
        url: impl Into<String>,
        status: u16,
        last_modified: Option<String>,
        checked_at: DateTime<Local>,
    ) -> Self {
        Self {
            url: url.into(),
            outcome: ProbeOutcome::Responded {
                status,
                last_modified,
            },
            status_description: describe(status).to_string(),
            checked_at,
        }
    }

    pub fn unreachable(
        url: impl Into<String>,
        failure: ProbeFailure,
        checked_at: DateTime<Local>,
    ) -> Self {
        Self {
            url: url.into(),
            outcome: ProbeOutcome::Unreachable(failure),
            status_description: UNREACHABLE_DESCRIPTION.to_string(),
            checked_at,
        }
    }

    /// The URL as the user supplied it, before scheme normalization.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn reachable(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Responded { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Responded { status, .. } => Some(status),
            ProbeOutcome::Unreachable(_) => None,
        }
    }

    pub fn last_modified(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Responded { last_modified, .. } => last_modified.as_deref(),
            ProbeOutcome::Unreachable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ProbeFailure> {
        match &self.outcome {
            ProbeOutcome::Unreachable(failure) => Some(failure),
            ProbeOutcome::Responded { .. } => None,
        }
    }

    pub fn status_description(&self) -> &str {
        &self.status_description
    }

    pub fn checked_at(&self) -> DateTime<Local> {
        self.checked_at
    }
}
