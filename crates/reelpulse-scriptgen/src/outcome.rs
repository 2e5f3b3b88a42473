//! Result of a fallback-capable generation call.

use serde::Serialize;

/// Where a generated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fallback,
}

/// Generated content, tagged with whether the backend produced it or the
/// local fallback stood in.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Remote(T),
    /// The backend call failed; `reason` is the error that triggered the
    /// substitute.
    Fallback { data: T, reason: String },
}

impl<T> Generated<T> {
    #[must_use]
    pub fn data(&self) -> &T {
        match self {
            Generated::Remote(data) | Generated::Fallback { data, .. } => data,
        }
    }

    #[must_use]
    pub fn into_data(self) -> T {
        match self {
            Generated::Remote(data) | Generated::Fallback { data, .. } => data,
        }
    }

    #[must_use]
    pub fn source(&self) -> Source {
        match self {
            Generated::Remote(_) => Source::Remote,
            Generated::Fallback { .. } => Source::Fallback,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback { .. })
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Generated::Remote(_) => None,
            Generated::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Split into the payload and the fallback reason, if any.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Generated::Remote(data) => (data, None),
            Generated::Fallback { data, reason } => (data, Some(reason)),
        }
    }
}
