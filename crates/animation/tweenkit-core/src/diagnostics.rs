//! Non-fatal anomalies observed while building or running tweens.
//!
//! None of these change control flow: an invalid target terminates its
//! sequence silently, a degenerate duration completes immediately and an
//! unknown curve token falls back to a default. They are logged and kept so
//! hosts can surface them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A target failed its liveness check before a write.
    InvalidTarget { property: Option<String> },
    /// A step was requested with a duration <= 0 (or non-finite).
    DegenerateDuration { property: String, requested: f32 },
    /// A curve token was not recognized and `fallback` was used.
    UnrecognizedCurveToken { token: String, fallback: String },
}

impl Diagnostic {
    /// Log through the `log` facade. Invalid targets and zero durations are
    /// expected during normal teardown, so they stay at debug level.
    pub fn report(&self) {
        match self {
            Diagnostic::UnrecognizedCurveToken { .. } => log::warn!("{self}"),
            Diagnostic::InvalidTarget { .. } | Diagnostic::DegenerateDuration { .. } => {
                log::debug!("{self}")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidTarget { property: Some(p) } => {
                write!(f, "target no longer valid while writing '{p}'; sequence terminated")
            }
            Diagnostic::InvalidTarget { property: None } => {
                write!(f, "target no longer valid; sequence terminated")
            }
            Diagnostic::DegenerateDuration {
                property,
                requested,
            } => write!(
                f,
                "step '{property}' has duration {requested}; completing immediately"
            ),
            Diagnostic::UnrecognizedCurveToken { token, fallback } => {
                write!(f, "unrecognized curve token '{token}', using '{fallback}'")
            }
        }
    }
}
