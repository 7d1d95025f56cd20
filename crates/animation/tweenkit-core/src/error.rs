//! Construction-time errors. Running tweens never fail; see
//! [`crate::diagnostics`] for runtime anomalies.

use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TweenError {
    #[error("step '{property}': start is {from:?} but end is {to:?}")]
    KindMismatch {
        property: String,
        from: ValueKind,
        to: ValueKind,
    },
    #[error("target is no longer valid")]
    InvalidTarget,
    #[error("target has no readable property '{0}'")]
    MissingProperty(String),
    #[error("timeline parse error: {0}")]
    Parse(String),
}

/// A curve token that does not name a known family or direction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveParseError {
    #[error("unknown curve family '{0}'")]
    UnknownFamily(String),
    #[error("unknown ease direction '{0}'")]
    UnknownDirection(String),
}
