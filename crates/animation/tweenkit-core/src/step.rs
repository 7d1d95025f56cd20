//! A single property interpolation.

use crate::curve::{evaluate, Curve};
use crate::diagnostics::Diagnostic;
use crate::error::TweenError;
use crate::interp::lerp_value;
use crate::target::TargetRef;
use crate::value::Value;

/// Interpolates one property of one target from `from` to `to` over
/// `duration` seconds. Immutable once built.
#[derive(Clone, Debug)]
pub struct PropertyStep {
    target: TargetRef,
    property: String,
    from: Value,
    to: Value,
    duration: f32,
    curve: Curve,
    degenerate: Option<Diagnostic>,
}

impl PropertyStep {
    /// Build a step. `from` and `to` must be the same value kind. A negative
    /// or non-finite duration is treated as 0 (the step completes on the
    /// first poll) and recorded as a diagnostic.
    pub fn new(
        target: TargetRef,
        property: impl Into<String>,
        from: Value,
        to: Value,
        duration: f32,
        curve: Curve,
    ) -> Result<Self, TweenError> {
        let property = property.into();
        if from.kind() != to.kind() {
            return Err(TweenError::KindMismatch {
                property,
                from: from.kind(),
                to: to.kind(),
            });
        }
        let degenerate = if duration.is_finite() && duration > 0.0 {
            None
        } else {
            let d = Diagnostic::DegenerateDuration {
                property: property.clone(),
                requested: duration,
            };
            d.report();
            Some(d)
        };
        let duration = if degenerate.is_some() { 0.0 } else { duration };
        Ok(Self {
            target,
            property,
            from,
            to,
            duration,
            curve,
            degenerate,
        })
    }

    /// Build a step whose start value is the target's current value.
    pub fn from_current(
        target: TargetRef,
        property: impl Into<String>,
        to: Value,
        duration: f32,
        curve: Curve,
    ) -> Result<Self, TweenError> {
        let property = property.into();
        if !target.is_valid() {
            return Err(TweenError::InvalidTarget);
        }
        let from = target
            .read(&property)
            .ok_or_else(|| TweenError::MissingProperty(property.clone()))?;
        Self::new(target, property, from, to, duration, curve)
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn from(&self) -> Value {
        self.from
    }

    pub fn to(&self) -> Value {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Set when the requested duration was <= 0 or not finite.
    pub fn degenerate(&self) -> Option<&Diagnostic> {
        self.degenerate.as_ref()
    }

    /// Value after `elapsed` seconds into this step. Once the step is done
    /// the exact end value is returned.
    pub fn value_at(&self, elapsed: f32) -> Value {
        if self.duration <= 0.0 || elapsed >= self.duration {
            return self.to;
        }
        let t = (elapsed / self.duration).min(1.0);
        lerp_value(&self.from, &self.to, evaluate(self.curve, t))
    }
}
