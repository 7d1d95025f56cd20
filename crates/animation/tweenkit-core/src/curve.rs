//! Easing curves: a shape family crossed with an ease direction.
//!
//! Every family is defined by its "in" shape; "out" and "in-out" are derived
//! from it by reflection, except the Elastic and Back in-out curves which
//! follow Penner's dedicated formulas. All 33 combinations share the same
//! endpoint guarantees: progress is exactly 0 at t = 0 and exactly 1 at t = 1.
//! Elastic, Back and Bounce may leave [0, 1] in between and are not clamped.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::error::CurveParseError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Linear,
    #[default]
    Sine,
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Exponential,
    Circular,
    Elastic,
    Back,
    Bounce,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
    #[default]
    InOut,
}

/// A (family, direction) pair. Internal code only ever sees this type;
/// string tokens are resolved once at the boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Curve {
    pub family: Family,
    pub direction: Direction,
}

impl Family {
    pub const ALL: [Family; 11] = [
        Family::Linear,
        Family::Sine,
        Family::Quadratic,
        Family::Cubic,
        Family::Quartic,
        Family::Quintic,
        Family::Exponential,
        Family::Circular,
        Family::Elastic,
        Family::Back,
        Family::Bounce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Linear => "linear",
            Family::Sine => "sine",
            Family::Quadratic => "quadratic",
            Family::Cubic => "cubic",
            Family::Quartic => "quartic",
            Family::Quintic => "quintic",
            Family::Exponential => "exponential",
            Family::Circular => "circular",
            Family::Elastic => "elastic",
            Family::Back => "back",
            Family::Bounce => "bounce",
        }
    }

    /// The "in" shape of this family for t in (0, 1).
    fn ease_in(&self, t: f32) -> f32 {
        match self {
            Family::Linear => t,
            Family::Sine => 1.0 - (t * FRAC_PI_2).cos(),
            Family::Quadratic => t * t,
            Family::Cubic => t * t * t,
            Family::Quartic => t * t * t * t,
            Family::Quintic => t * t * t * t * t,
            Family::Exponential => 2f32.powf(10.0 * t - 10.0),
            Family::Circular => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Family::Elastic => {
                let c4 = (2.0 * PI) / 3.0;
                -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
            }
            Family::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Family::Bounce => 1.0 - bounce_out(1.0 - t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::In, Direction::Out, Direction::InOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "in_out",
        }
    }
}

/// Strip a host-style `trans_` / `ease_` prefix and normalize case.
fn normalize_token(token: &str, prefix: &str) -> String {
    let lower = token.trim().to_ascii_lowercase();
    match lower.strip_prefix(prefix) {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

impl FromStr for Family {
    type Err = CurveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s, "trans_").as_str() {
            "linear" => Ok(Family::Linear),
            "sine" => Ok(Family::Sine),
            "quad" | "quadratic" => Ok(Family::Quadratic),
            "cubic" => Ok(Family::Cubic),
            "quart" | "quartic" => Ok(Family::Quartic),
            "quint" | "quintic" => Ok(Family::Quintic),
            "expo" | "exponential" => Ok(Family::Exponential),
            "circ" | "circular" => Ok(Family::Circular),
            "elastic" => Ok(Family::Elastic),
            "back" => Ok(Family::Back),
            "bounce" => Ok(Family::Bounce),
            _ => Err(CurveParseError::UnknownFamily(s.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = CurveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s, "ease_").as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "in_out" | "inout" | "in-out" => Ok(Direction::InOut),
            _ => Err(CurveParseError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family.as_str(), self.direction.as_str())
    }
}

impl Curve {
    pub const LINEAR: Curve = Curve::new(Family::Linear, Direction::InOut);

    pub const fn new(family: Family, direction: Direction) -> Self {
        Self { family, direction }
    }

    /// Lenient boundary parser. Unknown family tokens fall back to Sine and
    /// unknown direction tokens to InOut; each fallback is logged.
    pub fn parse(family: &str, direction: &str) -> Self {
        let mut diags = Vec::new();
        let curve = Self::parse_collecting(family, direction, &mut diags);
        for d in &diags {
            d.report();
        }
        curve
    }

    /// Like [`Curve::parse`], but pushes fallback diagnostics into `diags`
    /// instead of logging them.
    pub fn parse_collecting(family: &str, direction: &str, diags: &mut Vec<Diagnostic>) -> Self {
        let family = family.parse().unwrap_or_else(|_| {
            diags.push(Diagnostic::UnrecognizedCurveToken {
                token: family.to_string(),
                fallback: Family::Sine.as_str().to_string(),
            });
            Family::Sine
        });
        let direction = direction.parse().unwrap_or_else(|_| {
            diags.push(Diagnostic::UnrecognizedCurveToken {
                token: direction.to_string(),
                fallback: Direction::InOut.as_str().to_string(),
            });
            Direction::InOut
        });
        Self { family, direction }
    }

    /// Map normalized time to eased progress. See [`evaluate`].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        evaluate(*self, t)
    }
}

/// Map normalized time `t` to eased progress for `curve`.
///
/// `t` is clamped to [0, 1] (NaN counts as 0). The endpoints are exact for
/// every curve; values in between may overshoot for Elastic/Back/Bounce.
pub fn evaluate(curve: Curve, t: f32) -> f32 {
    if !(t > 0.0) {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let f = curve.family;
    match curve.direction {
        Direction::In => f.ease_in(t),
        Direction::Out => 1.0 - f.ease_in(1.0 - t),
        Direction::InOut => match f {
            Family::Elastic => elastic_in_out(t),
            Family::Back => back_in_out(t),
            _ if t < 0.5 => f.ease_in(2.0 * t) / 2.0,
            _ => 1.0 - f.ease_in(2.0 - 2.0 * t) / 2.0,
        },
    }
}

/// Penner's elastic in-out uses a longer period than the mirrored "in" shape.
fn elastic_in_out(t: f32) -> f32 {
    let c5 = (2.0 * PI) / 4.5;
    if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
    } else {
        2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * c5).sin() / 2.0 + 1.0
    }
}

/// Back in-out scales the overshoot by 1.525.
fn back_in_out(t: f32) -> f32 {
    let c2 = 1.70158 * 1.525;
    if t < 0.5 {
        let u = 2.0 * t;
        (u * u * ((c2 + 1.0) * u - c2)) / 2.0
    } else {
        let u = 2.0 * t - 2.0;
        (u * u * ((c2 + 1.0) * u + c2) + 2.0) / 2.0
    }
}
