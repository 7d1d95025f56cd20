//! Runner configuration.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;

/// How a cancel request on a looping tween is honored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Finish the stage in progress, then stop.
    #[default]
    AtStageBoundary,
    /// Stop on the spot.
    Immediate,
}

/// Keep this small; every field has a default so partial JSON works.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Global multiplier applied to every dt passed to `Runner::update`.
    pub time_scale: f32,
    pub cancel_policy: CancelPolicy,
    /// Curve used by stored timelines that omit `trans`/`ease`.
    pub default_curve: Curve,
    /// Events beyond this count in one tick are dropped (with a warning).
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            cancel_policy: CancelPolicy::AtStageBoundary,
            default_curve: Curve::default(),
            max_events_per_tick: 1024,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
