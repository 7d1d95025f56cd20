use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::curve::Curve;
use crate::diagnostics::Diagnostic;
use crate::error::TweenError;
use crate::step::PropertyStep;
use crate::target::TargetRef;
use crate::timeline::{Stage, Timeline};
use crate::value::Value;

/// Public API: parse a JSON timeline description and bind every step to
/// `target`.
///
/// Notes:
/// - Durations are in seconds.
/// - `trans` / `ease` are host-style curve tokens ("sine", "elastic", "out",
///   "in_out", ...). Unknown tokens fall back (Sine / InOut) and are kept as
///   timeline diagnostics; missing tokens use the config's default curve.
/// - A step without `from` starts from the target's current value, read at
///   parse time.
pub fn parse_stored_timeline_json(s: &str, target: &TargetRef) -> Result<Timeline, TweenError> {
    parse_stored_timeline_json_with(s, target, &Config::default())
}

pub fn parse_stored_timeline_json_with(
    s: &str,
    target: &TargetRef,
    cfg: &Config,
) -> Result<Timeline, TweenError> {
    let stored: StoredTimeline =
        serde_json::from_str(s).map_err(|e| TweenError::Parse(e.to_string()))?;
    stored.into_timeline(target, cfg)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredTimeline {
    #[serde(default)]
    pub name: Option<String>,
    pub stages: Vec<StoredStage>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredStage {
    Interval { interval: f32 },
    Parallel { parallel: Vec<StoredStep> },
    Single(StoredStep),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredStep {
    pub property: String,
    #[serde(default)]
    pub from: Option<RawValue>,
    pub to: RawValue,
    pub duration: f32,
    #[serde(default)]
    pub trans: Option<String>,
    #[serde(default)]
    pub ease: Option<String>,
}

/// Untagged value shorthands accepted in stored timelines.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Pair([f64; 2]),
    Quad([f64; 4]),
    Vector2 { x: f64, y: f64 },
    Rgba {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
}

fn opaque() -> f64 {
    1.0
}

impl RawValue {
    fn to_core_value(&self) -> Value {
        match self {
            RawValue::Number(n) => Value::Float(*n as f32),
            RawValue::Pair([x, y]) | RawValue::Vector2 { x, y } => {
                Value::Vec2([*x as f32, *y as f32])
            }
            RawValue::Quad([r, g, b, a]) | RawValue::Rgba { r, g, b, a } => {
                Value::Color([*r as f32, *g as f32, *b as f32, *a as f32])
            }
        }
    }
}

impl StoredTimeline {
    pub fn into_timeline(self, target: &TargetRef, cfg: &Config) -> Result<Timeline, TweenError> {
        let mut diags = Vec::new();
        let mut stages = Vec::with_capacity(self.stages.len());
        for stage in self.stages {
            stages.push(match stage {
                StoredStage::Interval { interval } => {
                    Stage::Interval(if interval.is_finite() { interval.max(0.0) } else { 0.0 })
                }
                StoredStage::Parallel { parallel } => Stage::Parallel(
                    parallel
                        .into_iter()
                        .map(|st| st.into_step(target, cfg, &mut diags))
                        .collect::<Result<_, _>>()?,
                ),
                StoredStage::Single(st) => Stage::Single(st.into_step(target, cfg, &mut diags)?),
            });
        }
        for d in &diags {
            d.report();
        }
        let mut timeline = Timeline::new(stages);
        timeline.push_diagnostics(diags);
        Ok(match self.name {
            Some(name) => timeline.with_name(name),
            None => timeline,
        })
    }
}

impl StoredStep {
    fn into_step(
        self,
        target: &TargetRef,
        cfg: &Config,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<PropertyStep, TweenError> {
        let curve = match (&self.trans, &self.ease) {
            (None, None) => cfg.default_curve,
            (trans, ease) => Curve::parse_collecting(
                trans.as_deref().unwrap_or(cfg.default_curve.family.as_str()),
                ease.as_deref().unwrap_or(cfg.default_curve.direction.as_str()),
                diags,
            ),
        };
        let to = self.to.to_core_value();
        match self.from {
            Some(from) => PropertyStep::new(
                target.clone(),
                self.property,
                from.to_core_value(),
                to,
                self.duration,
                curve,
            ),
            None => PropertyStep::from_current(target.clone(), self.property, to, self.duration, curve),
        }
    }
}
