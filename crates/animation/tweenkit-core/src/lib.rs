//! tweenkit core (engine-agnostic)
//!
//! Curve evaluation, property steps, timelines of sequential and parallel
//! stages, a cancellable handle that writes to weakly referenced targets,
//! and a loop driver that rebuilds its timeline from live state each cycle.
//! Hosts call `poll`/`update` once per frame; nothing here blocks or spawns.

pub mod config;
pub mod curve;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod looping;
pub mod outputs;
pub mod runner;
pub mod sequencer;
pub mod step;
pub mod stored_timeline;
pub mod target;
pub mod timeline;
pub mod value;

// Re-exports for consumers (host adapters)
pub use config::{CancelPolicy, Config};
pub use curve::{evaluate, Curve, Direction, Family};
pub use diagnostics::Diagnostic;
pub use error::{CurveParseError, TweenError};
pub use handle::{AnimationHandle, HandleStatus};
pub use ids::TweenId;
pub use inputs::{Inputs, TweenCommand};
pub use looping::{LoopDriver, LoopSpec, LoopState, Repeat};
pub use outputs::{CoreEvent, Outputs};
pub use runner::Runner;
pub use sequencer::{advance, advance_to_boundary, Advance, AppliedValue, Cursor};
pub use step::PropertyStep;
pub use stored_timeline::{parse_stored_timeline_json, parse_stored_timeline_json_with};
pub use target::{Animatable, SharedTarget, TargetRef};
pub use timeline::{Stage, Timeline, TimelineBuilder};
pub use value::{Value, ValueKind};
