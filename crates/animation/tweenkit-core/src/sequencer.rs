//! Timeline advance.
//!
//! `advance` is a pure function of (timeline, cursor, dt): it returns the new
//! cursor plus the values every touched step should take, and never writes
//! to a target. Overflow past a stage's end carries into the next stage in
//! the same call, so a large dt lands exactly where the same total split
//! into many small deltas would.

use crate::target::TargetRef;
use crate::timeline::Timeline;
use crate::value::Value;

/// Position within a timeline: stage index and seconds into that stage.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    pub stage: usize,
    pub elapsed: f32,
}

/// A value computed for one step, to be written by the caller.
#[derive(Clone, Debug)]
pub struct AppliedValue {
    pub stage: usize,
    pub step: usize,
    pub target: TargetRef,
    pub property: String,
    pub value: Value,
}

#[derive(Clone, Debug)]
pub struct Advance {
    pub cursor: Cursor,
    /// In stage order; a later entry for the same property supersedes an
    /// earlier one.
    pub values: Vec<AppliedValue>,
    /// The last stage completed.
    pub finished: bool,
    /// At least one stage completed during this call.
    pub stage_completed: bool,
    /// Seconds of `dt` left over after the last stage finished.
    pub overflow: f32,
}

/// Advance `cursor` by `dt` seconds. Negative or non-finite `dt` counts as 0.
pub fn advance(timeline: &Timeline, cursor: Cursor, dt: f32) -> Advance {
    run(timeline, cursor, dt, false)
}

/// Like [`advance`], but stops at the end of the current stage instead of
/// carrying overflow into the next one. Used for cooperative cancellation.
pub fn advance_to_boundary(timeline: &Timeline, cursor: Cursor, dt: f32) -> Advance {
    run(timeline, cursor, dt, true)
}

fn run(timeline: &Timeline, mut cursor: Cursor, dt: f32, stop_at_boundary: bool) -> Advance {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let stages = timeline.stages();
    let mut values = Vec::new();

    if cursor.stage >= stages.len() {
        return Advance {
            cursor,
            values,
            finished: true,
            stage_completed: false,
            overflow: dt,
        };
    }

    cursor.elapsed += dt;
    let mut stage_completed = false;
    let mut overflow = 0.0;
    let finished = loop {
        let stage = &stages[cursor.stage];
        let duration = stage.duration();
        let local = cursor.elapsed.min(duration);
        for (idx, step) in stage.steps().iter().enumerate() {
            values.push(AppliedValue {
                stage: cursor.stage,
                step: idx,
                target: step.target().clone(),
                property: step.property().to_string(),
                value: step.value_at(local),
            });
        }

        if cursor.elapsed < duration {
            break false;
        }
        stage_completed = true;

        if cursor.stage + 1 >= stages.len() {
            overflow = cursor.elapsed - duration;
            cursor.elapsed = duration;
            break true;
        }
        if stop_at_boundary {
            cursor.stage += 1;
            cursor.elapsed = 0.0;
            break false;
        }
        cursor.elapsed -= duration;
        cursor.stage += 1;
    };

    Advance {
        cursor,
        values,
        finished,
        stage_completed,
        overflow,
    }
}
