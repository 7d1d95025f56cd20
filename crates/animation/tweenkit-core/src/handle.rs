//! Cancellable handle over one running timeline.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::sequencer::{advance, advance_to_boundary, Cursor};
use crate::target::TargetRef;
use crate::timeline::Timeline;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleStatus {
    Running,
    Finished,
    Cancelled,
}

/// Drives a [`Timeline`] and writes its values to live targets.
///
/// The handle only keeps progress and weak target references; dropping it
/// leaves targets at whatever value was last written.
#[derive(Debug)]
pub struct AnimationHandle {
    timeline: Timeline,
    cursor: Cursor,
    status: HandleStatus,
    liveness: Option<TargetRef>,
    cancel_requested: bool,
    paused: bool,
    speed: f32,
    overflow: f32,
    diagnostics: Vec<Diagnostic>,
}

impl AnimationHandle {
    pub fn new(mut timeline: Timeline) -> Self {
        let diagnostics = timeline.take_diagnostics();
        Self {
            timeline,
            cursor: Cursor::default(),
            status: HandleStatus::Running,
            liveness: None,
            cancel_requested: false,
            paused: false,
            speed: 1.0,
            overflow: 0.0,
            diagnostics,
        }
    }

    /// Also stop when `target` dies, even during stages that write nothing
    /// (intervals).
    pub fn bound_to(mut self, target: TargetRef) -> Self {
        self.liveness = Some(target);
        self
    }

    /// Advance by `dt` seconds and write the resulting values.
    ///
    /// Every target touched this poll is validated before anything is
    /// written; if one is gone the handle is cancelled and nothing is
    /// applied.
    pub fn poll(&mut self, dt: f32) -> HandleStatus {
        if self.status != HandleStatus::Running || self.paused {
            return self.status;
        }
        if let Some(target) = &self.liveness {
            if !target.is_valid() {
                self.invalidate(None);
                return self.status;
            }
        }

        let dt = if dt.is_finite() { dt * self.speed } else { 0.0 };
        let adv = if self.cancel_requested {
            advance_to_boundary(&self.timeline, self.cursor, dt)
        } else {
            advance(&self.timeline, self.cursor, dt)
        };

        if let Some(dead) = adv.values.iter().find(|v| !v.target.is_valid()) {
            let property = dead.property.clone();
            self.invalidate(Some(property));
            return self.status;
        }
        for v in &adv.values {
            v.target.write(&v.property, v.value);
        }
        self.cursor = adv.cursor;

        if adv.finished {
            self.overflow = if self.speed > 0.0 {
                adv.overflow / self.speed
            } else {
                0.0
            };
            log::debug!(
                "timeline {:?} finished after {} stage(s)",
                self.timeline.name(),
                self.timeline.stage_count()
            );
            self.status = HandleStatus::Finished;
        } else if self.cancel_requested && adv.stage_completed {
            log::debug!(
                "timeline {:?} cancelled at stage boundary {}",
                self.timeline.name(),
                self.cursor.stage
            );
            self.status = HandleStatus::Cancelled;
        }
        self.status
    }

    fn invalidate(&mut self, property: Option<String>) {
        let d = Diagnostic::InvalidTarget { property };
        d.report();
        self.diagnostics.push(d);
        self.status = HandleStatus::Cancelled;
    }

    /// Stop now. Idempotent; a finished handle stays finished.
    pub fn cancel(&mut self) {
        if self.status == HandleStatus::Running {
            self.status = HandleStatus::Cancelled;
        }
    }

    /// Stop once the current stage completes, so no property is left between
    /// stage values.
    pub fn request_cancel(&mut self) {
        if self.status == HandleStatus::Running {
            self.cancel_requested = true;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Playback speed multiplier; negative values are treated as 0.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    pub fn status(&self) -> HandleStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == HandleStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == HandleStatus::Finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == HandleStatus::Cancelled
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Seconds of the finishing poll's `dt` that the timeline did not use,
    /// in caller time (before speed scaling). Zero until finished.
    pub fn overflow(&self) -> f32 {
        self.overflow
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Drain diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
