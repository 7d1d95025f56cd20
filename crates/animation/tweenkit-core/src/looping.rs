//! Loop driver: re-creates and replays a timeline until a repeat count is
//! exhausted, the target dies, or it is cancelled.
//!
//! The timeline is rebuilt from a factory on every cycle so start/end values
//! can be taken from the target's live state (accumulated spin, drifted
//! position) instead of values captured once.

use serde::{Deserialize, Serialize};

use crate::config::CancelPolicy;
use crate::diagnostics::Diagnostic;
use crate::handle::{AnimationHandle, HandleStatus};
use crate::target::TargetRef;
use crate::timeline::Timeline;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Infinite,
    Times(u32),
}

impl Repeat {
    fn exhausted(&self, completed: u32) -> bool {
        match self {
            Repeat::Infinite => false,
            Repeat::Times(n) => completed >= *n,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    /// Not polled yet.
    Idle,
    Running,
    Stopped,
}

/// Builds a fresh timeline for the next cycle. Returning `None` stops the
/// loop (for instance when the live value could not be read).
pub type TimelineFactory = Box<dyn FnMut() -> Option<Timeline>>;

pub struct LoopSpec {
    factory: TimelineFactory,
    repeat: Repeat,
    liveness: TargetRef,
}

impl LoopSpec {
    pub fn new(
        liveness: TargetRef,
        repeat: Repeat,
        factory: impl FnMut() -> Option<Timeline> + 'static,
    ) -> Self {
        Self {
            factory: Box::new(factory),
            repeat,
            liveness,
        }
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }
}

pub struct LoopDriver {
    factory: TimelineFactory,
    repeat: Repeat,
    liveness: Option<TargetRef>,
    state: LoopState,
    current: Option<AnimationHandle>,
    completed: u32,
    cancel_requested: bool,
    policy: CancelPolicy,
    paused: bool,
    speed: f32,
    diagnostics: Vec<Diagnostic>,
}

impl LoopDriver {
    pub fn new(spec: LoopSpec) -> Self {
        Self {
            factory: spec.factory,
            repeat: spec.repeat,
            liveness: Some(spec.liveness),
            state: LoopState::Idle,
            current: None,
            completed: 0,
            cancel_requested: false,
            policy: CancelPolicy::default(),
            paused: false,
            speed: 1.0,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Advance the running cycle by `dt` seconds.
    ///
    /// Liveness and the repeat count are checked on every completion, and the
    /// next cycle starts in the same poll with whatever part of `dt` the
    /// finished cycle did not use.
    pub fn poll(&mut self, dt: f32) -> LoopState {
        if self.state == LoopState::Stopped || self.paused {
            return self.state;
        }
        if self.state == LoopState::Idle && !self.start_cycle() {
            return self.state;
        }

        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        loop {
            let Some(handle) = self.current.as_mut() else {
                self.stop();
                break;
            };
            let status = handle.poll(remaining);
            let overflow = handle.overflow();
            self.diagnostics.extend(handle.take_diagnostics());

            match status {
                HandleStatus::Running => break,
                HandleStatus::Cancelled => {
                    self.stop();
                    break;
                }
                HandleStatus::Finished => {
                    self.completed += 1;
                    self.current = None;
                    log::debug!("loop cycle {} complete", self.completed);
                    if !self.start_cycle() {
                        break;
                    }
                    // A cycle that used no time must not spin within one poll.
                    if overflow <= 0.0 || overflow >= remaining {
                        break;
                    }
                    remaining = overflow;
                }
            }
        }
        self.state
    }

    /// Start the next cycle. Returns false if the loop stopped instead.
    fn start_cycle(&mut self) -> bool {
        if self.cancel_requested || self.repeat.exhausted(self.completed) {
            self.stop();
            return false;
        }
        let live = self.liveness.as_ref().is_some_and(TargetRef::is_valid);
        if !live {
            let d = Diagnostic::InvalidTarget { property: None };
            d.report();
            self.diagnostics.push(d);
            self.stop();
            return false;
        }
        let Some(timeline) = (self.factory)() else {
            log::debug!("loop factory produced no timeline; stopping");
            self.stop();
            return false;
        };
        let mut handle = AnimationHandle::new(timeline);
        if let Some(target) = &self.liveness {
            handle = handle.bound_to(target.clone());
        }
        handle.set_speed(self.speed);
        self.current = Some(handle);
        self.state = LoopState::Running;
        true
    }

    fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("loop stopped after {} cycle(s)", self.completed);
        }
        self.state = LoopState::Stopped;
        self.current = None;
        self.liveness = None;
    }

    /// Request a stop. Under [`CancelPolicy::AtStageBoundary`] a running
    /// cycle first completes its current stage.
    pub fn cancel(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.cancel_requested = true;
        match (self.policy, self.current.as_mut()) {
            (CancelPolicy::AtStageBoundary, Some(handle)) => handle.request_cancel(),
            _ => self.stop(),
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        if let Some(handle) = self.current.as_mut() {
            handle.set_speed(self.speed);
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested && self.is_stopped()
    }

    /// Number of fully completed cycles.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// The cycle currently in progress, if any.
    pub fn current(&self) -> Option<&AnimationHandle> {
        self.current.as_ref()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl std::fmt::Debug for LoopDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopDriver")
            .field("repeat", &self.repeat)
            .field("state", &self.state)
            .field("completed", &self.completed)
            .field("cancel_requested", &self.cancel_requested)
            .finish()
    }
}
