//! Runner: owns running tweens and drives them once per host tick.
//!
//! Methods:
//! - new, play, play_handle, play_loop, update (commands → poll → events), cancel

use crate::config::Config;
use crate::handle::{AnimationHandle, HandleStatus};
use crate::ids::{IdAllocator, TweenId};
use crate::inputs::{Inputs, TweenCommand};
use crate::looping::{LoopDriver, LoopSpec};
use crate::outputs::{CoreEvent, Outputs};
use crate::timeline::Timeline;

#[derive(Debug)]
enum Driver {
    Once(AnimationHandle),
    Looping(LoopDriver),
}

#[derive(Debug)]
struct Entry {
    id: TweenId,
    driver: Driver,
    started: bool,
    reported_cycles: u32,
    done: bool,
}

/// Independent tweens advanced together. No ordering is implied between
/// entries; each one only touches its own targets.
#[derive(Debug)]
pub struct Runner {
    cfg: Config,
    ids: IdAllocator,
    entries: Vec<Entry>,
    outputs: Outputs,
}

impl Runner {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            entries: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Start a one-shot timeline.
    pub fn play(&mut self, timeline: Timeline) -> TweenId {
        self.play_handle(AnimationHandle::new(timeline))
    }

    /// Start an already configured handle (bound target, speed, ...).
    pub fn play_handle(&mut self, handle: AnimationHandle) -> TweenId {
        self.insert(Driver::Once(handle))
    }

    /// Start a loop. The runner's cancel policy applies to it.
    pub fn play_loop(&mut self, spec: LoopSpec) -> TweenId {
        let driver = LoopDriver::new(spec).with_cancel_policy(self.cfg.cancel_policy);
        self.insert(Driver::Looping(driver))
    }

    fn insert(&mut self, driver: Driver) -> TweenId {
        let id = self.ids.alloc();
        self.entries.push(Entry {
            id,
            driver,
            started: false,
            reported_cycles: 0,
            done: false,
        });
        id
    }

    /// Whether `id` is still owned by the runner (not yet reported done).
    pub fn is_active(&self, id: TweenId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Shortcut for a `Cancel` command outside of `update`.
    pub fn cancel(&mut self, id: TweenId) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            cancel_driver(&mut e.driver);
        }
    }

    fn apply_inputs(&mut self, inputs: Inputs) {
        for cmd in inputs.commands {
            let id = match &cmd {
                TweenCommand::Cancel { id }
                | TweenCommand::Pause { id }
                | TweenCommand::Resume { id }
                | TweenCommand::SetSpeed { id, .. } => *id,
            };
            let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
                log::debug!("command for unknown tween {id:?} ignored");
                continue;
            };
            match (cmd, &mut entry.driver) {
                (TweenCommand::Cancel { .. }, driver) => cancel_driver(driver),
                (TweenCommand::Pause { .. }, Driver::Once(h)) => h.pause(),
                (TweenCommand::Pause { .. }, Driver::Looping(l)) => l.pause(),
                (TweenCommand::Resume { .. }, Driver::Once(h)) => h.resume(),
                (TweenCommand::Resume { .. }, Driver::Looping(l)) => l.resume(),
                (TweenCommand::SetSpeed { speed, .. }, Driver::Once(h)) => h.set_speed(speed),
                (TweenCommand::SetSpeed { speed, .. }, Driver::Looping(l)) => l.set_speed(speed),
            }
        }
    }

    /// Apply commands, advance every tween by `dt * time_scale` seconds and
    /// report lifecycle events. Finished, cancelled and stopped tweens are
    /// dropped after their event is emitted.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        self.apply_inputs(inputs);

        let dt = if dt.is_finite() {
            (dt * self.cfg.time_scale).max(0.0)
        } else {
            0.0
        };
        let cap = self.cfg.max_events_per_tick;
        let out = &mut self.outputs;

        for entry in self.entries.iter_mut() {
            let id = entry.id;
            if !entry.started {
                entry.started = true;
                out.push_event(CoreEvent::Started { id }, cap);
            }
            match &mut entry.driver {
                Driver::Once(handle) => {
                    let status = handle.poll(dt);
                    for diagnostic in handle.take_diagnostics() {
                        out.push_event(CoreEvent::Diagnostic { id, diagnostic }, cap);
                    }
                    match status {
                        HandleStatus::Running => {}
                        HandleStatus::Finished => {
                            out.push_event(CoreEvent::Finished { id }, cap);
                            entry.done = true;
                        }
                        HandleStatus::Cancelled => {
                            out.push_event(CoreEvent::Cancelled { id }, cap);
                            entry.done = true;
                        }
                    }
                }
                Driver::Looping(driver) => {
                    driver.poll(dt);
                    for diagnostic in driver.take_diagnostics() {
                        out.push_event(CoreEvent::Diagnostic { id, diagnostic }, cap);
                    }
                    while entry.reported_cycles < driver.completed() {
                        entry.reported_cycles += 1;
                        out.push_event(
                            CoreEvent::LoopIteration {
                                id,
                                completed: entry.reported_cycles,
                            },
                            cap,
                        );
                    }
                    if driver.is_stopped() {
                        out.push_event(
                            CoreEvent::LoopStopped {
                                id,
                                completed: driver.completed(),
                            },
                            cap,
                        );
                        entry.done = true;
                    }
                }
            }
        }

        if out.dropped_events > 0 {
            log::warn!(
                "dropped {} event(s) over the per-tick cap of {cap}",
                out.dropped_events
            );
        }
        self.entries.retain(|e| !e.done);
        &self.outputs
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn cancel_driver(driver: &mut Driver) {
    match driver {
        Driver::Once(h) => h.cancel(),
        Driver::Looping(l) => l.cancel(),
    }
}
