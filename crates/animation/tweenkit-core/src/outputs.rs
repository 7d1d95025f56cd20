//! Events produced by `Runner::update()`.
//!
//! Property values are written straight to targets, so outputs only carry
//! lifecycle signals and diagnostics.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::ids::TweenId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    Started { id: TweenId },
    Finished { id: TweenId },
    Cancelled { id: TweenId },
    /// One loop cycle completed; `completed` counts cycles so far.
    LoopIteration { id: TweenId, completed: u32 },
    LoopStopped { id: TweenId, completed: u32 },
    Diagnostic { id: TweenId, diagnostic: Diagnostic },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
    /// Events dropped this tick because of `max_events_per_tick`.
    #[serde(default)]
    pub dropped_events: usize,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped_events = 0;
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent, cap: usize) {
        if self.events.len() < cap {
            self.events.push(event);
        } else {
            self.dropped_events += 1;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
