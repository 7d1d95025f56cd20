//! Per-tick commands for the runner.
//!
//! Hosts build these and pass them into `Runner::update()`; they are applied
//! before any tween is advanced.

use serde::{Deserialize, Serialize};

use crate::ids::TweenId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    #[serde(default)]
    pub commands: Vec<TweenCommand>,
}

impl Inputs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: TweenCommand) -> Self {
        self.commands.push(command);
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TweenCommand {
    /// Stop a tween. Loops honor the runner's cancel policy; one-shot
    /// timelines stop immediately.
    Cancel { id: TweenId },
    Pause { id: TweenId },
    Resume { id: TweenId },
    SetSpeed { id: TweenId, speed: f32 },
}
