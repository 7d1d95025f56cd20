//! Timelines: an ordered list of stages.

use crate::diagnostics::Diagnostic;
use crate::step::PropertyStep;

/// One unit of a timeline. Stages run strictly one after another.
#[derive(Clone, Debug)]
pub enum Stage {
    Single(PropertyStep),
    /// All members start together; the stage lasts as long as the longest.
    Parallel(Vec<PropertyStep>),
    /// Wait without touching any property.
    Interval(f32),
}

impl Stage {
    pub fn duration(&self) -> f32 {
        match self {
            Stage::Single(step) => step.duration(),
            Stage::Parallel(steps) => steps.iter().map(|s| s.duration()).fold(0.0, f32::max),
            Stage::Interval(secs) => *secs,
        }
    }

    pub fn steps(&self) -> &[PropertyStep] {
        match self {
            Stage::Single(step) => std::slice::from_ref(step),
            Stage::Parallel(steps) => steps,
            Stage::Interval(_) => &[],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    name: Option<String>,
    stages: Vec<Stage>,
    diagnostics: Vec<Diagnostic>,
}

impl Timeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        let mut diagnostics = Vec::new();
        for stage in &stages {
            diagnostics.extend(stage.steps().iter().filter_map(|s| s.degenerate().cloned()));
        }
        Self {
            name: None,
            stages,
            diagnostics,
        }
    }

    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, idx: usize) -> Option<&Stage> {
        self.stages.get(idx)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Sum of stage durations.
    pub fn total_duration(&self) -> f32 {
        self.stages.iter().map(Stage::duration).sum()
    }

    /// Diagnostics gathered while the timeline was built.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostics(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diags);
    }

    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Chained construction: `then` appends a sequential stage, `parallel` a
/// group, `interval` a delay.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    name: Option<String>,
    stages: Vec<Stage>,
}

impl TimelineBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn then(mut self, step: PropertyStep) -> Self {
        self.stages.push(Stage::Single(step));
        self
    }

    pub fn parallel(mut self, steps: impl IntoIterator<Item = PropertyStep>) -> Self {
        self.stages.push(Stage::Parallel(steps.into_iter().collect()));
        self
    }

    /// Negative or non-finite delays become 0.
    pub fn interval(mut self, secs: f32) -> Self {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.stages.push(Stage::Interval(secs));
        self
    }

    pub fn build(self) -> Timeline {
        let timeline = Timeline::new(self.stages);
        match self.name {
            Some(name) => timeline.with_name(name),
            None => timeline,
        }
    }
}
