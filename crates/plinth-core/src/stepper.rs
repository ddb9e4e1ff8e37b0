//! Showcase stepper state machine.
//!
//! The showcase section is an ordered strip of step buttons next to a detail
//! panel. Its state is the active step index: clicks, arrow buttons, and
//! pointer taps move it, and the transition action exposes the active step's
//! metadata for the detail panel. Gesture tracking lives in the struct
//! rather than in captured variables, so the whole widget is a value that
//! can be driven and inspected directly.

use crate::content::ShowcaseStep;

/// Pointer travel beyond this marks the gesture as a drag; releasing a drag
/// scrolls the strip and must not activate the step under the pointer.
pub const DRAG_ACTIVATE_THRESHOLD_PX: f64 = 6.0;

/// Detail-panel copy for one step, with defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDetail {
    pub tone: String,
    pub label: String,
    pub tag: String,
    pub chip: String,
    pub note: String,
    pub desc: String,
}

impl From<&ShowcaseStep> for StepDetail {
    fn from(step: &ShowcaseStep) -> Self {
        Self {
            tone: step.tone.clone().unwrap_or_else(|| "blue".to_string()),
            label: step.label.clone().unwrap_or_else(|| step.title.clone()),
            tag: step.tag.clone().unwrap_or_else(|| "Panel".to_string()),
            chip: step.chip.clone().unwrap_or_else(|| step.title.clone()),
            note: step.note.clone().unwrap_or_default(),
            desc: step.desc.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    moved: bool,
    origin: Option<usize>,
}

/// Stepper over a non-empty list of showcase steps.
#[derive(Debug, Clone)]
pub struct ShowcaseStepper {
    steps: Vec<StepDetail>,
    active: usize,
    drag: Option<Drag>,
}

impl ShowcaseStepper {
    /// Build a stepper with step 0 active. Returns `None` for an empty list.
    pub fn new(steps: &[ShowcaseStep]) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            steps: steps.iter().map(StepDetail::from).collect(),
            active: 0,
            drag: None,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the active step.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Metadata of the active step.
    pub fn detail(&self) -> &StepDetail {
        &self.steps[self.active]
    }

    /// Activate a step directly. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.steps.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Advance one step, saturating at the last.
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1).min(self.steps.len() - 1);
        self.active
    }

    /// Go back one step, saturating at the first.
    pub fn prev(&mut self) -> usize {
        self.active = self.active.saturating_sub(1);
        self.active
    }

    /// Begin a pointer gesture at `x`, optionally over a step.
    pub fn pointer_down(&mut self, x: f64, over: Option<usize>) {
        self.drag = Some(Drag {
            start_x: x,
            moved: false,
            origin: over,
        });
    }

    /// Track pointer travel. Once past the threshold the gesture stays a
    /// drag even if the pointer returns.
    pub fn pointer_move(&mut self, x: f64) {
        if let Some(drag) = &mut self.drag {
            if (x - drag.start_x).abs() > DRAG_ACTIVATE_THRESHOLD_PX {
                drag.moved = true;
            }
        }
    }

    /// End the gesture. A tap over a step activates it and returns the new
    /// active index; a drag release changes no state.
    pub fn pointer_up(&mut self) -> Option<usize> {
        let drag = self.drag.take()?;
        if drag.moved {
            return None;
        }
        let origin = drag.origin?;
        self.select(origin).then_some(origin)
    }
}
