//! The drag state machine behind canvas pointer input.
//!
//! ```text
//!                  press on element
//!   ┌──────────┐ ───────────────────► ┌──────────────────────────┐
//!   │          │                      │                          │
//!   │   Idle   │                      │ Dragging(target, last)   │ ◄─┐ move:
//!   │          │ ◄─────────────────── │                          │ ──┘ translate by
//!   └──────────┘  release / leave /   └──────────────────────────┘     (pos - last)
//!     ▲     │     touch end
//!     └─────┘ press on nothing (deselects), move (ignored)
//! ```
//!
//! Every press re-runs the hit-test and replaces the selection, including with
//! nothing. Releasing never touches the selection.
use egui::Pos2;
use log::debug;

use crate::element::ElementRef;
use crate::event::Outcome;
use crate::geometry::hit_testing::hit_test;
use crate::scene::Scene;
use crate::text_measure::TextMeasure;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        target: ElementRef,
        /// Pointer position at the previous press or move
        last: Pos2,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Selects whatever is under `pos` and starts dragging it
    pub fn press(&mut self, scene: &mut Scene, pos: Pos2, measure: &dyn TextMeasure) -> Outcome {
        let hit = hit_test(scene, pos, measure);
        scene.select(hit);

        self.state = match hit {
            Some(target) => InteractionState::Dragging { target, last: pos },
            None => InteractionState::Idle,
        };
        debug!("Press at {:?} -> {:?}", pos, self.state);

        Outcome::Repaint
    }

    /// Moves the dragged element by the pointer delta since the last event
    pub fn drag_to(&mut self, scene: &mut Scene, pos: Pos2) -> Outcome {
        let InteractionState::Dragging { target, last } = self.state else {
            return Outcome::Unchanged;
        };

        let Some(mut element) = scene.element_mut(target) else {
            // The target vanished from under the drag; nothing left to move
            self.state = InteractionState::Idle;
            return Outcome::Unchanged;
        };

        element.translate(pos - last);
        self.state = InteractionState::Dragging { target, last: pos };
        Outcome::Repaint
    }

    /// Ends any drag. The selection stays as it is.
    pub fn release(&mut self) -> Outcome {
        if self.state.is_dragging() {
            debug!("Drag finished");
        }
        self.state = InteractionState::Idle;
        Outcome::Unchanged
    }
}
