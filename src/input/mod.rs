use egui::{Context, Event, PointerButton, Pos2, Rect, TouchId, TouchPhase};

use crate::event::EditorEvent;

/// What a single raw event means for the pointer, regardless of device
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer is gone: left the window or the touch was cancelled
    Leave,
}

/// A pointer event reduced to a phase and a screen position.
///
/// Mouse events carry their position directly; touch events use the touch
/// point. Both end up here so the rest of the editor sees one kind of input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub pos: Option<Pos2>,
    /// Set for touch input so that only the first finger drives a drag
    pub touch: Option<TouchId>,
}

impl PointerSample {
    /// Extracts the pointer meaning of `event`, if it has one
    pub fn from_event(event: &Event) -> Option<Self> {
        let (phase, pos, touch) = match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                let phase = if *pressed { PointerPhase::Down } else { PointerPhase::Up };
                (phase, Some(*pos), None)
            }
            Event::PointerMoved(pos) => (PointerPhase::Move, Some(*pos), None),
            Event::PointerGone => (PointerPhase::Leave, None, None),
            Event::Touch { id, phase, pos, .. } => {
                let phase = match phase {
                    TouchPhase::Start => PointerPhase::Down,
                    TouchPhase::Move => PointerPhase::Move,
                    TouchPhase::End => PointerPhase::Up,
                    TouchPhase::Cancel => PointerPhase::Leave,
                };
                (phase, Some(*pos), Some(*id))
            }
            _ => return None,
        };
        Some(Self { phase, pos, touch })
    }
}

/// Handles converting raw egui input into canvas-relative editor events
#[derive(Debug, Default)]
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    /// Whether the last known pointer position was over the canvas
    inside: bool,
    /// The finger currently driving input, if any
    active_touch: Option<TouchId>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update where the canvas sits on screen
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Process raw egui input and generate editor events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<EditorEvent> {
        let samples: Vec<PointerSample> =
            ctx.input(|input| input.events.iter().filter_map(PointerSample::from_event).collect());

        samples.into_iter().filter_map(|sample| self.translate(sample)).collect()
    }

    /// Maps one sample onto the canvas, dropping what the editor does not care about
    pub fn translate(&mut self, sample: PointerSample) -> Option<EditorEvent> {
        let canvas = self.canvas_rect?;

        if let Some(id) = sample.touch {
            match (self.active_touch, sample.phase) {
                (None, PointerPhase::Down) => self.active_touch = Some(id),
                (Some(active), _) if active != id => return None,
                (None, _) => return None,
                _ => {}
            }
            if matches!(sample.phase, PointerPhase::Up | PointerPhase::Leave) {
                self.active_touch = None;
            }
        }

        let local = |pos: Pos2| Pos2::ZERO + (pos - canvas.min);

        match (sample.phase, sample.pos) {
            (PointerPhase::Down, Some(pos)) if canvas.contains(pos) => {
                self.inside = true;
                Some(EditorEvent::PointerDown(local(pos)))
            }
            (PointerPhase::Down, _) => None,
            (PointerPhase::Move, Some(pos)) if canvas.contains(pos) => {
                self.inside = true;
                Some(EditorEvent::PointerMove(local(pos)))
            }
            // A finger keeps dragging off the canvas until it lifts
            (PointerPhase::Move, Some(pos)) if sample.touch.is_some() => {
                Some(EditorEvent::PointerMove(local(pos)))
            }
            (PointerPhase::Move, _) => self.leave(),
            (PointerPhase::Up, _) => Some(EditorEvent::PointerUp),
            (PointerPhase::Leave, _) => self.leave(),
        }
    }

    fn leave(&mut self) -> Option<EditorEvent> {
        if std::mem::take(&mut self.inside) {
            Some(EditorEvent::PointerLeave)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, Vec2};

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_size(Pos2::new(200.0, 20.0), Vec2::splat(500.0)));
        handler
    }

    fn mouse(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    fn run(handler: &mut InputHandler, events: &[Event]) -> Vec<String> {
        events
            .iter()
            .filter_map(PointerSample::from_event)
            .filter_map(|sample| handler.translate(sample))
            .map(|event| format!("{:?}", event))
            .collect()
    }

    #[test]
    fn test_mouse_and_touch_share_one_extraction() {
        let pos = Pos2::new(210.0, 30.0);
        let from_mouse = PointerSample::from_event(&mouse(pos, true)).unwrap();
        let from_touch = PointerSample::from_event(&touch(1, TouchPhase::Start, pos)).unwrap();

        assert_eq!(from_mouse.phase, from_touch.phase);
        assert_eq!(from_mouse.pos, from_touch.pos);
    }

    #[test]
    fn test_positions_are_canvas_relative() {
        let mut handler = handler();
        let events = run(&mut handler, &[mouse(Pos2::new(210.0, 30.0), true)]);
        assert_eq!(events, vec![format!("{:?}", EditorEvent::PointerDown(Pos2::new(10.0, 10.0)))]);
    }

    #[test]
    fn test_press_outside_canvas_is_dropped() {
        let mut handler = handler();
        assert!(run(&mut handler, &[mouse(Pos2::new(50.0, 50.0), true)]).is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut handler = handler();
        let events = run(
            &mut handler,
            &[
                Event::PointerMoved(Pos2::new(300.0, 300.0)),
                Event::PointerMoved(Pos2::new(900.0, 300.0)),
                Event::PointerMoved(Pos2::new(950.0, 300.0)),
            ],
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], "PointerLeave");
    }

    #[test]
    fn test_release_anywhere_is_forwarded() {
        let mut handler = handler();
        let events = run(&mut handler, &[mouse(Pos2::new(5.0, 5.0), false)]);
        assert_eq!(events, vec!["PointerUp".to_owned()]);
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let mut handler = handler();
        let events = run(
            &mut handler,
            &[
                touch(1, TouchPhase::Start, Pos2::new(300.0, 300.0)),
                touch(2, TouchPhase::Start, Pos2::new(400.0, 400.0)),
                touch(2, TouchPhase::Move, Pos2::new(410.0, 410.0)),
                touch(1, TouchPhase::Move, Pos2::new(310.0, 300.0)),
                touch(1, TouchPhase::End, Pos2::new(310.0, 300.0)),
            ],
        );
        assert_eq!(
            events,
            vec![
                format!("{:?}", EditorEvent::PointerDown(Pos2::new(100.0, 280.0))),
                format!("{:?}", EditorEvent::PointerMove(Pos2::new(110.0, 280.0))),
                "PointerUp".to_owned(),
            ]
        );
    }

    #[test]
    fn test_touch_drag_continues_off_canvas() {
        let mut handler = handler();
        let events = run(
            &mut handler,
            &[
                touch(1, TouchPhase::Start, Pos2::new(300.0, 300.0)),
                touch(1, TouchPhase::Move, Pos2::new(750.0, 300.0)),
                touch(1, TouchPhase::Move, Pos2::new(150.0, 10.0)),
                touch(1, TouchPhase::End, Pos2::new(150.0, 10.0)),
            ],
        );
        assert_eq!(
            events,
            vec![
                format!("{:?}", EditorEvent::PointerDown(Pos2::new(100.0, 280.0))),
                format!("{:?}", EditorEvent::PointerMove(Pos2::new(550.0, 280.0))),
                format!("{:?}", EditorEvent::PointerMove(Pos2::new(-50.0, -10.0))),
                "PointerUp".to_owned(),
            ]
        );
    }

    #[test]
    fn test_nothing_without_canvas() {
        let mut handler = InputHandler::new();
        assert!(run(&mut handler, &[mouse(Pos2::new(10.0, 10.0), true)]).is_empty());
    }
}
