use egui::{Color32, Pos2};

use crate::error::ImageLoadError;
use crate::geometry::shape::Shape;
use crate::image::ImageRef;

/// Every way the outside world can poke the editor.
///
/// Pointer positions are in canvas coordinates; mouse and touch input have
/// already been folded together by the input layer.
#[derive(Debug)]
pub enum EditorEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    /// Button release or touch end
    PointerUp,
    /// The pointer left the canvas
    PointerLeave,
    BackgroundLoaded(Result<ImageRef, ImageLoadError>),
    OverlayLoaded(Result<ImageRef, ImageLoadError>),
    /// The caption input box changed
    TextInputChanged(String),
    /// Turn the current caption input into a new text element
    AddText,
    EditWidth(f32),
    EditHeight(f32),
    EditShape(Shape),
    EditColor(Color32),
    EditSize(f32),
    Export,
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::PointerDown(_) => "PointerDown",
            EditorEvent::PointerMove(_) => "PointerMove",
            EditorEvent::PointerUp => "PointerUp",
            EditorEvent::PointerLeave => "PointerLeave",
            EditorEvent::BackgroundLoaded(_) => "BackgroundLoaded",
            EditorEvent::OverlayLoaded(_) => "OverlayLoaded",
            EditorEvent::TextInputChanged(_) => "TextInputChanged",
            EditorEvent::AddText => "AddText",
            EditorEvent::EditWidth(_) => "EditWidth",
            EditorEvent::EditHeight(_) => "EditHeight",
            EditorEvent::EditShape(_) => "EditShape",
            EditorEvent::EditColor(_) => "EditColor",
            EditorEvent::EditSize(_) => "EditSize",
            EditorEvent::Export => "Export",
        }
    }
}

/// What the caller has to do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Unchanged,
    /// The scene or selection changed and the canvas must be repainted
    Repaint,
}

impl Outcome {
    pub fn needs_repaint(self) -> bool {
        self == Outcome::Repaint
    }
}
