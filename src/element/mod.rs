use egui::{Rect, Vec2};

mod common;
pub(crate) mod overlay;
pub(crate) mod text;

pub use overlay::OverlayElement;
pub use text::TextElement;

use crate::text_measure::TextMeasure;

/// Common trait that all scene elements implement
pub trait Element {
    /// Get the bounding rectangle used for hit-testing and selection outlines
    fn bounds(&self, measure: &dyn TextMeasure) -> Rect;

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);
}

/// Refers to one element of a scene by sequence and insertion index.
///
/// Elements are never removed or reordered, so an index stays valid for the
/// lifetime of the scene that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Overlay(usize),
    Text(usize),
}

/// Shared view of an element, tagged by kind
#[derive(Debug, Clone, Copy)]
pub enum ElementView<'a> {
    Overlay(&'a OverlayElement),
    Text(&'a TextElement),
}

/// Mutable view of an element, tagged by kind
#[derive(Debug)]
pub enum ElementMut<'a> {
    Overlay(&'a mut OverlayElement),
    Text(&'a mut TextElement),
}

impl ElementView<'_> {
    /// The box used for hit-testing
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        match self {
            ElementView::Overlay(o) => o.bounds(measure),
            ElementView::Text(t) => t.bounds(measure),
        }
    }
}

impl ElementMut<'_> {
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            ElementMut::Overlay(o) => o.translate(delta),
            ElementMut::Text(t) => t.translate(delta),
        }
    }
}
