use egui::{Color32, Pos2, Rect, Vec2};

use super::Element;
use crate::element::common;
use crate::error::EditError;
use crate::text_measure::TextMeasure;

/// A caption anchored at its horizontal center and baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    content: String,
    anchor: Pos2, // x = horizontal center, y = baseline
    color: Color32,
    size: f32,
}

impl TextElement {
    /// Creates a caption from user input.
    ///
    /// Returns `None` when the trimmed input is empty or the size is not positive.
    pub fn new(content: &str, anchor: Pos2, color: Color32, size: f32) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let size = common::validate_dimension("size", size).ok()?;
        Some(Self {
            content: content.to_owned(),
            anchor,
            color,
            size,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_size(&mut self, size: f32) -> Result<(), EditError> {
        self.size = common::validate_dimension("size", size)?;
        Ok(())
    }

    /// The box spanned by the rendered caption: `[x - w/2, x + w/2] × [y - size, y]`
    pub fn text_bounds(&self, measure: &dyn TextMeasure) -> Rect {
        let width = measure.text_width(&self.content, self.size);
        Rect::from_min_max(
            Pos2::new(self.anchor.x - width / 2.0, self.anchor.y - self.size),
            Pos2::new(self.anchor.x + width / 2.0, self.anchor.y),
        )
    }
}

impl Element for TextElement {
    fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        self.text_bounds(measure)
    }

    fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }
}
