use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use super::Surface;
use crate::geometry::shape::ClipRegion;
use crate::image::{ImageId, ImageRef};
use crate::text_measure::{FixedAdvance, TextMeasure};

/// One primitive painted onto a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Image {
        image: ImageId,
        dest: Rect,
        clip: ClipRegion,
    },
    Text {
        content: String,
        anchor: Pos2,
        size: f32,
        color: Color32,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
}

/// Records what would be painted instead of rasterizing it.
///
/// Two recordings compare equal exactly when they would produce the same
/// pixels, which makes this the headless surface for tests and diagnostics.
#[derive(Debug, Clone)]
pub struct RecordingSurface<M = FixedAdvance> {
    size: Vec2,
    ops: Vec<DrawOp>,
    measure: M,
}

impl RecordingSurface<FixedAdvance> {
    pub fn new(size: Vec2) -> Self {
        Self::with_measure(size, FixedAdvance::default())
    }
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn with_measure(size: Vec2, measure: M) -> Self {
        Self {
            size,
            ops: Vec::new(),
            measure,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measure.text_width(text, size)
    }
}

impl<M: TextMeasure> Surface for RecordingSurface<M> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        // Nothing painted before a clear can be seen afterwards
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn draw_image(&mut self, image: &ImageRef, dest: Rect, clip: &ClipRegion) {
        self.ops.push(DrawOp::Image {
            image: image.id(),
            dest,
            clip: clip.clone(),
        });
    }

    fn fill_text(&mut self, content: &str, anchor: Pos2, size: f32, color: Color32) {
        self.ops.push(DrawOp::Text {
            content: content.to_owned(),
            anchor,
            size,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeRect { rect, stroke });
    }
}
