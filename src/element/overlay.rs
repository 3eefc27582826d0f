use egui::{Pos2, Rect, Vec2};
use log::info;

use super::Element;
use crate::element::common;
use crate::error::EditError;
use crate::geometry::shape::Shape;
use crate::image::ImageRef;
use crate::text_measure::TextMeasure;

/// A user-placed image drawn into a box and clipped to a shape
#[derive(Clone)]
pub struct OverlayElement {
    image: ImageRef,
    position: Pos2, // Top-left corner on the canvas
    size: Vec2,
    shape: Shape,
}

impl std::fmt::Debug for OverlayElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayElement")
            .field("image", &self.image.id())
            .field("position", &self.position)
            .field("size", &self.size)
            .field("shape", &self.shape)
            .finish()
    }
}

impl OverlayElement {
    pub fn new(image: ImageRef, rect: Rect, shape: Shape) -> Self {
        Self {
            image,
            position: rect.min,
            size: rect.size(),
            shape,
        }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn set_width(&mut self, width: f32) -> Result<(), EditError> {
        self.size.x = common::validate_dimension("width", width)?;
        info!("Overlay {} width set to {}", self.image.id().value(), width);
        Ok(())
    }

    pub fn set_height(&mut self, height: f32) -> Result<(), EditError> {
        self.size.y = common::validate_dimension("height", height)?;
        info!("Overlay {} height set to {}", self.image.id().value(), height);
        Ok(())
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }
}

impl Element for OverlayElement {
    fn bounds(&self, _measure: &dyn TextMeasure) -> Rect {
        self.rect()
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
