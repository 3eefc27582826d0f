use egui::{Color32, Pos2, Rect, Stroke, Vec2};

mod painter_surface;
mod recording;

pub use painter_surface::PainterSurface;
pub use recording::{DrawOp, RecordingSurface};

use crate::config::EditorConfig;
use crate::element::ElementRef;
use crate::geometry::shape::{ClipRegion, clip_region};
use crate::image::ImageRef;
use crate::scene::Scene;
use crate::text_measure::TextMeasure;

/// A drawing target in canvas coordinates, origin at the top-left corner.
pub trait Surface: TextMeasure {
    /// Full size of the drawable area
    fn size(&self) -> Vec2;

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Draw `image` stretched into `dest`, visible only inside `clip` and `dest`
    fn draw_image(&mut self, image: &ImageRef, dest: Rect, clip: &ClipRegion);

    /// Draw `content` centered horizontally on `anchor.x` with its baseline on `anchor.y`
    fn fill_text(&mut self, content: &str, anchor: Pos2, size: f32, color: Color32);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
}

/// Paints a [`Scene`] in a fixed layer order: background, overlays, texts.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    outline: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            outline: Stroke::new(config.outline_width, config.accent_color),
        }
    }

    /// Renders the scene onto `surface`. Reads the scene only.
    pub fn render<S: Surface>(&self, scene: &Scene, surface: &mut S) {
        surface.clear();

        if let Some(background) = scene.background() {
            let full = Rect::from_min_size(Pos2::ZERO, surface.size());
            surface.draw_image(background, full, &ClipRegion::Unclipped);
        }

        for (index, overlay) in scene.overlays().iter().enumerate() {
            let rect = overlay.rect();
            surface.draw_image(overlay.image(), rect, &clip_region(rect, overlay.shape()));

            if scene.is_selected(ElementRef::Overlay(index)) {
                surface.stroke_rect(rect, self.outline);
            }
        }

        for (index, text) in scene.texts().iter().enumerate() {
            surface.fill_text(text.content(), text.anchor(), text.size(), text.color());

            if scene.is_selected(ElementRef::Text(index)) {
                let bounds = text.text_bounds(&*surface);
                surface.stroke_rect(bounds, self.outline);
            }
        }
    }
}
