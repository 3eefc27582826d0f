use egui::epaint::Vertex;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::Surface;
use crate::geometry::shape::ClipRegion;
use crate::image::ImageRef;
use crate::text_measure::{FontMeasure, TextMeasure, baseline_origin};
use crate::texture_manager::TextureManager;

/// Draws onto an egui painter, offset to where the canvas sits on screen.
///
/// egui can only clip to rectangles, so shaped overlays are emitted as
/// textured meshes covering just the visible polygon.
pub struct PainterSurface<'a> {
    painter: Painter,
    canvas: Rect,
    fill: Color32,
    textures: &'a mut TextureManager,
    measure: FontMeasure,
}

impl<'a> PainterSurface<'a> {
    pub fn new(
        painter: &Painter,
        canvas: Rect,
        fill: Color32,
        textures: &'a mut TextureManager,
        measure: FontMeasure,
    ) -> Self {
        Self {
            // Anything dragged past the canvas edge is cut off like on a real canvas
            painter: painter.with_clip_rect(canvas),
            canvas,
            fill,
            textures,
            measure,
        }
    }

    fn offset(&self) -> Vec2 {
        self.canvas.min.to_vec2()
    }
}

impl TextMeasure for PainterSurface<'_> {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measure.text_width(text, size)
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.canvas.size()
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, self.fill);
    }

    fn draw_image(&mut self, image: &ImageRef, dest: Rect, clip: &ClipRegion) {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }

        let texture = self.textures.texture_id(image, self.painter.ctx());
        let offset = self.offset();

        if let ClipRegion::Unclipped = clip {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            self.painter.image(texture, dest.translate(offset), uv, Color32::WHITE);
            return;
        }

        let polygon = clip.visible_polygon(dest);
        if polygon.is_empty() {
            return;
        }

        let mut mesh = Mesh::with_texture(texture);
        for point in &polygon {
            mesh.vertices.push(Vertex {
                pos: *point + offset,
                uv: Pos2::new(
                    (point.x - dest.min.x) / dest.width(),
                    (point.y - dest.min.y) / dest.height(),
                ),
                color: Color32::WHITE,
            });
        }
        // The visible polygon is convex, so a fan from the first vertex covers it
        for i in 1..polygon.len() as u32 - 1 {
            mesh.add_triangle(0, i, i + 1);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn fill_text(&mut self, content: &str, anchor: Pos2, size: f32, color: Color32) {
        let galley = self.measure.layout(content, size, color);
        let origin = baseline_origin(anchor + self.offset(), &galley);
        self.painter.galley(origin, galley, color);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.painter.rect_stroke(rect.translate(self.offset()), 0.0, stroke);
    }
}
