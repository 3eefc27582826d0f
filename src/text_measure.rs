use std::sync::Arc;

use egui::{Color32, FontFamily, FontId, Galley, Pos2, Vec2};

/// Measures the rendered width of a caption.
///
/// The renderer and the hit-tester must agree on text extents, so both take
/// their measurements from the same implementation.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn at `size` px
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Measures text with egui's font system.
///
/// Only valid once the context has run a frame (fonts are loaded lazily).
#[derive(Clone)]
pub struct FontMeasure {
    ctx: egui::Context,
    family: FontFamily,
}

impl FontMeasure {
    pub fn new(ctx: egui::Context, family: FontFamily) -> Self {
        Self { ctx, family }
    }

    pub fn font_id(&self, size: f32) -> FontId {
        FontId::new(size, self.family.clone())
    }

    /// Lays out `text` on a single row
    pub fn layout(&self, text: &str, size: f32, color: Color32) -> Arc<Galley> {
        let font_id = self.font_id(size);
        self.ctx.fonts(|fonts| fonts.layout_no_wrap(text.to_owned(), font_id, color))
    }
}

/// Distance from the top of the galley to the baseline of its first row
pub fn baseline_offset(galley: &Galley) -> f32 {
    galley
        .rows
        .first()
        .and_then(|row| row.glyphs.first())
        .map_or(galley.size().y, |glyph| glyph.pos.y)
}

/// Where to place `galley` so it is centered on `anchor.x` with its baseline on `anchor.y`
pub fn baseline_origin(anchor: Pos2, galley: &Galley) -> Pos2 {
    anchor - Vec2::new(galley.size().x / 2.0, baseline_offset(galley))
}

impl TextMeasure for FontMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, Color32::PLACEHOLDER).size().x
    }
}

/// Every character advances by `size * ratio`. Used for headless rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance_counts_chars() {
        let measure = FixedAdvance::default();
        assert_eq!(measure.text_width("abcd", 20.0), 40.0);
        assert_eq!(measure.text_width("", 20.0), 0.0);
        // Multi-byte characters still count once
        assert_eq!(measure.text_width("héé", 10.0), 15.0);
    }

    #[test]
    fn test_font_measure_grows_with_size() {
        let ctx = egui::Context::default();
        // Fonts are only available after the first pass
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        let measure = FontMeasure::new(ctx, FontFamily::Proportional);
        let small = measure.text_width("Hello", 10.0);
        let large = measure.text_width("Hello", 40.0);
        assert!(small > 0.0);
        assert!(large > small);
    }

    #[test]
    fn test_caption_sits_on_its_baseline() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        let measure = FontMeasure::new(ctx, FontFamily::Proportional);
        let galley = measure.layout("Hello", 40.0, Color32::WHITE);

        let baseline = baseline_offset(&galley);
        // Descenders hang below the baseline, so it is above the bottom of the row
        assert!(baseline > 0.0);
        assert!(baseline < galley.size().y);

        let anchor = Pos2::new(250.0, 250.0);
        let origin = baseline_origin(anchor, &galley);
        assert!((origin.y + baseline - anchor.y).abs() < 1e-3);
        assert!((origin.x + galley.size().x / 2.0 - anchor.x).abs() < 1e-3);
    }
}
