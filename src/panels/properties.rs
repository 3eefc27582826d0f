use egui::Color32;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::element::ElementMut;
use crate::error::EditError;
use crate::event::Outcome;
use crate::geometry::shape::Shape;
use crate::scene::Scene;

/// A typed value coming out of one of the property controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyEdit {
    Width(f32),
    Height(f32),
    Shape(Shape),
    Color(Color32),
    Size(f32),
}

/// Applies `edit` to the selected element if that element has the attribute.
///
/// Overlays carry width, height and shape; texts carry color and size. Any
/// other combination, or no selection at all, leaves the scene untouched.
pub fn apply_edit(scene: &mut Scene, edit: PropertyEdit) -> Outcome {
    let Some(selected) = scene.selected_mut() else {
        debug!("Ignoring {:?}: nothing selected", edit);
        return Outcome::Unchanged;
    };

    let result: Option<Result<(), EditError>> = match (selected, edit) {
        (ElementMut::Overlay(overlay), PropertyEdit::Width(width)) => {
            Some(overlay.set_width(width))
        }
        (ElementMut::Overlay(overlay), PropertyEdit::Height(height)) => {
            Some(overlay.set_height(height))
        }
        (ElementMut::Overlay(overlay), PropertyEdit::Shape(shape)) => {
            overlay.set_shape(shape);
            Some(Ok(()))
        }
        (ElementMut::Text(text), PropertyEdit::Color(color)) => {
            text.set_color(color);
            Some(Ok(()))
        }
        (ElementMut::Text(text), PropertyEdit::Size(size)) => Some(text.set_size(size)),
        (element, edit) => {
            debug!("Ignoring {:?}: not applicable to {:?}", edit, element);
            None
        }
    };

    match result {
        Some(Ok(())) => Outcome::Repaint,
        Some(Err(err)) => {
            warn!("Rejected edit: {}", err);
            Outcome::Unchanged
        }
        None => Outcome::Unchanged,
    }
}

/// Current values of the property controls.
///
/// These persist independently of the selection: the chosen color and size
/// are what the next caption is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelState {
    #[serde(skip)]
    pub text_input: String,
    pub text_color: Color32,
    pub text_size: f32,
    pub width: f32,
    pub height: f32,
    pub shape: Shape,
    pub template_key: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl PanelState {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            text_input: String::new(),
            text_color: config.text_defaults.color,
            text_size: config.text_defaults.size,
            width: config.overlay_defaults.width,
            height: config.overlay_defaults.height,
            shape: config.overlay_defaults.shape,
            template_key: String::new(),
        }
    }

    /// The live label next to the size control
    pub fn size_label(&self) -> String {
        format!("{:.0}px", self.text_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementRef, OverlayElement, TextElement};
    use crate::image::SceneImage;
    use egui::{ColorImage, Pos2, Rect, Vec2};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let image = SceneImage::new_ref("test", ColorImage::new([4, 4], Color32::RED));
        scene.add_overlay(OverlayElement::new(
            image,
            Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::splat(100.0)),
            Shape::Rectangle,
        ));
        let caption = TextElement::new("caption", Pos2::new(250.0, 250.0), Color32::WHITE, 40.0);
        scene.add_text(caption.unwrap());
        scene
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut scene = scene();
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Width(10.0)), Outcome::Unchanged);
        assert_eq!(scene.overlays()[0].size(), Vec2::splat(100.0));
    }

    #[test]
    fn test_overlay_edits() {
        let mut scene = scene();
        scene.select(Some(ElementRef::Overlay(0)));

        assert_eq!(apply_edit(&mut scene, PropertyEdit::Width(120.0)), Outcome::Repaint);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Height(60.0)), Outcome::Repaint);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Shape(Shape::Triangle)), Outcome::Repaint);

        let overlay = &scene.overlays()[0];
        assert_eq!(overlay.size(), Vec2::new(120.0, 60.0));
        assert_eq!(overlay.shape(), Shape::Triangle);
        assert_eq!(overlay.position(), Pos2::new(50.0, 50.0));
    }

    #[test]
    fn test_text_attributes_do_not_apply_to_overlay() {
        let mut scene = scene();
        scene.select(Some(ElementRef::Overlay(0)));
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Color(Color32::RED)), Outcome::Unchanged);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Size(12.0)), Outcome::Unchanged);
        assert_eq!(scene.texts()[0].color(), Color32::WHITE);
    }

    #[test]
    fn test_text_edits() {
        let mut scene = scene();
        scene.select(Some(ElementRef::Text(0)));

        assert_eq!(apply_edit(&mut scene, PropertyEdit::Color(Color32::RED)), Outcome::Repaint);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Size(64.0)), Outcome::Repaint);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Shape(Shape::Circle)), Outcome::Unchanged);

        let text = &scene.texts()[0];
        assert_eq!(text.color(), Color32::RED);
        assert_eq!(text.size(), 64.0);
    }

    #[test]
    fn test_non_positive_width_is_rejected() {
        let mut scene = scene();
        scene.select(Some(ElementRef::Overlay(0)));
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Width(0.0)), Outcome::Unchanged);
        assert_eq!(apply_edit(&mut scene, PropertyEdit::Width(f32::NAN)), Outcome::Unchanged);
        assert_eq!(scene.overlays()[0].size().x, 100.0);
    }

    #[test]
    fn test_size_label() {
        let mut panel = PanelState::default();
        panel.text_size = 36.0;
        assert_eq!(panel.size_label(), "36px");
    }
}
