use log::{debug, error, warn};

use crate::config::EditorConfig;
use crate::element::{ElementView, OverlayElement, TextElement};
use crate::error::ImageLoadError;
use crate::event::{EditorEvent, Outcome};
use crate::image::ImageRef;
use crate::panels::properties::{PanelState, PropertyEdit, apply_edit};
use crate::renderer::{Renderer, Surface};
use crate::scene::Scene;
use crate::state::InteractionController;
use crate::text_measure::TextMeasure;

/// The editor core: scene, drag state and control values behind one entry point.
///
/// Nothing in here knows about egui windows or the browser. The app feeds it
/// [`EditorEvent`]s and repaints whenever an [`Outcome::Repaint`] comes back.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    interaction: InteractionController,
    panel: PanelState,
    config: EditorConfig,
    renderer: Renderer,
    export_pending: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            interaction: InteractionController::new(),
            panel: PanelState::from_config(&config),
            renderer: Renderer::new(&config),
            config,
            export_pending: false,
        }
    }

    /// Starts from previously saved control values
    pub fn with_panel(mut self, panel: PanelState) -> Self {
        self.panel = panel;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Records which template the picker shows; loading it is the caller's job
    pub fn remember_template(&mut self, key: &str) {
        self.panel.template_key = key.to_owned();
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        self.renderer.render(&self.scene, surface);
    }

    /// Returns true once per accepted export, after which the caller captures
    /// the next fully rendered frame.
    pub fn take_export_request(&mut self) -> bool {
        std::mem::take(&mut self.export_pending)
    }

    pub fn handle_event(&mut self, event: EditorEvent, measure: &dyn TextMeasure) -> Outcome {
        debug!("Handling {}", event.name());

        match event {
            EditorEvent::PointerDown(pos) => {
                let outcome = self.interaction.press(&mut self.scene, pos, measure);
                self.sync_panel_from_selection();
                outcome
            }
            EditorEvent::PointerMove(pos) => self.interaction.drag_to(&mut self.scene, pos),
            EditorEvent::PointerUp | EditorEvent::PointerLeave => self.interaction.release(),
            EditorEvent::BackgroundLoaded(result) => self.on_loaded(result, |scene, image, _| {
                scene.set_background(image);
            }),
            EditorEvent::OverlayLoaded(result) => self.on_loaded(result, |scene, image, config| {
                let defaults = &config.overlay_defaults;
                scene.add_overlay(OverlayElement::new(image, defaults.rect(), defaults.shape));
            }),
            EditorEvent::TextInputChanged(text) => {
                self.panel.text_input = text;
                Outcome::Unchanged
            }
            EditorEvent::AddText => self.add_text(),
            EditorEvent::EditWidth(width) => {
                self.panel.width = width;
                apply_edit(&mut self.scene, PropertyEdit::Width(width))
            }
            EditorEvent::EditHeight(height) => {
                self.panel.height = height;
                apply_edit(&mut self.scene, PropertyEdit::Height(height))
            }
            EditorEvent::EditShape(shape) => {
                self.panel.shape = shape;
                apply_edit(&mut self.scene, PropertyEdit::Shape(shape))
            }
            EditorEvent::EditColor(color) => {
                self.panel.text_color = color;
                apply_edit(&mut self.scene, PropertyEdit::Color(color))
            }
            EditorEvent::EditSize(size) => {
                // The size label follows the control even with nothing selected
                self.panel.text_size = size;
                apply_edit(&mut self.scene, PropertyEdit::Size(size))
            }
            EditorEvent::Export => self.request_export(),
        }
    }

    fn on_loaded(
        &mut self,
        result: Result<ImageRef, ImageLoadError>,
        apply: impl FnOnce(&mut Scene, ImageRef, &EditorConfig),
    ) -> Outcome {
        match result {
            Ok(image) => {
                apply(&mut self.scene, image, &self.config);
                Outcome::Repaint
            }
            Err(err) => {
                error!("Failed to load image: {}", err);
                Outcome::Unchanged
            }
        }
    }

    fn add_text(&mut self) -> Outcome {
        let Some(text) = TextElement::new(
            &self.panel.text_input,
            self.config.canvas_center(),
            self.panel.text_color,
            self.panel.text_size,
        ) else {
            debug!("Ignoring empty caption");
            return Outcome::Unchanged;
        };

        self.scene.add_text(text);
        self.panel.text_input.clear();
        Outcome::Repaint
    }

    fn request_export(&mut self) -> Outcome {
        if self.scene.is_empty() {
            warn!("Nothing to export: add a background, an overlay or a caption first");
            return Outcome::Unchanged;
        }

        // The capture happens after the next complete render
        self.export_pending = true;
        Outcome::Repaint
    }

    /// Shows the geometry of a freshly selected overlay in the size and shape controls
    fn sync_panel_from_selection(&mut self) {
        let Some(selected) = self.scene.selection() else {
            return;
        };
        if let Some(ElementView::Overlay(overlay)) = self.scene.element(selected) {
            self.panel.width = overlay.size().x;
            self.panel.height = overlay.size().y;
            self.panel.shape = overlay.shape();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementRef;
    use crate::geometry::shape::Shape;
    use crate::image::SceneImage;
    use crate::text_measure::FixedAdvance;
    use egui::{Color32, ColorImage, Pos2, Vec2};

    fn image() -> ImageRef {
        SceneImage::new_ref("test", ColorImage::new([8, 8], Color32::BLUE))
    }

    fn send(editor: &mut Editor, event: EditorEvent) -> Outcome {
        editor.handle_event(event, &FixedAdvance::default())
    }

    #[test]
    fn test_overlay_load_uses_default_geometry() {
        let mut editor = Editor::default();

        assert_eq!(send(&mut editor, EditorEvent::OverlayLoaded(Ok(image()))), Outcome::Repaint);

        let overlay = &editor.scene().overlays()[0];
        assert_eq!(overlay.position(), Pos2::new(50.0, 50.0));
        assert_eq!(overlay.size(), Vec2::splat(100.0));
        assert_eq!(overlay.shape(), Shape::Rectangle);
        assert_eq!(editor.scene().selection(), None);
    }

    #[test]
    fn test_failed_load_leaves_scene_alone() {
        let mut editor = Editor::default();
        send(&mut editor, EditorEvent::BackgroundLoaded(Ok(image())));
        let before = editor.scene().background().map(|image| image.id());

        let outcome = send(
            &mut editor,
            EditorEvent::BackgroundLoaded(Err(ImageLoadError::Unsupported("nope".to_owned()))),
        );

        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(editor.scene().background().map(|image| image.id()), before);
    }

    #[test]
    fn test_background_is_replaced() {
        let mut editor = Editor::default();
        let second = image();
        send(&mut editor, EditorEvent::BackgroundLoaded(Ok(image())));
        send(&mut editor, EditorEvent::BackgroundLoaded(Ok(second.clone())));

        assert_eq!(editor.scene().background().map(|image| image.id()), Some(second.id()));
    }

    #[test]
    fn test_add_text_uses_chosen_style_and_clears_input() {
        let mut editor = Editor::default();
        send(&mut editor, EditorEvent::EditColor(Color32::YELLOW));
        send(&mut editor, EditorEvent::EditSize(60.0));
        send(&mut editor, EditorEvent::TextInputChanged("  one does not simply  ".to_owned()));

        assert_eq!(send(&mut editor, EditorEvent::AddText), Outcome::Repaint);

        let text = &editor.scene().texts()[0];
        assert_eq!(text.content(), "one does not simply");
        assert_eq!(text.anchor(), Pos2::new(250.0, 250.0));
        assert_eq!(text.color(), Color32::YELLOW);
        assert_eq!(text.size(), 60.0);
        assert!(editor.panel().text_input.is_empty());
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let mut editor = Editor::default();
        send(&mut editor, EditorEvent::TextInputChanged("   ".to_owned()));

        assert_eq!(send(&mut editor, EditorEvent::AddText), Outcome::Unchanged);
        assert!(editor.scene().texts().is_empty());
        assert_eq!(editor.panel().text_input, "   ");
    }

    #[test]
    fn test_export_guard() {
        let mut editor = Editor::default();

        assert_eq!(send(&mut editor, EditorEvent::Export), Outcome::Unchanged);
        assert!(!editor.take_export_request());

        send(&mut editor, EditorEvent::OverlayLoaded(Ok(image())));
        assert_eq!(send(&mut editor, EditorEvent::Export), Outcome::Repaint);
        assert!(editor.take_export_request());
        assert!(!editor.take_export_request());
    }

    #[test]
    fn test_press_syncs_overlay_geometry_into_panel() {
        let mut editor = Editor::default();
        send(&mut editor, EditorEvent::OverlayLoaded(Ok(image())));
        send(&mut editor, EditorEvent::PointerDown(Pos2::new(60.0, 60.0)));
        send(&mut editor, EditorEvent::EditWidth(150.0));
        send(&mut editor, EditorEvent::PointerUp);

        send(&mut editor, EditorEvent::PointerDown(Pos2::new(400.0, 400.0)));
        assert_eq!(editor.scene().selection(), None);

        send(&mut editor, EditorEvent::PointerDown(Pos2::new(60.0, 60.0)));
        assert_eq!(editor.scene().selection(), Some(ElementRef::Overlay(0)));
        assert_eq!(editor.panel().width, 150.0);
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut editor = Editor::default();
        send(&mut editor, EditorEvent::OverlayLoaded(Ok(image())));
        send(&mut editor, EditorEvent::PointerDown(Pos2::new(60.0, 60.0)));
        send(&mut editor, EditorEvent::PointerLeave);

        let outcome = send(&mut editor, EditorEvent::PointerMove(Pos2::new(90.0, 90.0)));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(editor.scene().overlays()[0].position(), Pos2::new(50.0, 50.0));
        assert_eq!(editor.scene().selection(), Some(ElementRef::Overlay(0)));
    }
}
