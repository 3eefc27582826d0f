use egui::{Align2, Color32, Context, Event, Id, LayerId, Order, Painter, Rect, ViewportCommand};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::event::EditorEvent;
use crate::export::{ExportSink, crop_to_canvas, encode_png, platform_sink};
use crate::input::InputHandler;
use crate::loader::{ImageLoader, ImageSource, LoadTarget, dropped_sources};
use crate::panels::properties::PanelState;
use crate::panels::{central_panel, controls_panel};
use crate::renderer::PainterSurface;
use crate::templates::TemplateRegistry;
use crate::text_measure::FontMeasure;
use crate::texture_manager::TextureManager;

/// Storage key for the control values kept between runs
const PANEL_KEY: &str = "meme_editor_panel";

/// Textures kept alive at once; a meme rarely has more than a handful of images
const TEXTURE_CACHE_SIZE: usize = 32;

pub struct MemeApp {
    editor: Editor,
    templates: TemplateRegistry,
    loader: ImageLoader,
    input: InputHandler,
    textures: TextureManager,
    export_sink: Box<dyn ExportSink>,
    /// Where the canvas was painted in the last frame, in points
    canvas_rect: Option<Rect>,
    /// A screenshot was requested and its event has not arrived yet
    awaiting_screenshot: bool,
}

impl std::fmt::Debug for MemeApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeApp")
            .field("editor", &self.editor)
            .field("canvas_rect", &self.canvas_rect)
            .field("awaiting_screenshot", &self.awaiting_screenshot)
            .finish_non_exhaustive()
    }
}

impl MemeApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let panel = cc
            .storage
            .and_then(|storage| eframe::get_value::<PanelState>(storage, PANEL_KEY));
        Self::with_config(cc.egui_ctx.clone(), EditorConfig::load(), panel)
    }

    pub fn with_config(ctx: Context, config: EditorConfig, panel: Option<PanelState>) -> Self {
        let templates = TemplateRegistry::new(config.templates.clone());
        let export_sink = platform_sink(&config);

        let mut editor = Editor::new(config);
        if let Some(mut panel) = panel {
            log::debug!("Restored panel state");
            // Half-typed captions are not worth keeping
            panel.text_input.clear();
            editor = editor.with_panel(panel);
        }

        Self {
            editor,
            templates,
            loader: ImageLoader::new().with_repaint(ctx),
            input: InputHandler::new(),
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
            export_sink,
            canvas_rect: None,
            awaiting_screenshot: false,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    fn measure(&self, ctx: &Context) -> FontMeasure {
        FontMeasure::new(ctx.clone(), self.editor.config().font.family())
    }

    /// Feeds one event to the editor and schedules a repaint when it asks for one
    pub fn dispatch(&mut self, ctx: &Context, event: EditorEvent) {
        let measure = self.measure(ctx);
        if self.editor.handle_event(event, &measure).needs_repaint() {
            ctx.request_repaint();
        }
    }

    /// Starts loading the template registered under `key` as the background
    pub fn load_template(&mut self, key: &str) {
        self.editor.remember_template(key);
        match self.templates.url(key) {
            Some(url) => {
                let source = ImageSource::Url(url.to_owned());
                self.loader.request(source, LoadTarget::Background);
            }
            None => log::warn!("Unknown template {:?}", key),
        }
    }

    /// Lets the user pick a local image for `target`
    pub fn pick_image(&self, target: LoadTarget) {
        self.loader.pick_and_load(target);
    }

    /// Turns this frame's pointer input into editor events
    pub fn handle_canvas_input(&mut self, ctx: &Context, canvas_rect: Rect) {
        self.canvas_rect = Some(canvas_rect);
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            self.dispatch(ctx, event);
        }
    }

    pub fn paint_canvas(&mut self, ctx: &Context, painter: &Painter, canvas_rect: Rect) {
        let measure = self.measure(ctx);
        let fill = self.editor.config().canvas_fill;
        let mut surface =
            PainterSurface::new(painter, canvas_rect, fill, &mut self.textures, measure);
        self.editor.render(&mut surface);
    }

    fn poll_loader(&mut self, ctx: &Context) {
        for result in self.loader.poll() {
            self.dispatch(ctx, result.into_event());
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for source in dropped_sources(&files) {
            self.loader.request(source, LoadTarget::Overlay);
        }
    }

    /// Darkens the window while files are dragged over it
    fn preview_files_being_dropped(&self, ctx: &Context) {
        let hovered = ctx.input(|i| i.raw.hovered_files.len());
        if hovered == 0 {
            return;
        }

        let layer = LayerId::new(Order::Foreground, Id::new("file_drop_target"));
        let painter = ctx.layer_painter(layer);
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            format!("Drop {} image(s) to add overlays", hovered),
            egui::TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }

    /// Finishes an export once the screenshot of a fully painted frame arrives
    fn handle_screenshots(&mut self, ctx: &Context) {
        if !self.awaiting_screenshot {
            return;
        }

        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.awaiting_screenshot = false;

        let Some(canvas_rect) = self.canvas_rect else {
            log::error!("Screenshot arrived before the canvas was laid out");
            return;
        };

        let canvas = crop_to_canvas(&screenshot, canvas_rect, ctx.pixels_per_point());
        let file_name = self.editor.config().export_file_name.clone();
        let result = encode_png(&canvas).and_then(|png| self.export_sink.deliver(&file_name, &png));
        if let Err(err) = result {
            log::error!("Export failed: {}", err);
        }
    }
}

impl eframe::App for MemeApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PANEL_KEY, self.editor.panel());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();

        self.handle_screenshots(ctx);
        self.poll_loader(ctx);
        self.handle_dropped_files(ctx);

        controls_panel(self, ctx);
        central_panel(self, ctx);

        self.preview_files_being_dropped(ctx);

        // Everything is painted by now, so the capture sees a complete frame
        if self.editor.take_export_request() {
            log::info!("Capturing canvas for export");
            self.awaiting_screenshot = true;
            ctx.send_viewport_cmd(ViewportCommand::Screenshot(Default::default()));
        }
    }
}
