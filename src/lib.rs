#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod image;
pub mod input;
pub mod loader;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod templates;
pub mod text_measure;
pub mod texture_manager;

pub use app::MemeApp;
pub use config::EditorConfig;
pub use editor::Editor;
pub use element::{ElementRef, OverlayElement, TextElement};
pub use event::{EditorEvent, Outcome};
pub use geometry::{ClipRegion, Shape, hit_test};
pub use crate::image::{ImageRef, SceneImage};
pub use panels::PanelState;
pub use renderer::{DrawOp, RecordingSurface, Renderer, Surface};
pub use scene::Scene;
pub use state::{InteractionController, InteractionState};
pub use text_measure::{FixedAdvance, FontMeasure, TextMeasure};
