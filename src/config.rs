use egui::{Color32, FontFamily, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::geometry::shape::Shape;
use crate::templates::{Template, default_templates};

/// Environment variable naming an optional JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "MEME_EDITOR_CONFIG";

/// Font family used for captions, both when drawing and when measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    Proportional,
    Monospace,
}

impl FontChoice {
    pub fn family(self) -> FontFamily {
        match self {
            FontChoice::Proportional => FontFamily::Proportional,
            FontChoice::Monospace => FontFamily::Monospace,
        }
    }
}

/// Geometry given to a freshly loaded overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayDefaults {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape: Shape,
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 100.0,
            shape: Shape::Rectangle,
        }
    }
}

impl OverlayDefaults {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// Initial caption styling and the range offered by the size control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub color: Color32,
    pub size: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            size: 40.0,
            min_size: 10.0,
            max_size: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    pub canvas_size: Vec2,
    /// Backdrop painted where nothing else is drawn
    pub canvas_fill: Color32,
    /// Selection outline color
    pub accent_color: Color32,
    pub outline_width: f32,
    pub font: FontChoice,
    pub overlay_defaults: OverlayDefaults,
    pub text_defaults: TextDefaults,
    pub export_file_name: String,
    /// Directory exports are written to on native builds (current dir when unset)
    pub export_dir: Option<PathBuf>,
    pub templates: Vec<Template>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::new(500.0, 500.0),
            canvas_fill: Color32::WHITE,
            accent_color: Color32::from_rgb(0x42, 0x99, 0xe1),
            outline_width: 2.0,
            font: FontChoice::default(),
            overlay_defaults: OverlayDefaults::default(),
            text_defaults: TextDefaults::default(),
            export_file_name: "meme.png".to_owned(),
            export_dir: None,
            templates: default_templates(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            log::debug!("{} not set, using default config", CONFIG_ENV_VAR);
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Where new captions are anchored
    pub fn canvas_center(&self) -> Pos2 {
        Pos2::new(self.canvas_size.x / 2.0, self.canvas_size.y / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.canvas_size, Vec2::new(500.0, 500.0));
        assert_eq!(config.canvas_center(), Pos2::new(250.0, 250.0));
        assert_eq!(config.accent_color, Color32::from_rgb(66, 153, 225));
        assert_eq!(config.outline_width, 2.0);
        assert_eq!(config.export_file_name, "meme.png");
        assert_eq!(
            config.overlay_defaults.rect(),
            Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::splat(100.0))
        );
        assert_eq!(config.overlay_defaults.shape, Shape::Rectangle);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "outline_width": 3.0, "font": "Monospace" }"#;
        let config = EditorConfig::from_json_str(json).unwrap();
        assert_eq!(config.outline_width, 3.0);
        assert_eq!(config.font, FontChoice::Monospace);
        assert_eq!(config.export_file_name, "meme.png");
        assert_eq!(config.templates.len(), 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(EditorConfig::from_path(&missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = EditorConfig::default();
        config.canvas_size = Vec2::new(640.0, 480.0);
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(EditorConfig::from_path(&path).unwrap(), config);
    }
}
