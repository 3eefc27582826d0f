use thiserror::Error;

/// Errors that can occur while resolving or decoding an image source
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Unsupported image source: {0}")]
    Unsupported(String),
}

/// Errors that can occur while exporting the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No content to export")]
    NoContent,
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Browser download failed: {0}")]
    Download(String),
}

/// Errors that can occur while loading the editor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A property edit that carries a value the scene cannot hold
#[derive(Error, Debug, PartialEq)]
pub enum EditError {
    #[error("{attribute} must be a positive finite number, got {value}")]
    NotPositive { attribute: &'static str, value: f32 },
}
