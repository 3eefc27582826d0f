use std::io::Cursor;
use std::path::PathBuf;

use egui::{Color32, ColorImage, Rect};
use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;

/// Cuts the canvas out of a full-window screenshot.
///
/// `canvas` is in points; `pixels_per_point` converts it to the screenshot's
/// physical pixels. A canvas that hangs past the window edge is cut to the
/// part that was actually captured. No overlap gives an empty image.
pub fn crop_to_canvas(screenshot: &ColorImage, canvas: Rect, pixels_per_point: f32) -> ColorImage {
    let [width, height] = screenshot.size;
    let to_pixel = |points: f32, limit: usize| {
        ((points * pixels_per_point).round().max(0.0) as usize).min(limit)
    };

    let (min_x, max_x) = (to_pixel(canvas.min.x, width), to_pixel(canvas.max.x, width));
    let (min_y, max_y) = (to_pixel(canvas.min.y, height), to_pixel(canvas.max.y, height));
    if min_x >= max_x || min_y >= max_y {
        log::warn!("Canvas {:?} is outside the {}x{} screenshot", canvas, width, height);
        return ColorImage::new([0, 0], Color32::TRANSPARENT);
    }

    let size = [max_x - min_x, max_y - min_y];
    let expected = (canvas.size() * pixels_per_point).round();
    if (size[0] as f32) < expected.x || (size[1] as f32) < expected.y {
        log::warn!(
            "Canvas only partly visible, exporting {}x{} of {}x{} pixels",
            size[0],
            size[1],
            expected.x,
            expected.y
        );
    }

    let pixels = (min_y..max_y)
        .flat_map(|y| screenshot.pixels[y * width + min_x..y * width + max_x].iter().copied())
        .collect();
    ColorImage { size, pixels }
}

/// Encodes the captured canvas as PNG
pub fn encode_png(image: &ColorImage) -> Result<Vec<u8>, ExportError> {
    let [width, height] = image.size;
    if width == 0 || height == 0 {
        return Err(ExportError::NoContent);
    }

    let rgba: Vec<u8> =
        image.pixels.iter().flat_map(|pixel| pixel.to_srgba_unmultiplied()).collect();
    let buffer =
        RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or(ExportError::NoContent)?;

    let mut bytes = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    log::debug!("Encoded {}x{} PNG ({} bytes)", width, height, bytes.len());
    Ok(bytes)
}

/// Somewhere the encoded image ends up
pub trait ExportSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> Result<(), ExportError>;
}

/// Writes exports into a directory on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured directory, or the working directory when unset
    pub fn from_config(dir: Option<&PathBuf>) -> Self {
        Self::new(dir.cloned().unwrap_or_else(|| PathBuf::from(".")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for FileSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, png)?;
        log::info!("Exported {}", path.display());
        Ok(())
    }
}

/// Hands the PNG to the browser as a download
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserDownloadSink;

#[cfg(target_arch = "wasm32")]
impl ExportSink for BrowserDownloadSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> Result<(), ExportError> {
        use wasm_bindgen::JsCast;

        let fail = |err: wasm_bindgen::JsValue| ExportError::Download(format!("{:?}", err));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Download("no document".to_owned()))?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&js_sys::Uint8Array::from(png));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
            .map_err(fail)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(fail)?;
        let anchor = document
            .create_element("a")
            .map_err(fail)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|element| fail(element.into()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).ok();
        log::info!("Downloaded {}", file_name);
        Ok(())
    }
}

/// The sink for the current platform
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_sink(config: &crate::config::EditorConfig) -> Box<dyn ExportSink> {
    Box::new(FileSink::from_config(config.export_dir.as_ref()))
}

#[cfg(target_arch = "wasm32")]
pub fn platform_sink(_config: &crate::config::EditorConfig) -> Box<dyn ExportSink> {
    Box::new(BrowserDownloadSink)
}
