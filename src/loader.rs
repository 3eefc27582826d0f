use std::path::PathBuf;

use egui::{ColorImage, DroppedFile};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::ImageLoadError;
use crate::event::EditorEvent;
use crate::image::{ImageRef, SceneImage};

/// Where the bytes of an image come from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A template or any other remote image. Fetched with CORS on the web.
    Url(String),
    /// Bytes already in memory, e.g. a file dropped into the browser
    Bytes { label: String, bytes: Vec<u8> },
    /// A local file (native only)
    Path(PathBuf),
}

impl ImageSource {
    pub fn label(&self) -> String {
        match self {
            ImageSource::Url(url) => url.clone(),
            ImageSource::Bytes { label, .. } => label.clone(),
            ImageSource::Path(path) => path.display().to_string(),
        }
    }
}

/// What a loaded image becomes in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    Background,
    Overlay,
}

#[derive(Debug)]
pub struct LoadResult {
    pub target: LoadTarget,
    pub result: Result<ImageRef, ImageLoadError>,
}

impl LoadResult {
    pub fn into_event(self) -> EditorEvent {
        match self.target {
            LoadTarget::Background => EditorEvent::BackgroundLoaded(self.result),
            LoadTarget::Overlay => EditorEvent::OverlayLoaded(self.result),
        }
    }
}

/// Decodes any format the image crate understands into a shared scene image
pub fn decode_image(label: &str, bytes: &[u8]) -> Result<ImageRef, ImageLoadError> {
    let decoded = image::load_from_memory(bytes)?;
    log::debug!("Decoded {}: {}x{}", label, decoded.width(), decoded.height());

    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(SceneImage::new_ref(label, pixels))
}

/// Resolves a source synchronously. Remote URLs need the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_blocking(source: ImageSource) -> Result<ImageRef, ImageLoadError> {
    let label = source.label();
    match source {
        ImageSource::Bytes { bytes, .. } => decode_image(&label, &bytes),
        ImageSource::Path(path) => decode_image(&label, &std::fs::read(&path)?),
        ImageSource::Url(url) => match url.strip_prefix("file://") {
            Some(path) => decode_image(&label, &std::fs::read(path)?),
            None => Err(ImageLoadError::Unsupported(format!(
                "remote images are only fetched in the web build: {}",
                url
            ))),
        },
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }

    let name = match &file.path {
        Some(path) => path.display().to_string(),
        None => file.name.clone(),
    };
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Turns files dropped onto the window into image sources, skipping anything
/// that is not an image or carries no data.
pub fn dropped_sources(files: &[DroppedFile]) -> Vec<ImageSource> {
    let mut sources = Vec::new();

    for file in files {
        let file_name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if !is_image_file(file) {
            log::warn!("Dropped file is not a supported type: {}", file_name);
            continue;
        }

        if let Some(bytes) = &file.bytes {
            log::info!("Loading dropped image from memory: {} ({} bytes)", file_name, bytes.len());
            sources.push(ImageSource::Bytes {
                label: file_name,
                bytes: bytes.to_vec(),
            });
        } else if let Some(path) = &file.path {
            log::info!("Loading dropped image from path: {}", path.display());
            sources.push(ImageSource::Path(path.clone()));
        } else {
            log::warn!("Dropped file has no accessible data: {}", file_name);
        }
    }

    sources
}

/// Resolves image sources off the UI thread and hands results back through a
/// channel drained once per frame.
///
/// Results arrive in completion order, so when two loads race for the
/// background the later one to finish wins.
pub struct ImageLoader {
    tx: UnboundedSender<LoadResult>,
    rx: UnboundedReceiver<LoadResult>,
    repaint: Option<egui::Context>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded();
        Self { tx, rx, repaint: None }
    }

    /// Wakes the UI whenever a result lands
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Starts resolving `source`; the result shows up in a later [`Self::poll`]
    pub fn request(&self, source: ImageSource, target: LoadTarget) {
        log::info!("Loading {:?} from {}", target, source.label());
        let sender = Sender {
            tx: self.tx.clone(),
            repaint: self.repaint.clone(),
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || sender.send(target, resolve_blocking(source)));

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = web::resolve(source).await;
            sender.send(target, result);
        });
    }

    /// Opens a file picker and loads whatever image the user chooses
    pub fn pick_and_load(&self, target: LoadTarget) {
        let sender = Sender {
            tx: self.tx.clone(),
            repaint: self.repaint.clone(),
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .set_title("Choose an image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
            else {
                log::debug!("File picker closed without a choice");
                return;
            };
            sender.send(target, resolve_blocking(ImageSource::Path(path)));
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let Some(file) = rfd::AsyncFileDialog::new()
                .set_title("Choose an image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                log::debug!("File picker closed without a choice");
                return;
            };
            let label = file.file_name();
            let bytes = file.read().await;
            sender.send(target, decode_image(&label, &bytes));
        });
    }

    /// Drains every result that has arrived since the last call
    pub fn poll(&mut self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        while let Ok(Some(result)) = self.rx.try_next() {
            results.push(result);
        }
        results
    }
}

struct Sender {
    tx: UnboundedSender<LoadResult>,
    repaint: Option<egui::Context>,
}

impl Sender {
    fn send(&self, target: LoadTarget, result: Result<ImageRef, ImageLoadError>) {
        if self.tx.unbounded_send(LoadResult { target, result }).is_err() {
            log::warn!("Image loaded after the editor shut down");
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::{ImageSource, decode_image};
    use crate::error::ImageLoadError;
    use crate::image::ImageRef;

    pub(super) async fn resolve(source: ImageSource) -> Result<ImageRef, ImageLoadError> {
        let label = source.label();
        match source {
            ImageSource::Bytes { bytes, .. } => decode_image(&label, &bytes),
            ImageSource::Url(url) => decode_image(&label, &fetch_bytes(&url).await?),
            ImageSource::Path(path) => Err(ImageLoadError::Unsupported(format!(
                "file paths are not readable in the browser: {}",
                path.display()
            ))),
        }
    }

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ImageLoadError> {
        let fail = |reason: JsValue| ImageLoadError::Fetch {
            url: url.to_owned(),
            reason: format!("{:?}", reason),
        };

        let opts = RequestInit::new();
        opts.set_method("GET");
        // Cross-origin pixels must be CORS-clean for export to work
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(url, &opts).map_err(fail)?;

        let window = web_sys::window().ok_or_else(|| ImageLoadError::Fetch {
            url: url.to_owned(),
            reason: "no window".to_owned(),
        })?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(fail)?
            .dyn_into()
            .map_err(fail)?;

        if !response.ok() {
            return Err(ImageLoadError::Fetch {
                url: url.to_owned(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(fail)?)
            .await
            .map_err(fail)?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let image = decode_image("red.png", &png_bytes(3, 2)).unwrap();
        assert_eq!(image.size(), [3, 2]);
        assert_eq!(image.label(), "red.png");
        assert_eq!(image.pixels().pixels[0], egui::Color32::RED);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_image("junk", b"definitely not an image"),
            Err(ImageLoadError::Decode(_))
        ));
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        std::fs::write(&path, png_bytes(4, 4)).unwrap();

        let image = resolve_blocking(ImageSource::Path(path)).unwrap();
        assert_eq!(image.size(), [4, 4]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = resolve_blocking(ImageSource::Path(PathBuf::from("/definitely/not/here.png")));
        assert!(matches!(result, Err(ImageLoadError::Io(_))));
    }

    #[test]
    fn test_remote_url_unsupported_natively() {
        let url = "https://i.imgflip.com/30b1gx.jpg".to_owned();
        let result = resolve_blocking(ImageSource::Url(url));
        assert!(matches!(result, Err(ImageLoadError::Unsupported(_))));
    }

    #[test]
    fn test_request_delivers_through_poll() {
        let mut loader = ImageLoader::new();
        loader.request(
            ImageSource::Bytes {
                label: "bg".to_owned(),
                bytes: png_bytes(2, 2),
            },
            LoadTarget::Background,
        );

        let mut results = Vec::new();
        for _ in 0..200 {
            results.extend(loader.poll());
            if !results.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert_eq!(results.len(), 1);
        assert!(matches!(results.remove(0).into_event(), EditorEvent::BackgroundLoaded(Ok(_))));
    }

    #[test]
    fn test_dropped_sources_filters_non_images() {
        let files = vec![
            DroppedFile {
                name: "cat.png".to_owned(),
                bytes: Some(png_bytes(1, 1).into()),
                ..Default::default()
            },
            DroppedFile {
                name: "notes.txt".to_owned(),
                bytes: Some(b"hello".to_vec().into()),
                ..Default::default()
            },
            DroppedFile {
                name: "empty.jpg".to_owned(),
                ..Default::default()
            },
        ];

        let sources = dropped_sources(&files);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].label(), "cat.png");
    }
}
