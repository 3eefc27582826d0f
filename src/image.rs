use egui::ColorImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// Identifies a decoded image for texture caching and display-list comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(usize);

impl ImageId {
    pub fn value(self) -> usize {
        self.0
    }
}

// Immutable decoded raster shared by the background and overlays
pub struct SceneImage {
    id: ImageId,
    label: String,
    pixels: Arc<ColorImage>,
}

// Define a reference-counted type alias for SceneImage
pub type ImageRef = Arc<SceneImage>;

impl std::fmt::Debug for SceneImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneImage")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("size", &self.pixels.size)
            .finish()
    }
}

impl SceneImage {
    pub fn new(label: impl Into<String>, pixels: ColorImage) -> Self {
        let id = ImageId(NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst));
        Self {
            id,
            label: label.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn new_ref(label: impl Into<String>, pixels: ColorImage) -> ImageRef {
        Arc::new(Self::new(label, pixels))
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Where the image came from (file name, URL or template key)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pixel dimensions as `[width, height]`
    pub fn size(&self) -> [usize; 2] {
        self.pixels.size
    }

    pub fn pixels(&self) -> &Arc<ColorImage> {
        &self.pixels
    }
}
