use std::collections::HashMap;

use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::image::{ImageId, ImageRef};

/// Uploads scene images to egui once and keeps their handles around
pub struct TextureManager {
    /// Cache of textures by image id
    texture_cache: HashMap<ImageId, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<ImageId, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
    /// Total uploads since creation
    uploads: u64,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.texture_cache.len())
            .field("current_frame", &self.current_frame)
            .field("max_cache_size", &self.max_cache_size)
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
            uploads: 0,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame.
    ///
    /// This is also the only place textures are evicted, so nothing drawn in
    /// the frame that just ended is ever thrown away.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
        self.prune_cache_if_needed();
    }

    /// Gets or uploads the texture for the given image
    pub fn texture_id(&mut self, image: &ImageRef, ctx: &Context) -> TextureId {
        let key = image.id();

        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return handle.id();
        }

        let name = format!("scene_image_{}", key.value());
        let handle = ctx.load_texture(name, (**image.pixels()).clone(), TextureOptions::LINEAR);

        let id = handle.id();
        self.texture_cache.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        self.uploads += 1;
        log::debug!(
            "Uploaded texture for image {} ({:?}), {} uploads so far",
            key.value(),
            image.size(),
            self.uploads
        );
        id
    }

    /// Drops the least recently used textures while the cache is over its maximum size.
    /// Only textures that went unused during the previous frame are candidates.
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut stale: Vec<(ImageId, u64)> = self
            .last_used
            .iter()
            .filter(|(_, frame)| **frame + 1 < self.current_frame)
            .map(|(k, v)| (*k, *v))
            .collect();

        // Oldest first; the id breaks ties so eviction is deterministic
        stale.sort_by_key(|(id, frame)| (*frame, *id));

        let to_remove = (self.texture_cache.len() - self.max_cache_size).min(stale.len());
        for (id, _) in stale.iter().take(to_remove) {
            self.texture_cache.remove(id);
            self.last_used.remove(id);
        }
        if to_remove > 0 {
            log::debug!("Evicted {} stale textures", to_remove);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::SceneImage;
    use egui::{Color32, ColorImage};

    fn image() -> ImageRef {
        SceneImage::new_ref("test", ColorImage::new([10, 10], Color32::WHITE))
    }

    impl TextureManager {
        fn cache_size(&self) -> usize {
            self.texture_cache.len()
        }

        fn contains(&self, image: &ImageRef) -> bool {
            self.texture_cache.contains_key(&image.id())
        }

        fn upload_count(&self) -> u64 {
            self.uploads
        }
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let image = image();

        let texture_id1 = manager.texture_id(&image, &ctx);
        let texture_id2 = manager.texture_id(&image, &ctx);

        assert_eq!(texture_id1, texture_id2);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (image(), image(), image());

        manager.begin_frame();
        manager.texture_id(&a, &ctx);
        manager.begin_frame();
        manager.texture_id(&b, &ctx);
        manager.begin_frame();
        manager.texture_id(&c, &ctx);
        // Over the limit, but nothing is evicted mid-frame
        assert_eq!(manager.cache_size(), 3);

        manager.begin_frame();
        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(&a)); // This one should be evicted
        assert!(manager.contains(&b));
        assert!(manager.contains(&c));
    }

    #[test]
    fn test_recently_used_survives() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (image(), image(), image());

        manager.begin_frame();
        manager.texture_id(&a, &ctx);
        manager.begin_frame();
        manager.texture_id(&b, &ctx);
        manager.begin_frame();
        manager.texture_id(&a, &ctx);
        manager.begin_frame();
        manager.texture_id(&c, &ctx);
        manager.begin_frame();

        assert!(manager.contains(&a));
        assert!(!manager.contains(&b));
    }

    #[test]
    fn test_more_images_than_cache_are_not_reuploaded() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(32);
        let images: Vec<ImageRef> = (0..33).map(|_| image()).collect();

        manager.begin_frame();
        for image in &images {
            manager.texture_id(image, &ctx);
        }
        assert_eq!(manager.upload_count(), 33);

        manager.begin_frame();
        for image in &images {
            manager.texture_id(image, &ctx);
        }
        assert_eq!(manager.upload_count(), 33);
        assert_eq!(manager.cache_size(), 33);
    }
}
