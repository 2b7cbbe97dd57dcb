use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use std::collections::HashMap;

/// Textures for image layers, keyed by the layer's image source.
///
/// Entries not drawn for a while are evicted once the cache grows past its
/// capacity. The pixels stay with whoever inserted them; an evicted source
/// simply draws as a placeholder until it is inserted again.
pub struct TextureManager {
    textures: HashMap<String, TextureHandle>,
    last_used: HashMap<String, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Uploads `image` under `src`, replacing any previous texture for it
    pub fn insert(&mut self, ctx: &Context, src: &str, image: ColorImage) -> TextureId {
        self.prune_cache_if_needed();
        let handle = ctx.load_texture(format!("image:{src}"), image, TextureOptions::LINEAR);
        let id = handle.id();
        self.textures.insert(src.to_owned(), handle);
        self.last_used.insert(src.to_owned(), self.current_frame);
        id
    }

    /// Texture for `src`, marking it as used this frame
    pub fn get(&mut self, src: &str) -> Option<TextureId> {
        let id = self.textures.get(src)?.id();
        self.last_used.insert(src.to_owned(), self.current_frame);
        Some(id)
    }

    pub fn contains(&self, src: &str) -> bool {
        self.textures.contains_key(src)
    }

    fn prune_cache_if_needed(&mut self) {
        if self.textures.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self
            .last_used
            .iter()
            .map(|(src, frame)| (src.clone(), *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.textures.len() + 1 - self.max_cache_size;
        for (src, _) in entries.into_iter().take(to_remove) {
            self.textures.remove(&src);
            self.last_used.remove(&src);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> ColorImage {
        ColorImage::new([10, 10], egui::Color32::WHITE)
    }

    #[test]
    fn insert_then_get_returns_same_texture() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = manager.insert(&ctx, "photo.png", pixel());
        assert_eq!(manager.get("photo.png"), Some(id));
        assert_eq!(manager.get("missing.png"), None);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);

        manager.insert(&ctx, "a", pixel());
        manager.begin_frame();
        manager.insert(&ctx, "b", pixel());
        manager.begin_frame();
        manager.get("a");
        manager.begin_frame();
        manager.insert(&ctx, "c", pixel());

        assert_eq!(manager.cache_size(), 2);
        assert!(manager.contains("a"));
        assert!(!manager.contains("b"));
        assert!(manager.contains("c"));
    }
}
