use crate::command::Command;
use crate::document::CanvasSize;
use crate::layer::{Geometry, Layer};
use crate::texture_manager::TextureManager;
use egui::{Pos2, Vec2};

/// Turns image files dropped on the window into image layers
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up newly dropped files. Returns true if there are any.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decodes the pending files, uploads their pixels and returns the
    /// commands that add one image layer per file, centered on `center`.
    pub fn process_dropped_files(
        &mut self,
        ctx: &egui::Context,
        textures: &mut TextureManager,
        canvas_size: CanvasSize,
        center: Pos2,
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut added = Vec::new();

        for file in std::mem::take(&mut self.dropped_files) {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let Some(bytes) = read_bytes(&file, &file_name) else {
                continue;
            };

            match image::load_from_memory(&bytes) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let (width, height) = rgba.dimensions();
                    log::info!("Dropped image {} ({}x{})", file_name, width, height);
                    let pixels = egui::ColorImage::from_rgba_unmultiplied(
                        [width as usize, height as usize],
                        rgba.as_raw(),
                    );
                    textures.insert(ctx, &file_name, pixels);

                    let layer = image_layer(&file_name, Vec2::new(width as f32, height as f32), canvas_size, center);
                    added.push(layer.id);
                    commands.push(Command::AddLayer(layer));
                }
                Err(err) => log::error!("Failed to decode image {}: {}", file_name, err),
            }
        }

        if !added.is_empty() {
            commands.push(Command::SetSelection(added));
            commands.push(Command::PushHistory);
            ctx.request_repaint();
        }
        commands
    }

    /// Dims the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop images to add them:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None if !file.mime.is_empty() => text += &format!("\n{}", file.mime),
                    None => text += "\n(unnamed file)",
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

/// An image layer of the image's own size, scaled down to fit the canvas
pub fn image_layer(src: &str, pixel_size: Vec2, canvas_size: CanvasSize, center: Pos2) -> Layer {
    let canvas = canvas_size.to_vec2();
    let scale = (canvas.x / pixel_size.x).min(canvas.y / pixel_size.y).min(1.0);
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let size = pixel_size * scale;
    let min = center - size * 0.5;

    let mut layer = Layer::new_image(src, Geometry::new(min.x, min.y, size.x, size.y));
    layer.name = std::path::Path::new(src)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| src.to_owned());
    layer
}

fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    std::path::Path::new(&name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

fn read_bytes(file: &egui::DroppedFile, file_name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::error!("Failed to read image file {}: {}", path.display(), err);
                    None
                }
            };
        }
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_images_shrink_to_fit_the_canvas() {
        let layer = image_layer(
            "/tmp/photos/beach.jpg",
            Vec2::new(4000.0, 2000.0),
            CanvasSize::new(1000, 1000),
            Pos2::new(500.0, 500.0),
        );
        assert_eq!(layer.geometry.width, 1000.0);
        assert_eq!(layer.geometry.height, 500.0);
        assert_eq!(layer.rect().center(), Pos2::new(500.0, 500.0));
        assert_eq!(layer.name, "beach.jpg");
        assert_eq!(layer.image_src.as_deref(), Some("/tmp/photos/beach.jpg"));
    }

    #[test]
    fn small_images_keep_their_size() {
        let layer = image_layer("logo.png", Vec2::new(64.0, 32.0), CanvasSize::default(), Pos2::ZERO);
        assert_eq!((layer.geometry.width, layer.geometry.height), (64.0, 32.0));
    }
}
