//! Best-effort PNG export.
//!
//! Rectangles, circles, ellipses and text are rasterized on a white canvas.
//! Gradients collapse to their first stop, rotation is ignored and every
//! other layer kind is skipped.

mod text;

use crate::document::{CanvasSize, EditorDocument};
use crate::error::ExportError;
use crate::layer::{Layer, LayerKind};
use egui::{Color32, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, info};
use std::io::Cursor;
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn rasterize(document: &EditorDocument) -> RgbaImage {
    rasterize_layers(document.canvas_size(), document.layers())
}

pub fn rasterize_layers(canvas_size: CanvasSize, layers: &[Layer]) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(canvas_size.width, canvas_size.height, BACKGROUND);

    for layer in layers.iter().filter(|layer| layer.visible) {
        match layer.kind {
            LayerKind::Rectangle => fill_rect(&mut image, layer.rect(), faded(layer.fill.base_color(), layer.opacity)),
            LayerKind::Circle | LayerKind::Ellipse => {
                fill_ellipse(&mut image, layer.rect(), faded(layer.fill.base_color(), layer.opacity));
            }
            LayerKind::Text => text::draw_text(&mut image, layer),
            kind => debug!("export skips {kind} layer {}", layer.id),
        }
    }

    image
}

pub fn encode_png(document: &EditorDocument) -> Result<Vec<u8>, ExportError> {
    let size = document.canvas_size();
    if size.width == 0 || size.height == 0 {
        return Err(ExportError::EmptyCanvas);
    }
    let image = rasterize(document);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn save_png(document: &EditorDocument, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let bytes = encode_png(document)?;
    std::fs::write(path, &bytes)?;
    info!("exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn faded(color: Color32, opacity: f32) -> [u8; 4] {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    [r, g, b, (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8]
}

fn blend(image: &mut RgbaImage, x: u32, y: u32, [r, g, b, a]: [u8; 4]) {
    if a == 0 {
        return;
    }
    let pixel = image.get_pixel_mut(x, y);
    let alpha = a as f32 / 255.0;
    let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
    *pixel = Rgba([mix(r, pixel[0]), mix(g, pixel[1]), mix(b, pixel[2]), 255]);
}

/// Pixel columns/rows whose centers fall inside `rect`, clipped to the image
fn pixel_span(image: &RgbaImage, rect: Rect) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
    let clamp = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
    (
        clamp(rect.min.x, image.width())..clamp(rect.max.x, image.width()),
        clamp(rect.min.y, image.height())..clamp(rect.max.y, image.height()),
    )
}

fn fill_rect(image: &mut RgbaImage, rect: Rect, color: [u8; 4]) {
    let (xs, ys) = pixel_span(image, rect);
    for y in ys {
        for x in xs.clone() {
            blend(image, x, y, color);
        }
    }
}

fn fill_ellipse(image: &mut RgbaImage, rect: Rect, color: [u8; 4]) {
    let center = rect.center();
    let (rx, ry) = (rect.width() * 0.5, rect.height() * 0.5);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let (xs, ys) = pixel_span(image, rect);
    for y in ys {
        for x in xs.clone() {
            let dx = (x as f32 + 0.5 - center.x) / rx;
            let dy = (y as f32 + 0.5 - center.y) / ry;
            if dx * dx + dy * dy <= 1.0 {
                blend(image, x, y, color);
            }
        }
    }
}
