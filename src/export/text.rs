//! Text rasterization for export, using the proportional font egui ships with.

use crate::layer::{Layer, TextAlign};
use ab_glyph::{Font as _, FontArc, GlyphId, ScaleFont as _, point};
use egui::FontDefinitions;
use image::RgbaImage;
use log::warn;
use std::sync::OnceLock;

const FONT_NAME: &str = "Ubuntu-Light";

/// Larger sizes are clamped; glyphs that big never fit a canvas anyway
const MAX_FONT_SIZE: f32 = 2048.0;

fn export_font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| {
        let fonts = FontDefinitions::default();
        let data = fonts.font_data.get(FONT_NAME)?;
        FontArc::try_from_vec(data.font.to_vec())
            .map_err(|err| warn!("cannot load export font {FONT_NAME}: {err}"))
            .ok()
    })
    .as_ref()
}

pub(super) fn draw_text(image: &mut RgbaImage, layer: &Layer) {
    let Some(style) = &layer.text else {
        return;
    };
    let Some(font) = export_font() else {
        return;
    };
    if style.font_size.is_nan() || style.font_size <= 0.0 {
        return;
    }

    let size = style.font_size.min(MAX_FONT_SIZE);
    let scaled = font.as_scaled(size);
    let color = super::faded(style.color, layer.opacity);
    let rect = layer.rect();

    let lines: Vec<&str> = style.content.lines().collect();
    let line_height = scaled.height() + scaled.line_gap();
    let block_height = lines.len() as f32 * line_height - scaled.line_gap();
    let mut baseline = rect.center().y - block_height * 0.5 + scaled.ascent();

    for line in lines {
        let width = line_width(font, size, line);
        let mut x = match style.align {
            TextAlign::Left => rect.left(),
            TextAlign::Center => rect.center().x - width * 0.5,
            TextAlign::Right => rect.right() - width,
        };

        let mut previous: Option<GlyphId> = None;
        for c in line.chars() {
            let id = font.glyph_id(c);
            if let Some(previous) = previous {
                x += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(size, point(x, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let gx = bounds.min.x + px as f32;
                    let gy = bounds.min.y + py as f32;
                    if gx < 0.0 || gy < 0.0 || gx >= image.width() as f32 || gy >= image.height() as f32 {
                        return;
                    }
                    let [r, g, b, a] = color;
                    let alpha = (a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
                    super::blend(image, gx as u32, gy as u32, [r, g, b, alpha]);
                });
            }
            x += scaled.h_advance(id);
            previous = Some(id);
        }
        baseline += line_height;
    }
}

/// Advance width of `line` at `size`, kerning included
fn line_width(font: &FontArc, size: f32, line: &str) -> f32 {
    let scaled = font.as_scaled(size);
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in line.chars() {
        let id = font.glyph_id(c);
        if let Some(previous) = previous {
            width += scaled.kern(previous, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Geometry, LayerKind};

    #[test]
    fn bundled_font_loads() {
        assert!(export_font().is_some());
    }

    #[test]
    fn lowercase_and_accents_have_width() {
        let font = export_font().unwrap();
        assert!(line_width(font, 24.0, "héllo") > line_width(font, 24.0, "hé"));
        assert!(line_width(font, 24.0, "é") > 0.0);
    }

    #[test]
    fn huge_font_sizes_do_not_overflow() {
        let mut layer = Layer::new(LayerKind::Text, Geometry::new(0.0, 0.0, 20.0, 20.0));
        if let Some(style) = layer.text.as_mut() {
            style.font_size = f32::MAX;
            style.content = "W\nW".to_owned();
        }
        let mut image = RgbaImage::from_pixel(20, 20, image::Rgba([255, 255, 255, 255]));
        draw_text(&mut image, &layer);
    }
}
