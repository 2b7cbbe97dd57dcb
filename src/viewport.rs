use egui::{Pos2, Rect, Vec2};

/// Maps between canvas units and screen points.
///
/// `screen = origin + canvas * zoom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen position of the canvas origin
    pub origin: Pos2,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: Pos2, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    /// Centers a canvas of `canvas_size` inside `available`
    pub fn centered(available: Rect, canvas_size: Vec2, zoom: f32) -> Self {
        let origin = available.center() - canvas_size * zoom * 0.5;
        Self { origin, zoom }
    }

    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.origin + canvas.to_vec2() * self.zoom
    }

    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        Pos2::ZERO + (screen - self.origin) / self.zoom
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    /// Converts a screen-space delta to canvas units
    pub fn delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }
}
