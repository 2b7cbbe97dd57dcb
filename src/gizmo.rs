use crate::geometry::hit_testing::{resize_handle_position, rotate_handle_position, screen_rect};
use crate::geometry::shapes::rotate_about;
use crate::geometry::Handle;
use crate::layer::Layer;
use crate::state::EditorState;
use crate::viewport::Viewport;
use crate::widgets::{HANDLE_RADIUS, ResizeHandle};
use egui::{Color32, Painter, Pos2, Shape, Stroke};

const FRAME_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const LOCKED_COLOR: Color32 = Color32::from_rgb(156, 163, 175);
const FRAME_WIDTH: f32 = 1.5;

/// Selection frames for every selected layer, plus resize and rotate
/// handles on the first selected one when it can be transformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionOverlay {
    /// Handle under the pointer, drawn highlighted
    pub hovered: Option<Handle>,
}

impl SelectionOverlay {
    pub fn new(hovered: Option<Handle>) -> Self {
        Self { hovered }
    }

    pub fn paint(&self, painter: &Painter, state: &EditorState, view: &Viewport) {
        let doc = state.document();
        for layer in doc.selected_layers().filter(|layer| layer.visible) {
            let color = if layer.locked { LOCKED_COLOR } else { FRAME_COLOR };
            painter.add(Shape::closed_line(frame_corners(layer, view).to_vec(), Stroke::new(FRAME_WIDTH, color)));
        }

        let Some(layer) = doc.first_selected().filter(|layer| layer.visible && !layer.locked) else {
            return;
        };

        let top_middle = resize_handle_position(layer, view, ResizeHandle::North);
        let rotate = rotate_handle_position(layer, view);
        painter.line_segment([top_middle, rotate], Stroke::new(1.0, FRAME_COLOR));
        let rotate_hovered = self.hovered == Some(Handle::Rotate);
        painter.circle(
            rotate,
            HANDLE_RADIUS * 0.6,
            if rotate_hovered { FRAME_COLOR } else { Color32::WHITE },
            Stroke::new(1.5, FRAME_COLOR),
        );

        for handle in ResizeHandle::ALL {
            let hovered = self.hovered == Some(Handle::Resize(handle));
            handle.draw(painter, resize_handle_position(layer, view, handle), hovered);
        }
    }
}

/// Corners of the layer's rotated box on screen, clockwise from top-left
pub fn frame_corners(layer: &Layer, view: &Viewport) -> [Pos2; 4] {
    let rect = screen_rect(layer, view);
    let rotation = layer.geometry.rotation;
    [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
        .map(|corner| rotate_about(corner, rect.center(), rotation))
}
