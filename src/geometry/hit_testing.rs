use super::shapes::rotate_about;
use crate::layer::{Layer, LayerId};
use crate::viewport::Viewport;
use crate::widgets::resize_handle::{HANDLE_RADIUS, ResizeHandle};
use egui::{Pos2, Rect};

/// Distance of the rotate handle above the top edge, in screen points
pub const ROTATE_HANDLE_OFFSET: f32 = 24.0;

/// Extra grab margin around thin layers such as lines, in canvas units
pub const MIN_HIT_THICKNESS: f32 = 8.0;

/// A selection handle under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Resize(ResizeHandle),
    Rotate,
}

/// Whether canvas point `pos` lies inside the layer's rotated box
pub fn layer_contains(layer: &Layer, pos: Pos2) -> bool {
    let rect = layer.rect();
    let local = rotate_about(pos, rect.center(), -layer.geometry.rotation);
    let grow_x = ((MIN_HIT_THICKNESS - rect.width()) * 0.5).max(0.0);
    let grow_y = ((MIN_HIT_THICKNESS - rect.height()) * 0.5).max(0.0);
    rect.expand2(egui::vec2(grow_x, grow_y)).contains(local)
}

/// Topmost visible layer under canvas point `pos`
pub fn hit_layer(layers: &[Layer], pos: Pos2) -> Option<LayerId> {
    layers
        .iter()
        .rev()
        .find(|layer| layer.visible && layer_contains(layer, pos))
        .map(|layer| layer.id)
}

/// Screen rectangle of the layer's unrotated box
pub fn screen_rect(layer: &Layer, view: &Viewport) -> Rect {
    view.rect_to_screen(layer.rect())
}

/// Screen position of a resize handle, following the layer's rotation
pub fn resize_handle_position(layer: &Layer, view: &Viewport, handle: ResizeHandle) -> Pos2 {
    let rect = screen_rect(layer, view);
    rotate_about(handle.position(rect), rect.center(), layer.geometry.rotation)
}

/// Screen position of the rotate handle, above the top edge
pub fn rotate_handle_position(layer: &Layer, view: &Viewport) -> Pos2 {
    let rect = screen_rect(layer, view);
    let above = Pos2::new(rect.center().x, rect.top() - ROTATE_HANDLE_OFFSET);
    rotate_about(above, rect.center(), layer.geometry.rotation)
}

/// Handle of `layer` under screen point `pos`, the rotate handle first
pub fn hit_handle(layer: &Layer, view: &Viewport, pos: Pos2) -> Option<Handle> {
    if pos.distance(rotate_handle_position(layer, view)) <= HANDLE_RADIUS {
        return Some(Handle::Rotate);
    }
    ResizeHandle::ALL
        .into_iter()
        .find(|handle| pos.distance(resize_handle_position(layer, view, *handle)) <= HANDLE_RADIUS)
        .map(Handle::Resize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Geometry, LayerKind};

    #[test]
    fn rotated_layers_hit_in_their_own_frame() {
        let mut layer = Layer::new(LayerKind::Rectangle, Geometry::new(0.0, 40.0, 100.0, 20.0));
        // Unrotated: a point above the bar misses
        assert!(!layer_contains(&layer, Pos2::new(50.0, 5.0)));
        layer.geometry.rotation = 90.0;
        // Standing upright the bar now covers it
        assert!(layer_contains(&layer, Pos2::new(50.0, 5.0)));
        assert!(!layer_contains(&layer, Pos2::new(5.0, 50.0)));
    }

    #[test]
    fn topmost_visible_layer_wins() {
        let bottom = Layer::new(LayerKind::Rectangle, Geometry::new(0.0, 0.0, 100.0, 100.0));
        let mut top = Layer::new(LayerKind::Circle, Geometry::new(0.0, 0.0, 100.0, 100.0));
        let layers = vec![bottom.clone(), top.clone()];
        assert_eq!(hit_layer(&layers, Pos2::new(50.0, 50.0)), Some(top.id));

        top.visible = false;
        let layers = vec![bottom.clone(), top];
        assert_eq!(hit_layer(&layers, Pos2::new(50.0, 50.0)), Some(bottom.id));
        assert_eq!(hit_layer(&layers, Pos2::new(150.0, 50.0)), None);
    }

    #[test]
    fn handles_are_found_in_screen_space() {
        let layer = Layer::new(LayerKind::Rectangle, Geometry::new(10.0, 10.0, 100.0, 100.0));
        let view = Viewport::new(Pos2::new(0.0, 0.0), 2.0);
        assert_eq!(
            hit_handle(&layer, &view, Pos2::new(220.0, 220.0)),
            Some(Handle::Resize(ResizeHandle::SouthEast))
        );
        assert_eq!(
            hit_handle(&layer, &view, Pos2::new(120.0, 20.0 - ROTATE_HANDLE_OFFSET)),
            Some(Handle::Rotate)
        );
        assert_eq!(hit_handle(&layer, &view, Pos2::new(120.0, 120.0)), None);
    }
}
