use crate::command::Command;
use crate::layer::{Layer, LayerId, LayerPatch};
use crate::viewport::Viewport;
use crate::widgets::resize_handle::ResizeHandle;
use egui::{Pos2, Rect, Vec2};

/// Resizes a single layer from one of its eight handles
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    layer_id: LayerId,
    handle: ResizeHandle,
    start_pointer: Pos2,
    original: Rect,
    current: Rect,
}

impl ResizeGesture {
    pub fn begin(layer: &Layer, handle: ResizeHandle, pointer: Pos2) -> Self {
        Self {
            layer_id: layer.id,
            handle,
            start_pointer: pointer,
            original: layer.rect(),
            current: layer.rect(),
        }
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    pub fn update(&mut self, pointer: Pos2, view: &Viewport, min_size: f32) -> Option<Command> {
        let delta = view.delta_to_canvas(pointer - self.start_pointer);
        let rect = resize_rect(self.original, self.handle, delta, min_size);
        if rect == self.current {
            return None;
        }
        self.current = rect;
        Some(Command::UpdateLayer {
            id: self.layer_id,
            patch: LayerPatch::bounds(rect),
        })
    }

    /// A checkpoint when the bounds ended up different
    pub fn finish(self) -> Option<Command> {
        (self.current != self.original).then_some(Command::PushHistory)
    }
}

/// New bounds for `original` after dragging `handle` by `delta`.
///
/// Only the edges the handle owns move. A dragged edge never comes closer
/// than `min_size` to the opposite edge, which stays where it was.
pub fn resize_rect(original: Rect, handle: ResizeHandle, delta: Vec2, min_size: f32) -> Rect {
    let (left, top, right, bottom) = handle.edges();
    let mut rect = original;

    if left {
        rect.min.x = (original.min.x + delta.x).min(original.max.x - min_size);
    }
    if right {
        rect.max.x = (original.max.x + delta.x).max(original.min.x + min_size);
    }
    if top {
        rect.min.y = (original.min.y + delta.y).min(original.max.y - min_size);
    }
    if bottom {
        rect.max.y = (original.max.y + delta.y).max(original.min.y + min_size);
    }

    rect
}
