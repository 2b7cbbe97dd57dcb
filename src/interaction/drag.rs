use crate::command::Command;
use crate::state::EditorState;
use crate::viewport::Viewport;
use egui::{Pos2, Vec2};

/// Moves the whole selection with the pointer.
///
/// Deltas are incremental: every move dispatches only the distance covered
/// since the previous move, then resets the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    last_pointer: Pos2,
    /// Net canvas-space movement since the pointer went down
    total: Vec2,
}

impl DragGesture {
    pub fn begin(pointer: Pos2) -> Self {
        Self {
            last_pointer: pointer,
            total: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, pointer: Pos2, state: &EditorState, view: &Viewport) -> Option<Command> {
        let delta = view.delta_to_canvas(pointer - self.last_pointer);
        self.last_pointer = pointer;
        if delta == Vec2::ZERO || state.selection().is_empty() {
            return None;
        }
        self.total += delta;
        Some(Command::MoveLayers {
            ids: state.selection().to_vec(),
            dx: delta.x,
            dy: delta.y,
        })
    }

    /// A checkpoint when the selection actually moved
    pub fn finish(self, threshold: f32) -> Option<Command> {
        (self.total.x.abs() > threshold || self.total.y.abs() > threshold).then_some(Command::PushHistory)
    }
}
