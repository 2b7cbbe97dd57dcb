//! Pointer gestures on the canvas.
//!
//! ```text
//!            pointer down on layer          pointer up
//!   ┌──────┐ ─────────────────────► Dragging ─────────┐
//!   │      │ pointer down on handle                    │
//!   │ Idle │ ─────────────────────► Resizing ──────────┤
//!   │      │ pointer down on rotate                    │
//!   │      │ ─────────────────────► Rotating ──────────┤
//!   └──────┘ ◄─────────────────────────────────────────┘
//! ```
//!
//! Gestures never touch the editor state directly. Each handler returns the
//! commands to dispatch, and every completed gesture that changed something
//! ends with exactly one `PushHistory`.

mod drag;
mod resize;
mod rotate;

pub use drag::DragGesture;
pub use resize::{ResizeGesture, resize_rect};
pub use rotate::{RotateGesture, pointer_angle, snap_angle};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::geometry::{Handle, hit_handle, hit_layer};
use crate::layer::Layer;
use crate::state::EditorState;
use crate::tool::Tool;
use crate::viewport::Viewport;
use egui::Pos2;
use log::debug;

/// Thresholds the gestures use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub min_layer_size: f32,
    pub drag_threshold: f32,
    pub rotation_threshold: f32,
    pub rotation_snap: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for GestureConfig {
    fn from(config: &EditorConfig) -> Self {
        Self {
            min_layer_size: config.min_layer_size,
            drag_threshold: config.drag_threshold,
            rotation_threshold: config.rotation_threshold,
            rotation_snap: config.rotation_snap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragGesture),
    Resizing(ResizeGesture),
    Rotating(RotateGesture),
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "Idle",
            GestureState::Dragging(_) => "Dragging",
            GestureState::Resizing(_) => "Resizing",
            GestureState::Rotating(_) => "Rotating",
        }
    }
}

/// Turns pointer events into editor commands
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: GestureState,
    config: GestureConfig,
}

impl Interaction {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            state: GestureState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// Handle under `pointer` for the layer resize/rotate work on, if any
    pub fn handle_under(&self, pointer: Pos2, editor: &EditorState, view: &Viewport) -> Option<Handle> {
        let layer = transformable_layer(editor)?;
        hit_handle(layer, view, pointer)
    }

    pub fn pointer_down(&mut self, pointer: Pos2, editor: &EditorState, view: &Viewport) -> Vec<Command> {
        let doc = editor.document();

        if let Some(kind) = doc.tool().layer_kind() {
            let layer = Layer::centered_at(kind, view.to_canvas(pointer));
            debug!("creating {} layer {}", kind, layer.id);
            let id = layer.id;
            return vec![
                Command::AddLayer(layer),
                Command::SetSelection(vec![id]),
                Command::SetTool(Tool::Select),
                Command::PushHistory,
            ];
        }

        if let Some(layer) = transformable_layer(editor) {
            match hit_handle(layer, view, pointer) {
                Some(Handle::Resize(handle)) => {
                    debug!("resize {} from {}", layer.id, handle.as_str());
                    self.state = GestureState::Resizing(ResizeGesture::begin(layer, handle, pointer));
                    return Vec::new();
                }
                Some(Handle::Rotate) => {
                    debug!("rotate {}", layer.id);
                    self.state = GestureState::Rotating(RotateGesture::begin(layer, pointer, view));
                    return Vec::new();
                }
                None => {}
            }
        }

        let Some(id) = hit_layer(doc.layers(), view.to_canvas(pointer)) else {
            return if doc.selection().is_empty() {
                Vec::new()
            } else {
                vec![Command::SetSelection(Vec::new())]
            };
        };

        let mut commands = Vec::new();
        if !doc.is_selected(id) {
            commands.push(Command::SetSelection(vec![id]));
        }
        if doc.layer(id).is_some_and(|layer| !layer.locked) {
            debug!("drag start on {id}");
            self.state = GestureState::Dragging(DragGesture::begin(pointer));
        }
        commands
    }

    /// `snap` is whether the rotation snap modifier is held
    pub fn pointer_move(&mut self, pointer: Pos2, snap: bool, editor: &EditorState, view: &Viewport) -> Vec<Command> {
        let command = match &mut self.state {
            GestureState::Idle => None,
            GestureState::Dragging(drag) => drag.update(pointer, editor, view),
            GestureState::Resizing(resize) => resize.update(pointer, view, self.config.min_layer_size),
            GestureState::Rotating(rotate) => rotate.update(pointer, snap, self.config.rotation_snap),
        };
        command.into_iter().collect()
    }

    pub fn pointer_up(&mut self) -> Vec<Command> {
        let finished = std::mem::take(&mut self.state);
        if !matches!(finished, GestureState::Idle) {
            debug!("{} finished", finished.name());
        }
        let command = match finished {
            GestureState::Idle => None,
            GestureState::Dragging(drag) => drag.finish(self.config.drag_threshold),
            GestureState::Resizing(resize) => resize.finish(),
            GestureState::Rotating(rotate) => rotate.finish(self.config.rotation_threshold),
        };
        command.into_iter().collect()
    }
}

/// The first selected layer, when it can show resize/rotate handles
fn transformable_layer(editor: &EditorState) -> Option<&Layer> {
    editor
        .document()
        .first_selected()
        .filter(|layer| layer.visible && !layer.locked)
}
