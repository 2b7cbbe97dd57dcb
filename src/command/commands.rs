use crate::document::CanvasSize;
use crate::layer::{Layer, LayerId, LayerPatch};
use crate::tool::Tool;
use serde::{Deserialize, Serialize};

/// The closed set of actions the editor state accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Change the active tool
    SetTool(Tool),

    /// Change the zoom factor (clamped to the configured range)
    SetZoom(f32),

    /// Resize the canvas
    SetCanvasSize(CanvasSize),

    /// Replace the selection verbatim
    SetSelection(Vec<LayerId>),

    /// Append a layer on top of the stack
    AddLayer(Layer),

    /// Re-sort layers to follow the given id order
    ReorderLayers(Vec<LayerId>),

    /// Merge fields into one layer
    UpdateLayer { id: LayerId, patch: LayerPatch },

    /// Merge the same fields into several layers
    UpdateLayers { ids: Vec<LayerId>, patch: LayerPatch },

    /// Translate layers by a canvas-space delta
    MoveLayers { ids: Vec<LayerId>, dx: f32, dy: f32 },

    /// Remove layers and drop them from the selection
    DeleteLayers(Vec<LayerId>),

    /// Copy layers on top of the stack and select the copies
    DuplicateLayers(Vec<LayerId>),

    /// Replace the whole design, e.g. after opening a saved one
    LoadDocument {
        canvas_size: CanvasSize,
        layers: Vec<Layer>,
    },

    /// Record the current layers as an undo checkpoint
    PushHistory,

    Undo,

    Redo,
}

impl Command {
    /// Short label for logs and the history panel
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetTool(_) => "Set Tool",
            Command::SetZoom(_) => "Set Zoom",
            Command::SetCanvasSize(_) => "Set Canvas Size",
            Command::SetSelection(_) => "Set Selection",
            Command::AddLayer(_) => "Add Layer",
            Command::ReorderLayers(_) => "Reorder Layers",
            Command::UpdateLayer { .. } => "Update Layer",
            Command::UpdateLayers { .. } => "Update Layers",
            Command::MoveLayers { .. } => "Move Layers",
            Command::DeleteLayers(_) => "Delete Layers",
            Command::DuplicateLayers(_) => "Duplicate Layers",
            Command::LoadDocument { .. } => "Load Document",
            Command::PushHistory => "Checkpoint",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }
}
