use crate::layer::{Layer, LayerId};
use crate::tool::Tool;
use serde::{Deserialize, Serialize};

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1080, 1080)
    }
}

/// The design being edited: canvas, layers (back to front), selection,
/// active tool and zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    pub(crate) canvas_size: CanvasSize,
    pub(crate) layers: Vec<Layer>,
    /// Selected layer ids in selection order. Not validated against `layers`.
    pub(crate) selection: Vec<LayerId>,
    pub(crate) tool: Tool,
    pub(crate) zoom: f32,
}

impl Default for EditorDocument {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl EditorDocument {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            canvas_size,
            layers: Vec::new(),
            selection: Vec::new(),
            tool: Tool::Select,
            zoom: 1.0,
        }
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// Layers from back to front
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Stacking position of a layer; 0 is the bottom
    pub fn z_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    pub fn selection(&self) -> &[LayerId] {
        &self.selection
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selection.contains(&id)
    }

    /// The layer single-layer gestures (resize, rotate) operate on
    pub fn first_selected(&self) -> Option<&Layer> {
        self.selection.first().and_then(|id| self.layer(*id))
    }

    /// Selected layers that still exist, in stacking order
    pub fn selected_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|layer| self.selection.contains(&layer.id))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}
