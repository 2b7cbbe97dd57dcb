//! The editor store.
//!
//! `EditorState` is the single source of truth for a design session. It only
//! changes through [`EditorState::apply`], which consumes the previous state
//! and returns the next one. No command can fail: commands that name unknown
//! layer ids leave those ids alone.

use crate::command::reorder::reorder_layers;
use crate::command::{Command, History};
use crate::config::EditorConfig;
use crate::document::{CanvasSize, EditorDocument};
use crate::layer::{Layer, LayerId, LayerPatch};
use egui::Vec2;
use log::debug;

/// Offset applied to duplicated layers, in canvas units
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    document: EditorDocument,
    history: History,
    zoom_range: (f32, f32),
    /// Bumped whenever the layer list or canvas size actually changes
    revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            document: EditorDocument::new(canvas_size),
            ..Self::default()
        }
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            document: EditorDocument::new(config.default_canvas_size),
            history: History::new(config.history_limit),
            zoom_range: config.zoom_range(),
            revision: 0,
        }
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn layers(&self) -> &[Layer] {
        self.document.layers()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.document.layer(id)
    }

    pub fn selection(&self) -> &[LayerId] {
        self.document.selection()
    }

    /// Design revision; equal revisions mean equal layers and canvas size
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies `command` and returns the resulting state
    #[must_use]
    pub fn apply(mut self, command: Command) -> Self {
        debug!("apply {}", command.name());
        let doc = &mut self.document;
        let mut changed = false;

        match command {
            Command::SetTool(tool) => {
                doc.tool = tool;
            }

            Command::SetZoom(zoom) => {
                let (min, max) = self.zoom_range;
                doc.zoom = if zoom.is_nan() { doc.zoom } else { zoom.clamp(min, max) };
            }

            Command::SetCanvasSize(size) => {
                changed = doc.canvas_size != size;
                doc.canvas_size = size;
            }

            Command::SetSelection(ids) => {
                doc.selection = ids;
            }

            Command::AddLayer(layer) => {
                doc.layers.push(layer);
                changed = true;
            }

            Command::ReorderLayers(order) => {
                let before: Vec<LayerId> = doc.layers.iter().map(|layer| layer.id).collect();
                reorder_layers(&mut doc.layers, &order);
                changed = doc.layers.iter().map(|layer| layer.id).ne(before);
            }

            Command::UpdateLayer { id, patch } => {
                if let Some(layer) = doc.layer_mut(id) {
                    changed = patch_layer(layer, &patch);
                }
            }

            Command::UpdateLayers { ids, patch } => {
                for layer in doc.layers.iter_mut().filter(|layer| ids.contains(&layer.id)) {
                    changed |= patch_layer(layer, &patch);
                }
            }

            Command::MoveLayers { ids, dx, dy } => {
                for layer in doc.layers.iter_mut().filter(|layer| ids.contains(&layer.id)) {
                    layer.geometry.x += dx;
                    layer.geometry.y += dy;
                    changed |= dx != 0.0 || dy != 0.0;
                }
            }

            Command::DeleteLayers(ids) => {
                let count = doc.layers.len();
                doc.layers.retain(|layer| !ids.contains(&layer.id));
                doc.selection.retain(|id| !ids.contains(id));
                changed = doc.layers.len() != count;
            }

            Command::DuplicateLayers(ids) => {
                let copies: Vec<Layer> = doc
                    .layers
                    .iter()
                    .filter(|layer| ids.contains(&layer.id))
                    .map(duplicate)
                    .collect();
                if !copies.is_empty() {
                    doc.selection = copies.iter().map(|layer| layer.id).collect();
                    doc.layers.extend(copies);
                    changed = true;
                }
            }

            Command::LoadDocument { canvas_size, layers } => {
                doc.canvas_size = canvas_size;
                doc.layers = layers;
                doc.selection.clear();
                self.history.clear();
                changed = true;
            }

            Command::PushHistory => {
                self.history.push(&doc.layers);
            }

            Command::Undo => {
                if let Some(layers) = self.history.undo(&doc.layers) {
                    changed = layers != doc.layers;
                    doc.layers = layers;
                }
            }

            Command::Redo => {
                if let Some(layers) = self.history.redo(&doc.layers) {
                    changed = layers != doc.layers;
                    doc.layers = layers;
                }
            }
        }

        if changed {
            self.revision += 1;
        }
        self
    }

    /// Applies several commands in order
    #[must_use]
    pub fn apply_all(self, commands: impl IntoIterator<Item = Command>) -> Self {
        commands.into_iter().fold(self, Self::apply)
    }
}

/// Pure reducer form of [`EditorState::apply`] for callers holding a borrow
pub fn reduce(state: &EditorState, command: Command) -> EditorState {
    state.clone().apply(command)
}

/// Merges `patch` into `layer`, reporting whether anything changed
fn patch_layer(layer: &mut Layer, patch: &LayerPatch) -> bool {
    let before = layer.clone();
    layer.apply_patch(patch);
    *layer != before
}

fn duplicate(layer: &Layer) -> Layer {
    let mut copy = layer.clone().with_id(LayerId::new());
    copy.name = format!("{} copy", layer.name);
    copy.apply_patch(&LayerPatch::position(
        layer.geometry.x + DUPLICATE_OFFSET.x,
        layer.geometry.y + DUPLICATE_OFFSET.y,
    ));
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Geometry, LayerKind};
    use crate::tool::Tool;

    #[test]
    fn zoom_is_clamped_to_config_range() {
        let state = EditorState::default().apply(Command::SetZoom(12.0));
        assert_eq!(state.document().zoom(), 5.0);
        let state = state.apply(Command::SetZoom(0.0));
        assert_eq!(state.document().zoom(), 0.1);
    }

    #[test]
    fn set_tool_only_changes_tool() {
        let state = EditorState::default();
        let next = state.clone().apply(Command::SetTool(Tool::Star));
        assert_eq!(next.document().tool(), Tool::Star);
        assert_eq!(next.layers(), state.layers());
        assert_eq!(next.history(), state.history());
    }

    #[test]
    fn duplicate_selects_offset_copies() {
        let layer = Layer::new(LayerKind::Star, Geometry::new(10.0, 10.0, 50.0, 50.0));
        let id = layer.id;
        let state = EditorState::default()
            .apply(Command::AddLayer(layer))
            .apply(Command::DuplicateLayers(vec![id]));

        assert_eq!(state.layers().len(), 2);
        let copy = &state.layers()[1];
        assert_ne!(copy.id, id);
        assert_eq!(state.selection(), &[copy.id]);
        assert_eq!((copy.geometry.x, copy.geometry.y), (30.0, 30.0));
        assert_eq!(copy.name, "Star copy");
    }

    #[test]
    fn load_document_resets_history_and_selection() {
        let layer = Layer::new(LayerKind::Rectangle, Geometry::default());
        let id = layer.id;
        let state = EditorState::default()
            .apply(Command::AddLayer(layer.clone()))
            .apply(Command::SetSelection(vec![id]))
            .apply(Command::PushHistory)
            .apply(Command::LoadDocument {
                canvas_size: CanvasSize::new(640, 480),
                layers: vec![layer],
            });

        assert!(state.selection().is_empty());
        assert!(!state.can_undo());
        assert_eq!(state.document().canvas_size(), CanvasSize::new(640, 480));
    }
}
