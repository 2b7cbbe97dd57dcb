use crate::document::CanvasSize;
use serde::{Deserialize, Serialize};

/// Tunables for the editor core, persisted with the app settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    /// Maximum number of undo snapshots kept
    pub history_limit: usize,
    /// Smallest width/height a resize may produce, in canvas units
    pub min_layer_size: f32,
    /// Net movement (canvas units, either axis) for a drag to leave an undo step
    pub drag_threshold: f32,
    /// Rotation change (degrees) for a rotate gesture to leave an undo step
    pub rotation_threshold: f32,
    /// Snap increment (degrees) while the snap modifier is held
    pub rotation_snap: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub autosave_debounce_secs: f64,
    pub default_canvas_size: CanvasSize,
    /// Directory used by the native JSON document store
    pub storage_dir: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            min_layer_size: 10.0,
            drag_threshold: 0.1,
            rotation_threshold: 0.1,
            rotation_snap: 15.0,
            zoom_min: 0.1,
            zoom_max: 5.0,
            autosave_debounce_secs: 3.0,
            default_canvas_size: CanvasSize::new(1080, 1080),
            storage_dir: "designs".to_owned(),
        }
    }
}

impl EditorConfig {
    /// `(min, max)` zoom bounds, ordered and finite. Settings restored from
    /// storage may hold anything, so a non-finite or non-positive bound falls
    /// back to its default and an inverted pair is swapped.
    pub fn zoom_range(&self) -> (f32, f32) {
        let defaults = Self::default();
        let bound = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        };
        let min = bound(self.zoom_min, defaults.zoom_min);
        let max = bound(self.zoom_max, defaults.zoom_max);
        if min <= max { (min, max) } else { (max, min) }
    }
}
