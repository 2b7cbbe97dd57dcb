use crate::command::Command;
use crate::geometry::hit_testing::screen_rect;
use crate::layer::{Layer, LayerId, LayerPatch};
use crate::viewport::Viewport;
use egui::Pos2;

/// Rotates a single layer around its on-screen center
#[derive(Debug, Clone, PartialEq)]
pub struct RotateGesture {
    layer_id: LayerId,
    center: Pos2,
    /// Pointer angle at pointer-down minus the layer's rotation at that time
    start_angle: f32,
    initial_rotation: f32,
    current_rotation: f32,
}

impl RotateGesture {
    pub fn begin(layer: &Layer, pointer: Pos2, view: &Viewport) -> Self {
        let center = screen_rect(layer, view).center();
        let rotation = layer.geometry.rotation;
        Self {
            layer_id: layer.id,
            center,
            start_angle: pointer_angle(center, pointer) - rotation,
            initial_rotation: rotation,
            current_rotation: rotation,
        }
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    /// Rotation for the pointer at `pointer`; snapped to multiples of
    /// `snap_step` degrees when `snap` is set
    pub fn update(&mut self, pointer: Pos2, snap: bool, snap_step: f32) -> Option<Command> {
        let mut angle = pointer_angle(self.center, pointer) - self.start_angle;
        if snap && snap_step > 0.0 {
            angle = snap_angle(angle, snap_step);
        }
        if angle == self.current_rotation {
            return None;
        }
        self.current_rotation = angle;
        Some(Command::UpdateLayer {
            id: self.layer_id,
            patch: LayerPatch::rotation(angle),
        })
    }

    /// A checkpoint when the rotation changed by more than `threshold` degrees
    pub fn finish(self, threshold: f32) -> Option<Command> {
        ((self.current_rotation - self.initial_rotation).abs() > threshold).then_some(Command::PushHistory)
    }
}

/// Angle of `pointer` seen from `center`, in degrees, clockwise on screen
pub fn pointer_angle(center: Pos2, pointer: Pos2) -> f32 {
    let d = pointer - center;
    d.y.atan2(d.x).to_degrees()
}

pub fn snap_angle(angle: f32, step: f32) -> f32 {
    (angle / step).round() * step
}
