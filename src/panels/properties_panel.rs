use crate::command::Command;
use crate::editor::Editor;
use crate::layer::{Fill, Gradient, GradientKind, GradientStop, Layer, LayerKind, LayerPatch, StrokeStyle, TextAlign};
use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Color32, DragValue, Slider, Ui};

/// Tracks property edits not yet checkpointed.
///
/// Edits apply live through `UpdateLayer`. The undo checkpoint is pushed once
/// the user lets go: no pointer button held and no text field focused.
#[derive(Debug, Default)]
pub struct PropertyEdits {
    pending: bool,
}

impl PropertyEdits {
    pub fn settle(&mut self, ctx: &egui::Context, editor: &mut Editor, now: f64) {
        if !self.pending {
            return;
        }
        let busy = ctx.input(|i| i.pointer.any_down()) || ctx.memory(|m| m.focused().is_some());
        if !busy {
            editor.dispatch(Command::PushHistory, now);
            self.pending = false;
        }
    }
}

pub fn properties_panel(ui: &mut Ui, editor: &mut Editor, edits: &mut PropertyEdits, now: f64) {
    ui.heading("Properties");

    let Some(layer) = editor.state().document().first_selected().cloned() else {
        ui.weak("Nothing selected");
        return;
    };

    let mut draft = layer.clone();
    ui.add_enabled_ui(!layer.locked, |ui| {
        egui::Grid::new("layer_properties").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut draft.name);
            ui.end_row();

            geometry_rows(ui, &mut draft);
            fill_rows(ui, &mut draft);
            stroke_rows(ui, &mut draft);
            kind_rows(ui, &mut draft);
        });
    });

    let patch = LayerPatch::between(&layer, &draft);
    if !patch.is_empty() {
        editor.dispatch(Command::UpdateLayer { id: layer.id, patch }, now);
        edits.pending = true;
    }
}

fn geometry_rows(ui: &mut Ui, layer: &mut Layer) {
    let g = &mut layer.geometry;
    ui.label("Position");
    ui.horizontal(|ui| {
        ui.add(DragValue::new(&mut g.x).prefix("x ").speed(1.0));
        ui.add(DragValue::new(&mut g.y).prefix("y ").speed(1.0));
    });
    ui.end_row();

    ui.label("Size");
    ui.horizontal(|ui| {
        ui.add(DragValue::new(&mut g.width).prefix("w ").range(0.0..=f32::MAX));
        ui.add(DragValue::new(&mut g.height).prefix("h ").range(0.0..=f32::MAX));
    });
    ui.end_row();

    ui.label("Rotation");
    ui.add(DragValue::new(&mut g.rotation).suffix("°").speed(1.0));
    ui.end_row();

    ui.label("Opacity");
    ui.add(Slider::new(&mut layer.opacity, 0.0..=1.0));
    ui.end_row();
}

fn fill_rows(ui: &mut Ui, layer: &mut Layer) {
    if matches!(layer.kind, LayerKind::Text | LayerKind::Image | LayerKind::Group) {
        return;
    }

    ui.label("Fill");
    ui.horizontal(|ui| {
        let is_gradient = matches!(layer.fill, Fill::Gradient(_));
        if ui.selectable_label(!is_gradient, "Solid").clicked() && is_gradient {
            layer.fill = Fill::Solid(layer.fill.base_color());
        }
        if ui.selectable_label(is_gradient, "Gradient").clicked() && !is_gradient {
            let start = layer.fill.base_color();
            layer.fill = Fill::Gradient(Gradient::linear(
                0.0,
                vec![
                    GradientStop { offset: 0.0, color: start },
                    GradientStop {
                        offset: 1.0,
                        color: Color32::WHITE,
                    },
                ],
            ));
        }
    });
    ui.end_row();

    match &mut layer.fill {
        Fill::Solid(color) => {
            ui.label("Color");
            color_edit_button_srgba(ui, color, Alpha::OnlyBlend);
            ui.end_row();
        }
        Fill::Gradient(gradient) => {
            ui.label("Stops");
            ui.horizontal(|ui| {
                for stop in &mut gradient.stops {
                    color_edit_button_srgba(ui, &mut stop.color, Alpha::OnlyBlend);
                }
            });
            ui.end_row();

            ui.label("Style");
            ui.horizontal(|ui| {
                let radial = gradient.kind == GradientKind::Radial;
                if ui.selectable_label(!radial, "Linear").clicked() && radial {
                    gradient.kind = GradientKind::Linear { angle: 0.0 };
                }
                if ui.selectable_label(radial, "Radial").clicked() && !radial {
                    gradient.kind = GradientKind::Radial;
                }
                if let GradientKind::Linear { angle } = &mut gradient.kind {
                    ui.add(DragValue::new(angle).suffix("°"));
                }
            });
            ui.end_row();
        }
    }
}

fn stroke_rows(ui: &mut Ui, layer: &mut Layer) {
    if layer.kind == LayerKind::Text {
        return;
    }
    let stroke: &mut StrokeStyle = &mut layer.stroke;

    ui.label("Stroke");
    ui.horizontal(|ui| {
        ui.add(DragValue::new(&mut stroke.width).range(0.0..=100.0).speed(0.5));
        color_edit_button_srgba(ui, &mut stroke.color, Alpha::OnlyBlend);
        let mut dashed = stroke.dash.is_some();
        if ui.checkbox(&mut dashed, "Dashed").changed() {
            stroke.dash = dashed.then_some((8.0, 4.0));
        }
    });
    ui.end_row();
}

fn kind_rows(ui: &mut Ui, layer: &mut Layer) {
    match layer.kind {
        LayerKind::Text => {
            let text = layer.text.get_or_insert_with(Default::default);
            ui.label("Text");
            ui.text_edit_multiline(&mut text.content);
            ui.end_row();

            ui.label("Font");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut text.font_family);
                ui.add(DragValue::new(&mut text.font_size).range(1.0..=400.0));
            });
            ui.end_row();

            ui.label("Align");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut text.align, TextAlign::Left, "Left");
                ui.selectable_value(&mut text.align, TextAlign::Center, "Center");
                ui.selectable_value(&mut text.align, TextAlign::Right, "Right");
            });
            ui.end_row();

            ui.label("Color");
            color_edit_button_srgba(ui, &mut text.color, Alpha::OnlyBlend);
            ui.end_row();
        }
        LayerKind::Star => {
            ui.label("Points");
            ui.add(DragValue::new(&mut layer.shape.points).range(3..=24));
            ui.end_row();

            ui.label("Inner radius");
            ui.add(Slider::new(&mut layer.shape.inner_radius, 0.1..=1.0));
            ui.end_row();
        }
        LayerKind::Polygon => {
            ui.label("Sides");
            ui.add(DragValue::new(&mut layer.shape.sides).range(3..=24));
            ui.end_row();
        }
        LayerKind::Image => {
            ui.label("Source");
            ui.label(layer.image_src.as_deref().unwrap_or("-"));
            ui.end_row();
        }
        _ => {}
    }
}
