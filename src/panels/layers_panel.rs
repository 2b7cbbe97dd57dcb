use crate::command::Command;
use crate::command::reorder::{bring_forward, bring_to_front, send_backward, send_to_back};
use crate::editor::Editor;
use crate::layer::{LayerId, LayerPatch};

/// Layer list, topmost first, with visibility/lock toggles and z-order buttons
pub fn layers_panel(ui: &mut egui::Ui, editor: &mut Editor, now: f64) {
    ui.heading("Layers");

    let selection = editor.state().selection().to_vec();
    ui.horizontal(|ui| {
        let any = !selection.is_empty();
        let layers = editor.state().layers();
        let reorder = [
            ("⏫", "Bring to front", bring_to_front(layers, &selection)),
            ("⬆", "Bring forward", bring_forward(layers, &selection)),
            ("⬇", "Send backward", send_backward(layers, &selection)),
            ("⏬", "Send to back", send_to_back(layers, &selection)),
        ];
        let mut order = None;
        for (icon, hint, ids) in reorder {
            if ui.add_enabled(any, egui::Button::new(icon)).on_hover_text(hint).clicked() {
                order = Some(ids);
            }
        }
        if let Some(order) = order {
            editor.dispatch_all([Command::ReorderLayers(order), Command::PushHistory], now);
        }
        if ui.add_enabled(any, egui::Button::new("🗑")).on_hover_text("Delete").clicked() {
            editor.dispatch(Command::DeleteLayers(selection.clone()), now);
        }
    });

    ui.separator();

    let rows: Vec<(LayerId, String, bool, bool)> = editor
        .state()
        .layers()
        .iter()
        .rev()
        .map(|layer| (layer.id, layer.name.clone(), layer.visible, layer.locked))
        .collect();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (id, name, visible, locked) in rows {
            ui.horizontal(|ui| {
                if ui.selectable_label(visible, "👁").on_hover_text("Visible").clicked() {
                    editor.dispatch_all(
                        [
                            Command::UpdateLayer {
                                id,
                                patch: LayerPatch::visible(!visible),
                            },
                            Command::PushHistory,
                        ],
                        now,
                    );
                }
                if ui.selectable_label(locked, "🔒").on_hover_text("Locked").clicked() {
                    editor.dispatch_all(
                        [
                            Command::UpdateLayer {
                                id,
                                patch: LayerPatch::locked(!locked),
                            },
                            Command::PushHistory,
                        ],
                        now,
                    );
                }

                let selected = selection.contains(&id);
                let response = ui.selectable_label(selected, name);
                if response.clicked() {
                    let extend = ui.input(|i| i.modifiers.shift);
                    let next = match (extend, selected) {
                        (true, true) => selection.iter().copied().filter(|other| *other != id).collect(),
                        (true, false) => selection.iter().copied().chain([id]).collect(),
                        (false, _) => vec![id],
                    };
                    editor.dispatch(Command::SetSelection(next), now);
                }
            });
        }
    });
}
