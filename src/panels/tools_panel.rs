use crate::command::Command;
use crate::components::ToolButton;
use crate::editor::Editor;
use crate::shortcuts;
use crate::tool::Tool;

/// Requests from the tool rail that the app handles itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    NewDesign,
    SaveNow,
    ExportPng,
}

pub fn tools_panel(ctx: &egui::Context, editor: &mut Editor, now: f64) -> Option<ToolbarAction> {
    let mut action = None;

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .exact_width(56.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            let active = editor.state().document().tool();
            for tool in Tool::ALL {
                if ToolButton::new(tool, tool == active).show(ui).clicked() {
                    editor.dispatch(Command::SetTool(tool), now);
                }
            }

            ui.separator();

            if ui.add_enabled(editor.state().can_undo(), egui::Button::new("↶")).on_hover_text("Undo").clicked() {
                editor.dispatch(Command::Undo, now);
            }
            if ui.add_enabled(editor.state().can_redo(), egui::Button::new("↷")).on_hover_text("Redo").clicked() {
                editor.dispatch(Command::Redo, now);
            }

            ui.separator();

            if ui.button("🗋").on_hover_text("New design").clicked() {
                action = Some(ToolbarAction::NewDesign);
            }
            if ui.button("💾").on_hover_text("Save now").clicked() {
                action = Some(ToolbarAction::SaveNow);
            }
            if ui.button("⬇").on_hover_text("Export PNG").clicked() {
                action = Some(ToolbarAction::ExportPng);
            }

            ui.separator();
            ui.menu_button("⌨", |ui| {
                egui::Grid::new("shortcut_grid").num_columns(2).striped(true).show(ui, |ui| {
                    for binding in shortcuts::bindings() {
                        ui.strong(binding.keys);
                        ui.label(binding.description);
                        ui.end_row();
                    }
                });
            });
        });

    action
}
