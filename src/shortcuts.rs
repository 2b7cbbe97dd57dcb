//! Global keyboard shortcuts.

use crate::command::Command;
use crate::state::EditorState;
use crate::tool::Tool;
use egui::{Key, Modifiers};

/// Something a key press asks the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    SelectTool(Tool),
    DeleteSelection,
    DuplicateSelection,
    ClearSelection,
    Undo,
    Redo,
}

/// A keyboard binding and what it does, for help listings
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

pub fn bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding { keys: "V", description: "Select tool" },
        KeyBinding { keys: "R", description: "Rectangle tool" },
        KeyBinding { keys: "T", description: "Text tool" },
        KeyBinding { keys: "O", description: "Circle tool" },
        KeyBinding { keys: "E", description: "Ellipse tool" },
        KeyBinding { keys: "L", description: "Line tool" },
        KeyBinding { keys: "Delete / Backspace", description: "Delete selection" },
        KeyBinding { keys: "Ctrl/Cmd+D", description: "Duplicate selection" },
        KeyBinding { keys: "Escape", description: "Clear selection" },
        KeyBinding { keys: "Ctrl/Cmd+Z", description: "Undo" },
        KeyBinding { keys: "Ctrl/Cmd+Shift+Z, Ctrl/Cmd+Y", description: "Redo" },
    ]
}

/// Resolves a key press. Returns `None` while a text field has focus.
pub fn resolve(key: Key, modifiers: Modifiers, text_input_focused: bool) -> Option<Shortcut> {
    if text_input_focused {
        return None;
    }
    let command = modifiers.command || modifiers.ctrl || modifiers.mac_cmd;

    if command {
        return match key {
            Key::Z if modifiers.shift => Some(Shortcut::Redo),
            Key::Z => Some(Shortcut::Undo),
            Key::Y => Some(Shortcut::Redo),
            Key::D => Some(Shortcut::DuplicateSelection),
            _ => None,
        };
    }

    match key {
        Key::V => Some(Shortcut::SelectTool(Tool::Select)),
        Key::R => Some(Shortcut::SelectTool(Tool::Rectangle)),
        Key::T => Some(Shortcut::SelectTool(Tool::Text)),
        Key::O => Some(Shortcut::SelectTool(Tool::Circle)),
        Key::E => Some(Shortcut::SelectTool(Tool::Ellipse)),
        Key::L => Some(Shortcut::SelectTool(Tool::Line)),
        Key::Delete | Key::Backspace => Some(Shortcut::DeleteSelection),
        Key::Escape => Some(Shortcut::ClearSelection),
        _ => None,
    }
}

/// Commands a shortcut dispatches against the current state
pub fn commands_for(shortcut: Shortcut, state: &EditorState) -> Vec<Command> {
    let selection = state.selection();
    match shortcut {
        Shortcut::SelectTool(tool) => vec![Command::SetTool(tool)],
        Shortcut::DeleteSelection if !selection.is_empty() => {
            vec![Command::DeleteLayers(selection.to_vec())]
        }
        Shortcut::DuplicateSelection if !selection.is_empty() => {
            vec![Command::DuplicateLayers(selection.to_vec()), Command::PushHistory]
        }
        Shortcut::ClearSelection if !selection.is_empty() => vec![Command::SetSelection(Vec::new())],
        Shortcut::Undo => vec![Command::Undo],
        Shortcut::Redo => vec![Command::Redo],
        Shortcut::DeleteSelection | Shortcut::DuplicateSelection | Shortcut::ClearSelection => Vec::new(),
    }
}
