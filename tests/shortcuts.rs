use eframe_creator::command::Command;
use eframe_creator::config::EditorConfig;
use eframe_creator::editor::Editor;
use eframe_creator::input::{InputEvent, InputLocation};
use eframe_creator::layer::{Geometry, Layer, LayerKind};
use eframe_creator::persistence::MemoryStore;
use eframe_creator::shortcuts::{Shortcut, commands_for, resolve};
use eframe_creator::state::EditorState;
use eframe_creator::tool::Tool;
use eframe_creator::viewport::Viewport;
use egui::{Key, Modifiers, PointerButton, pos2};

fn ctrl_shift() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    }
}

fn key(key: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::KeyDown {
        key,
        modifiers,
        text_input_focused: false,
    }
}

fn at(x: f32, y: f32) -> InputLocation {
    InputLocation {
        position: pos2(x, y),
        is_in_canvas: true,
    }
}

fn editor() -> Editor {
    Editor::new(EditorConfig::default(), Box::new(MemoryStore::new()))
}

#[test]
fn keys_resolve_to_shortcuts() {
    assert_eq!(resolve(Key::Z, Modifiers::COMMAND, false), Some(Shortcut::Undo));
    assert_eq!(resolve(Key::Z, ctrl_shift(), false), Some(Shortcut::Redo));
    assert_eq!(resolve(Key::Y, Modifiers::CTRL, false), Some(Shortcut::Redo));
    assert_eq!(resolve(Key::D, Modifiers::COMMAND, false), Some(Shortcut::DuplicateSelection));
    assert_eq!(resolve(Key::Delete, Modifiers::NONE, false), Some(Shortcut::DeleteSelection));
    assert_eq!(resolve(Key::Backspace, Modifiers::NONE, false), Some(Shortcut::DeleteSelection));
    assert_eq!(resolve(Key::Escape, Modifiers::NONE, false), Some(Shortcut::ClearSelection));
    assert_eq!(resolve(Key::L, Modifiers::NONE, false), Some(Shortcut::SelectTool(Tool::Line)));
    assert_eq!(resolve(Key::D, Modifiers::NONE, false), None);
}

#[test]
fn selection_shortcuts_do_nothing_without_selection() {
    let state = EditorState::default().apply(Command::AddLayer(Layer::new(LayerKind::Circle, Geometry::default())));
    assert!(commands_for(Shortcut::DeleteSelection, &state).is_empty());
    assert!(commands_for(Shortcut::DuplicateSelection, &state).is_empty());
    assert!(commands_for(Shortcut::ClearSelection, &state).is_empty());
    assert_eq!(commands_for(Shortcut::Undo, &state), vec![Command::Undo]);
}

#[test]
fn delete_removes_selection_without_checkpoint() {
    let layer = Layer::new(LayerKind::Circle, Geometry::default());
    let state = EditorState::default()
        .apply(Command::AddLayer(layer.clone()))
        .apply(Command::SetSelection(vec![layer.id]));
    assert_eq!(
        commands_for(Shortcut::DeleteSelection, &state),
        vec![Command::DeleteLayers(vec![layer.id])]
    );
}

#[test]
fn ctrl_z_steps_back_through_checkpoints() {
    let mut editor = editor();
    let view = Viewport::default();
    editor.dispatch(Command::SetTool(Tool::Rectangle), 0.0);
    editor.handle_event(
        &InputEvent::PointerDown {
            location: at(300.0, 300.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
        &view,
        0.0,
    );
    let id = editor.state().selection()[0];
    let start_x = editor.state().layer(id).map(|layer| layer.geometry.x);

    for event in [
        InputEvent::PointerDown {
            location: at(300.0, 300.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
        InputEvent::PointerMove {
            location: at(340.0, 300.0),
            modifiers: Modifiers::NONE,
        },
        InputEvent::PointerUp {
            location: at(340.0, 300.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
    ] {
        editor.handle_event(&event, &view, 0.5);
    }
    assert_eq!(editor.state().layer(id).map(|layer| layer.geometry.x), Some(290.0));

    // The newest checkpoint is the post-drag layout, so it takes two steps back
    editor.handle_event(&key(Key::Z, Modifiers::COMMAND), &view, 1.0);
    assert_eq!(editor.state().layer(id).map(|layer| layer.geometry.x), Some(290.0));
    editor.handle_event(&key(Key::Z, Modifiers::COMMAND), &view, 1.0);
    assert_eq!(editor.state().layer(id).map(|layer| layer.geometry.x), start_x);

    editor.handle_event(&key(Key::Z, ctrl_shift()), &view, 1.0);
    editor.handle_event(&key(Key::Y, Modifiers::COMMAND), &view, 1.0);
    assert_eq!(editor.state().layer(id).map(|layer| layer.geometry.x), Some(290.0));
}

#[test]
fn text_focus_blocks_shortcuts() {
    let mut editor = editor();
    let commands = editor.handle_event(
        &InputEvent::KeyDown {
            key: Key::R,
            modifiers: Modifiers::NONE,
            text_input_focused: true,
        },
        &Viewport::default(),
        0.0,
    );
    assert!(commands.is_empty());
    assert_eq!(editor.state().document().tool(), Tool::Select);
}

#[test]
fn duplicate_offsets_copies_and_checkpoints() {
    let mut editor = editor();
    let layer = Layer::new(LayerKind::Rectangle, Geometry::new(10.0, 10.0, 50.0, 50.0));
    let original = layer.id;
    editor.dispatch_all([Command::AddLayer(layer), Command::SetSelection(vec![original])], 0.0);

    let commands = editor.handle_event(&key(Key::D, Modifiers::COMMAND), &Viewport::default(), 0.0);
    assert_eq!(commands, vec![Command::DuplicateLayers(vec![original]), Command::PushHistory]);

    let state = editor.state();
    assert_eq!(state.layers().len(), 2);
    let copy = &state.layers()[1];
    assert_ne!(copy.id, original);
    assert_eq!(state.selection(), &[copy.id]);
    assert_eq!((copy.geometry.x, copy.geometry.y), (30.0, 30.0));
    assert!(state.can_undo());
    assert!(editor.autosave().is_dirty());
}

#[test]
fn pointer_outside_canvas_is_ignored() {
    let mut editor = editor();
    editor.dispatch(Command::SetTool(Tool::Star), 0.0);
    let commands = editor.handle_event(
        &InputEvent::PointerDown {
            location: InputLocation {
                position: pos2(10.0, 10.0),
                is_in_canvas: false,
            },
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
        &Viewport::default(),
        0.0,
    );
    assert!(commands.is_empty());
    assert!(editor.state().layers().is_empty());
}
