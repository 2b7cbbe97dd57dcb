//! The editing session: routes input to gestures and shortcuts, applies the
//! resulting commands, and keeps auto-save informed.

use crate::autosave::AutoSaver;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::error::PersistenceResult;
use crate::input::InputEvent;
use crate::interaction::{GestureConfig, Interaction};
use crate::persistence::{DocumentId, DocumentStore, SavedDesign};
use crate::shortcuts;
use crate::state::EditorState;
use crate::viewport::Viewport;
use egui::PointerButton;
use log::{debug, info};

pub struct Editor {
    state: EditorState,
    interaction: Interaction,
    autosave: AutoSaver,
    store: Box<dyn DocumentStore>,
    config: EditorConfig,
}

impl Editor {
    pub fn new(config: EditorConfig, store: Box<dyn DocumentStore>) -> Self {
        Self {
            state: EditorState::with_config(&config),
            interaction: Interaction::new(GestureConfig::from(&config)),
            autosave: AutoSaver::new(config.autosave_debounce_secs),
            store,
            config,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn autosave(&self) -> &AutoSaver {
        &self.autosave
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.autosave.document_id()
    }

    /// Applies one command. Marks the design dirty if layers or canvas changed.
    pub fn dispatch(&mut self, command: Command, now: f64) {
        if let Command::SetTool(tool) = &command {
            if *tool != self.state.document().tool() {
                info!("tool: {}", tool.name());
            }
        }

        let revision = self.state.revision();
        self.state = std::mem::take(&mut self.state).apply(command);
        if self.state.revision() != revision {
            self.autosave.mark_dirty(now);
        }
    }

    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>, now: f64) {
        for command in commands {
            self.dispatch(command, now);
        }
    }

    /// Routes one input event and returns the commands it produced, already applied
    pub fn handle_event(&mut self, event: &InputEvent, view: &Viewport, now: f64) -> Vec<Command> {
        let commands = match event {
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
                ..
            } if location.is_in_canvas => self.interaction.pointer_down(location.position, &self.state, view),

            InputEvent::PointerMove { location, modifiers } => {
                self.interaction
                    .pointer_move(location.position, modifiers.shift, &self.state, view)
            }

            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.interaction.pointer_up(),

            InputEvent::KeyDown {
                key,
                modifiers,
                text_input_focused,
            } => match shortcuts::resolve(*key, *modifiers, *text_input_focused) {
                Some(shortcut) => {
                    debug!("shortcut {shortcut:?}");
                    shortcuts::commands_for(shortcut, &self.state)
                }
                None => Vec::new(),
            },

            _ => Vec::new(),
        };

        self.dispatch_all(commands.iter().cloned(), now);
        commands
    }

    /// Runs a due auto-save. `None` when nothing was saved.
    pub fn tick(&mut self, now: f64) -> Option<PersistenceResult<DocumentId>> {
        self.autosave.poll(now, &self.state, self.store.as_mut())
    }

    pub fn save_now(&mut self, now: f64) -> PersistenceResult<DocumentId> {
        self.autosave.save_now(now, &self.state, self.store.as_mut())
    }

    /// Replaces the session with a saved design. Selection and history start empty.
    pub fn open(&mut self, id: DocumentId) -> PersistenceResult<()> {
        let design = self.store.load(id)?;
        info!("opened design {id} ({} layers)", design.layers.len());
        self.state = std::mem::take(&mut self.state).apply(design.into_command());
        self.interaction = Interaction::new(GestureConfig::from(&self.config));
        self.autosave.set_document_id(Some(id));
        Ok(())
    }

    /// Starts a blank design that will be saved under a new id
    pub fn new_design(&mut self) {
        info!("new design");
        let blank = SavedDesign {
            canvas_size: self.config.default_canvas_size,
            layers: Vec::new(),
        };
        self.state = std::mem::take(&mut self.state).apply(blank.into_command());
        self.interaction = Interaction::new(GestureConfig::from(&self.config));
        self.autosave.set_document_id(None);
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("state", &self.state)
            .field("interaction", &self.interaction)
            .field("autosave", &self.autosave)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use crate::persistence::MemoryStore;
    use crate::tool::Tool;
    use egui::{Key, Modifiers, pos2};

    fn editor() -> (Editor, MemoryStore) {
        let store = MemoryStore::new();
        (Editor::new(EditorConfig::default(), Box::new(store.clone())), store)
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            location: InputLocation {
                position: pos2(x, y),
                is_in_canvas: true,
            },
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn tool_change_does_not_dirty_the_design() {
        let (mut editor, _) = editor();
        let key = InputEvent::KeyDown {
            key: Key::R,
            modifiers: Modifiers::NONE,
            text_input_focused: false,
        };
        editor.handle_event(&key, &Viewport::default(), 0.0);
        assert_eq!(editor.state().document().tool(), Tool::Rectangle);
        assert!(!editor.autosave().is_dirty());
    }

    #[test]
    fn creating_a_layer_schedules_a_save() {
        let (mut editor, store) = editor();
        let view = Viewport::default();
        editor.dispatch(Command::SetTool(Tool::Rectangle), 0.0);
        editor.handle_event(&down(50.0, 50.0), &view, 1.0);

        assert_eq!(editor.state().layers().len(), 1);
        assert_eq!(editor.state().document().tool(), Tool::Select);
        assert_eq!(editor.autosave().deadline(), Some(4.0));

        assert!(editor.tick(3.0).is_none());
        let id = editor.tick(4.0).unwrap().unwrap();
        assert_eq!(store.load(id).unwrap().layers.len(), 1);
    }

    #[test]
    fn open_replaces_layers_and_clears_history() {
        let (mut editor, _) = editor();
        editor.dispatch(Command::SetTool(Tool::Star), 0.0);
        editor.handle_event(&down(10.0, 10.0), &Viewport::default(), 0.0);
        let id = editor.save_now(0.0).unwrap();

        editor.new_design();
        assert!(editor.state().layers().is_empty());
        assert_eq!(editor.document_id(), None);

        editor.open(id).unwrap();
        assert_eq!(editor.state().layers().len(), 1);
        assert!(!editor.state().can_undo());
        assert_eq!(editor.document_id(), Some(id));
    }
}
