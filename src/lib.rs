#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod autosave;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod interaction;
pub mod layer;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod shortcuts;
pub mod state;
pub mod texture_manager;
pub mod tool;
pub mod util;
pub mod viewport;
pub mod widgets;

pub use app::CreatorApp;
pub use command::{Command, History};
pub use config::EditorConfig;
pub use document::{CanvasSize, EditorDocument};
pub use editor::Editor;
pub use error::{ExportError, PersistenceError};
pub use input::{InputEvent, InputLocation};
pub use layer::{Layer, LayerId, LayerKind, LayerPatch};
pub use persistence::{DocumentId, DocumentStore, JsonFileStore, MemoryStore, SavedDesign};
pub use state::{EditorState, reduce};
pub use tool::Tool;
pub use viewport::Viewport;
