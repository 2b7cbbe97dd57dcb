//! Saved designs and the stores that hold them.

use crate::document::CanvasSize;
use crate::error::{PersistenceError, PersistenceResult};
use crate::layer::Layer;
use crate::state::EditorState;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a saved design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| PersistenceError::InvalidDocument(e.to_string()))
    }
}

/// What gets written for a design: its layers and canvas size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub canvas_size: CanvasSize,
    pub layers: Vec<Layer>,
}

impl SavedDesign {
    pub fn from_state(state: &EditorState) -> Self {
        Self {
            canvas_size: state.document().canvas_size(),
            layers: state.layers().to_vec(),
        }
    }

    pub fn into_command(self) -> crate::command::Command {
        crate::command::Command::LoadDocument {
            canvas_size: self.canvas_size,
            layers: self.layers,
        }
    }
}

/// Somewhere designs can be saved to and loaded from.
///
/// `save` with `None` creates a new document and returns its fresh id;
/// with `Some(id)` it overwrites that document.
pub trait DocumentStore {
    fn save(&mut self, id: Option<DocumentId>, design: &SavedDesign) -> PersistenceResult<DocumentId>;

    fn load(&self, id: DocumentId) -> PersistenceResult<SavedDesign>;
}

/// One pretty-printed JSON file per design, `<dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Ids of every design in the directory. Empty if the directory is missing.
    pub fn list(&self) -> PersistenceResult<Vec<DocumentId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()).and_then(|stem| stem.parse().ok()) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

impl DocumentStore for JsonFileStore {
    fn save(&mut self, id: Option<DocumentId>, design: &SavedDesign) -> PersistenceResult<DocumentId> {
        let id = id.unwrap_or_default();
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(design)?;
        fs::write(self.path_for(id), json)?;
        Ok(id)
    }

    fn load(&self, id: DocumentId) -> PersistenceResult<SavedDesign> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }
}

/// In-memory store. Clones share the same designs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    designs: Arc<Mutex<HashMap<DocumentId, SavedDesign>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.designs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.lock().is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, id: Option<DocumentId>, design: &SavedDesign) -> PersistenceResult<DocumentId> {
        let id = id.unwrap_or_default();
        self.designs.lock().insert(id, design.clone());
        Ok(id)
    }

    fn load(&self, id: DocumentId) -> PersistenceResult<SavedDesign> {
        self.designs
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }
}
