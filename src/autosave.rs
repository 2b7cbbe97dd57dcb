//! Debounced auto-save.
//!
//! Every edit pushes the save deadline back by the debounce interval, so a
//! design is written once the user pauses. A failed save is logged and
//! retried one interval later; editor state is never touched.

use crate::error::PersistenceResult;
use crate::persistence::{DocumentId, DocumentStore, SavedDesign};
use crate::state::EditorState;
use log::{error, info};

#[derive(Debug, Clone)]
pub struct AutoSaver {
    debounce_secs: f64,
    deadline: Option<f64>,
    document_id: Option<DocumentId>,
    last_saved: Option<f64>,
}

impl AutoSaver {
    pub fn new(debounce_secs: f64) -> Self {
        Self {
            debounce_secs: debounce_secs.max(0.0),
            deadline: None,
            document_id: None,
            last_saved: None,
        }
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document_id
    }

    pub fn set_document_id(&mut self, id: Option<DocumentId>) {
        self.document_id = id;
        self.deadline = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.deadline.is_some()
    }

    /// When a save is due, if one is pending
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn last_saved(&self) -> Option<f64> {
        self.last_saved
    }

    pub fn mark_dirty(&mut self, now: f64) {
        self.deadline = Some(now + self.debounce_secs);
    }

    /// Saves if the debounce interval has elapsed. Returns `None` when no save was attempted.
    pub fn poll(
        &mut self,
        now: f64,
        state: &EditorState,
        store: &mut dyn DocumentStore,
    ) -> Option<PersistenceResult<DocumentId>> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        Some(self.save_now(now, state, store))
    }

    /// Saves immediately regardless of the deadline
    pub fn save_now(
        &mut self,
        now: f64,
        state: &EditorState,
        store: &mut dyn DocumentStore,
    ) -> PersistenceResult<DocumentId> {
        let design = SavedDesign::from_state(state);
        match store.save(self.document_id, &design) {
            Ok(id) => {
                if self.document_id.is_none() {
                    info!("created design {id}");
                }
                info!("saved design {id} ({} layers)", design.layers.len());
                self.document_id = Some(id);
                self.deadline = None;
                self.last_saved = Some(now);
                Ok(id)
            }
            Err(e) => {
                error!("auto-save failed: {e}");
                self.deadline = Some(now + self.debounce_secs);
                Err(e)
            }
        }
    }
}
