use eframe_creator::command::Command;
use eframe_creator::config::EditorConfig;
use eframe_creator::document::CanvasSize;
use eframe_creator::editor::Editor;
use eframe_creator::error::PersistenceError;
use eframe_creator::layer::{Geometry, Layer, LayerKind};
use eframe_creator::persistence::{DocumentId, DocumentStore, JsonFileStore, MemoryStore, SavedDesign};
use std::path::PathBuf;

/// A scratch directory removed on drop
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("eframe_creator_{}", uuid::Uuid::new_v4())))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn design(layers: usize) -> SavedDesign {
    SavedDesign {
        canvas_size: CanvasSize::new(800, 600),
        layers: (0..layers)
            .map(|i| Layer::new(LayerKind::Ellipse, Geometry::new(i as f32 * 20.0, 5.0, 40.0, 30.0)))
            .collect(),
    }
}

#[test]
fn json_store_round_trips_designs() {
    let dir = ScratchDir::new();
    let mut store = JsonFileStore::new(&dir.0);
    let saved = design(3);

    let id = store.save(None, &saved).unwrap();
    assert!(store.path_for(id).exists());
    assert_eq!(store.load(id).unwrap(), saved);

    let json = std::fs::read_to_string(store.path_for(id)).unwrap();
    assert!(json.contains('\n'), "designs are pretty-printed");
    assert!(json.contains("\"canvas_size\""));
}

#[test]
fn saving_with_an_id_overwrites() {
    let dir = ScratchDir::new();
    let mut store = JsonFileStore::new(&dir.0);

    let id = store.save(None, &design(1)).unwrap();
    let again = store.save(Some(id), &design(4)).unwrap();
    assert_eq!(again, id);
    assert_eq!(store.load(id).unwrap().layers.len(), 4);
    assert_eq!(store.list().unwrap(), vec![id]);
}

#[test]
fn list_skips_foreign_files() {
    let dir = ScratchDir::new();
    let mut store = JsonFileStore::new(&dir.0);
    assert!(store.list().unwrap().is_empty());

    let a = store.save(None, &design(0)).unwrap();
    let b = store.save(None, &design(0)).unwrap();
    std::fs::write(dir.0.join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.0.join("not-a-uuid.json"), "{}").unwrap();

    let mut ids = store.list().unwrap();
    ids.sort_by_key(|id| id.uuid());
    let mut expected = vec![a, b];
    expected.sort_by_key(|id| id.uuid());
    assert_eq!(ids, expected);
}

#[test]
fn missing_designs_are_not_found() {
    let dir = ScratchDir::new();
    let store = JsonFileStore::new(&dir.0);
    assert!(matches!(store.load(DocumentId::new()), Err(PersistenceError::NotFound(_))));

    let memory = MemoryStore::new();
    assert!(matches!(memory.load(DocumentId::new()), Err(PersistenceError::NotFound(_))));
}

#[test]
fn corrupt_json_is_a_serialization_error() {
    let dir = ScratchDir::new();
    let mut store = JsonFileStore::new(&dir.0);
    let id = store.save(None, &design(1)).unwrap();
    std::fs::write(store.path_for(id), "{ \"canvas_size\": ").unwrap();

    let err = store.load(id).unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)), "{err}");
}

#[test]
fn editor_autosaves_to_disk_after_debounce() {
    let dir = ScratchDir::new();
    let store = JsonFileStore::new(&dir.0);
    let reader = store.clone();
    let mut editor = Editor::new(EditorConfig::default(), Box::new(store));

    editor.dispatch(
        Command::AddLayer(Layer::new(LayerKind::Rectangle, Geometry::new(0.0, 0.0, 10.0, 10.0))),
        10.0,
    );
    // A second edit pushes the deadline back
    editor.dispatch(
        Command::MoveLayers {
            ids: editor.state().layers().iter().map(|layer| layer.id).collect(),
            dx: 1.0,
            dy: 1.0,
        },
        12.0,
    );
    assert!(editor.tick(14.0).is_none());

    let id = editor.tick(15.0).unwrap().unwrap();
    assert_eq!(editor.document_id(), Some(id));
    assert!(!editor.autosave().is_dirty());

    let loaded = reader.load(id).unwrap();
    assert_eq!(loaded.layers, editor.state().layers());
    assert_eq!(loaded.canvas_size, editor.state().document().canvas_size());

    // Later saves reuse the same file
    editor.dispatch(Command::DeleteLayers(vec![loaded.layers[0].id]), 20.0);
    assert_eq!(editor.tick(23.0).unwrap().unwrap(), id);
    assert!(reader.load(id).unwrap().layers.is_empty());
    assert_eq!(reader.list().unwrap(), vec![id]);
}

#[test]
fn selection_and_tool_changes_do_not_trigger_saves() {
    let store = MemoryStore::new();
    let mut editor = Editor::new(EditorConfig::default(), Box::new(store.clone()));
    editor.dispatch(Command::SetSelection(vec![]), 0.0);
    editor.dispatch(Command::SetZoom(2.0), 0.0);
    assert!(!editor.autosave().is_dirty());
    assert!(editor.tick(100.0).is_none());
    assert!(store.is_empty());
}

#[test]
fn negative_sizes_are_clamped_on_load() {
    let dir = ScratchDir::new();
    let mut store = JsonFileStore::new(&dir.0);
    let id = store.save(None, &design(1)).unwrap();

    let path = store.path_for(id);
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"width\": 40.0"));
    std::fs::write(&path, json.replace("\"width\": 40.0", "\"width\": -40.0")).unwrap();

    let loaded = store.load(id).unwrap();
    assert_eq!(loaded.layers[0].geometry.width, 0.0);
    assert_eq!(loaded.layers[0].geometry.height, 30.0);
}
