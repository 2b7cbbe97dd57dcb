use eframe_creator::command::{Command, DEFAULT_HISTORY_LIMIT};
use eframe_creator::config::EditorConfig;
use eframe_creator::layer::{Geometry, Layer, LayerId, LayerKind};
use eframe_creator::state::EditorState;

fn single_layer() -> (EditorState, LayerId) {
    let layer = Layer::new(LayerKind::Rectangle, Geometry::new(0.0, 0.0, 100.0, 100.0));
    let id = layer.id;
    (EditorState::default().apply(Command::AddLayer(layer)), id)
}

fn nudge(id: LayerId) -> Command {
    Command::MoveLayers {
        ids: vec![id],
        dx: 1.0,
        dy: 0.0,
    }
}

fn x_of(state: &EditorState, id: LayerId) -> f32 {
    state.layer(id).map_or(f32::NAN, |layer| layer.geometry.x)
}

#[test]
fn n_undos_then_n_redos_round_trip() {
    for n in 1..=6 {
        let (initial, id) = single_layer();
        let mut state = initial.clone();
        for _ in 0..n {
            state = state.apply(Command::PushHistory).apply(nudge(id));
        }
        let latest = state.layers().to_vec();

        for _ in 0..n {
            state = state.apply(Command::Undo);
        }
        assert_eq!(state.layers(), initial.layers(), "after {n} undos");
        assert!(!state.can_undo());

        for _ in 0..n {
            state = state.apply(Command::Redo);
        }
        assert_eq!(state.layers(), latest.as_slice(), "after {n} redos");
        assert!(!state.can_redo());
    }
}

#[test]
fn push_clears_the_future() {
    let (state, id) = single_layer();
    let state = state
        .apply(Command::PushHistory)
        .apply(nudge(id))
        .apply(Command::Undo);
    assert!(state.can_redo());

    let state = state.apply(Command::PushHistory);
    assert!(!state.can_redo());
    assert_eq!(state.history().future_len(), 0);
}

#[test]
fn history_keeps_at_most_fifty_snapshots() {
    assert_eq!(DEFAULT_HISTORY_LIMIT, 50);
    let (mut state, id) = single_layer();

    // Snapshots at x = 0, 1, ..., 50; the one at x = 0 falls off
    for _ in 0..=50 {
        state = state.apply(Command::PushHistory).apply(nudge(id));
    }
    assert_eq!(state.history().past_len(), 50);

    for _ in 0..50 {
        state = state.apply(Command::Undo);
    }
    assert_eq!(x_of(&state, id), 1.0);

    let stuck = state.clone().apply(Command::Undo);
    assert_eq!(stuck, state);
}

#[test]
fn redo_pushes_onto_the_capped_past() {
    let config = EditorConfig {
        history_limit: 2,
        ..EditorConfig::default()
    };
    let layer = Layer::new(LayerKind::Circle, Geometry::default());
    let id = layer.id;
    let mut state = EditorState::with_config(&config).apply(Command::AddLayer(layer));

    for _ in 0..2 {
        state = state.apply(Command::PushHistory).apply(nudge(id));
    }
    state = state.apply(Command::Undo).apply(Command::Undo);
    assert_eq!(x_of(&state, id), 0.0);

    state = state.apply(Command::Redo).apply(Command::Redo);
    assert_eq!(x_of(&state, id), 2.0);
    assert_eq!(state.history().past_len(), 2);
}

#[test]
fn undo_only_swaps_layers() {
    let (state, id) = single_layer();
    let state = state
        .apply(Command::SetSelection(vec![id]))
        .apply(Command::PushHistory)
        .apply(nudge(id));
    let undone = state.clone().apply(Command::Undo);

    assert_eq!(undone.selection(), state.selection());
    assert_eq!(undone.document().tool(), state.document().tool());
    assert_eq!(undone.document().canvas_size(), state.document().canvas_size());
}
