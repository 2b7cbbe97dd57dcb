use eframe_creator::command::Command;
use eframe_creator::layer::{Geometry, Layer, LayerId, LayerKind, LayerPatch};
use eframe_creator::state::{EditorState, reduce};
use eframe_creator::tool::Tool;
use std::collections::HashSet;

fn rect_at(x: f32, y: f32) -> Layer {
    Layer::new(LayerKind::Rectangle, Geometry::new(x, y, 100.0, 100.0))
}

fn state_with(layers: &[Layer]) -> EditorState {
    EditorState::default().apply_all(layers.iter().cloned().map(Command::AddLayer))
}

fn ids(state: &EditorState) -> Vec<LayerId> {
    state.layers().iter().map(|layer| layer.id).collect()
}

#[test]
fn add_layer_appends_on_top_without_history() {
    let a = rect_at(0.0, 0.0);
    let b = rect_at(10.0, 10.0);
    let state = state_with(&[a.clone(), b.clone()]);

    assert_eq!(ids(&state), vec![a.id, b.id]);
    assert_eq!(state.document().z_index(b.id), Some(1));
    assert!(!state.can_undo());
}

#[test]
fn delete_removes_ids_from_layers_and_selection() {
    let layers: Vec<Layer> = (0..5).map(|i| rect_at(i as f32 * 10.0, 0.0)).collect();
    let all: Vec<LayerId> = layers.iter().map(|layer| layer.id).collect();

    // Every subset of the first four layers, with all five selected
    for mask in 0u32..16 {
        let doomed: Vec<LayerId> = (0..4).filter(|i| mask & (1 << i) != 0).map(|i| all[i]).collect();
        let state = state_with(&layers)
            .apply(Command::SetSelection(all.clone()))
            .apply(Command::DeleteLayers(doomed.clone()));

        let expected: HashSet<LayerId> = all.iter().copied().filter(|id| !doomed.contains(id)).collect();
        let remaining: HashSet<LayerId> = ids(&state).into_iter().collect();
        let selected: HashSet<LayerId> = state.selection().iter().copied().collect();
        assert_eq!(remaining, expected, "mask {mask}");
        assert_eq!(selected, expected, "mask {mask}");
    }
}

#[test]
fn move_then_inverse_move_leaves_no_drift() {
    let a = rect_at(0.0, 0.0);
    let b = rect_at(40.0, -7.5);
    let untouched = rect_at(3.0, 3.0);
    let targets = vec![a.id, b.id];
    let before = state_with(&[a, b, untouched]);

    let after = before
        .clone()
        .apply(Command::MoveLayers {
            ids: targets.clone(),
            dx: 12.5,
            dy: -3.25,
        })
        .apply(Command::MoveLayers {
            ids: targets,
            dx: -12.5,
            dy: 3.25,
        });

    assert_eq!(after.layers(), before.layers());
}

#[test]
fn unknown_ids_are_ignored() {
    let a = rect_at(0.0, 0.0);
    let state = state_with(&[a]);
    let ghost = LayerId::new();

    let next = state
        .clone()
        .apply(Command::UpdateLayer {
            id: ghost,
            patch: LayerPatch::position(99.0, 99.0),
        })
        .apply(Command::MoveLayers {
            ids: vec![ghost],
            dx: 5.0,
            dy: 5.0,
        })
        .apply(Command::DeleteLayers(vec![ghost]))
        .apply(Command::DuplicateLayers(vec![ghost]));

    assert_eq!(next, state);
}

#[test]
fn selection_is_stored_verbatim() {
    let ghost = LayerId::new();
    let state = EditorState::default().apply(Command::SetSelection(vec![ghost, ghost]));
    assert_eq!(state.selection(), &[ghost, ghost]);
}

#[test]
fn update_layers_merges_into_every_match() {
    let a = rect_at(0.0, 0.0);
    let b = rect_at(50.0, 0.0);
    let state = state_with(&[a.clone(), b.clone()]).apply(Command::UpdateLayers {
        ids: vec![a.id, b.id],
        patch: LayerPatch::locked(true),
    });

    assert!(state.layers().iter().all(|layer| layer.locked));
    assert_eq!(state.layer(b.id).map(|layer| layer.geometry.x), Some(50.0));
}

#[test]
fn reorder_follows_given_order() {
    let layers: Vec<Layer> = (0..3).map(|i| rect_at(i as f32, 0.0)).collect();
    let (a, b, c) = (layers[0].id, layers[1].id, layers[2].id);
    let state = state_with(&layers).apply(Command::ReorderLayers(vec![c, a, b]));
    assert_eq!(ids(&state), vec![c, a, b]);
}

#[test]
fn reorder_sinks_missing_ids_to_the_bottom() {
    let layers: Vec<Layer> = (0..4).map(|i| rect_at(i as f32, 0.0)).collect();
    let (a, b, c, d) = (layers[0].id, layers[1].id, layers[2].id, layers[3].id);
    let state = state_with(&layers).apply(Command::ReorderLayers(vec![d, a]));
    // b and c keep their relative order below everything that was named
    assert_eq!(ids(&state), vec![b, c, d, a]);
}

#[test]
fn undo_restores_last_checkpoint_not_initial_state() {
    let a = rect_at(0.0, 0.0);
    let id = a.id;
    let state = EditorState::default()
        .apply(Command::AddLayer(a))
        .apply(Command::MoveLayers {
            ids: vec![id],
            dx: 10.0,
            dy: 5.0,
        })
        .apply(Command::PushHistory)
        .apply(Command::MoveLayers {
            ids: vec![id],
            dx: -10.0,
            dy: -5.0,
        })
        .apply(Command::Undo);

    let layer = state.layer(id).map(|layer| (layer.geometry.x, layer.geometry.y));
    assert_eq!(layer, Some((10.0, 5.0)));
}

#[test]
fn undo_with_empty_past_changes_nothing() {
    let state = state_with(&[rect_at(1.0, 2.0)]).apply(Command::SetTool(Tool::Star));
    assert_eq!(reduce(&state, Command::Undo), state);
    assert_eq!(reduce(&state, Command::Redo), state);
}

#[test]
fn reduce_leaves_the_input_untouched() {
    let state = EditorState::default();
    let next = reduce(&state, Command::AddLayer(rect_at(0.0, 0.0)));
    assert!(state.layers().is_empty());
    assert_eq!(next.layers().len(), 1);
}

#[test]
fn inverted_zoom_settings_still_clamp() {
    let config = eframe_creator::config::EditorConfig {
        zoom_min: 5.0,
        zoom_max: 0.1,
        ..Default::default()
    };
    let state = EditorState::with_config(&config).apply(Command::SetZoom(1.0));
    assert_eq!(state.document().zoom(), 1.0);

    let state = state.apply(Command::SetZoom(50.0)).apply(Command::SetZoom(f32::NAN));
    assert_eq!(state.document().zoom(), 5.0);
}

#[test]
fn revision_tracks_real_design_changes() {
    let a = rect_at(0.0, 0.0);
    let state = state_with(&[a.clone()]);
    let revision = state.revision();

    let state = state
        .apply(Command::SetSelection(vec![a.id]))
        .apply(Command::SetTool(Tool::Star))
        .apply(Command::MoveLayers {
            ids: vec![a.id],
            dx: 0.0,
            dy: 0.0,
        })
        .apply(Command::UpdateLayer {
            id: a.id,
            patch: LayerPatch::position(0.0, 0.0),
        })
        .apply(Command::DeleteLayers(vec![LayerId::new()]))
        .apply(Command::PushHistory);
    assert_eq!(state.revision(), revision);

    let state = state.apply(Command::MoveLayers {
        ids: vec![a.id],
        dx: 1.0,
        dy: 0.0,
    });
    assert_eq!(state.revision(), revision + 1);
}
