//! Stacking order helpers.
//!
//! The helpers return a full id order suitable for `Command::ReorderLayers`.

use crate::layer::{Layer, LayerId};
use std::collections::HashMap;

/// Stable-sorts `layers` by the position of their id in `order`.
///
/// Layers whose id is missing from `order` sort before every listed layer
/// (to the bottom of the stack) and keep their relative order. Ids listed
/// more than once count at their first position.
pub fn reorder_layers(layers: &mut [Layer], order: &[LayerId]) {
    let mut rank: HashMap<LayerId, usize> = HashMap::with_capacity(order.len());
    for (position, id) in order.iter().enumerate() {
        rank.entry(*id).or_insert(position);
    }
    layers.sort_by_key(|layer| rank.get(&layer.id).map_or(0, |position| position + 1));
}

/// Moves each selected layer one step up, past its unselected neighbor
pub fn bring_forward(layers: &[Layer], selection: &[LayerId]) -> Vec<LayerId> {
    let mut ids: Vec<LayerId> = layers.iter().map(|layer| layer.id).collect();
    for i in (0..ids.len().saturating_sub(1)).rev() {
        if selection.contains(&ids[i]) && !selection.contains(&ids[i + 1]) {
            ids.swap(i, i + 1);
        }
    }
    ids
}

/// Moves each selected layer one step down, past its unselected neighbor
pub fn send_backward(layers: &[Layer], selection: &[LayerId]) -> Vec<LayerId> {
    let mut ids: Vec<LayerId> = layers.iter().map(|layer| layer.id).collect();
    for i in 1..ids.len() {
        if selection.contains(&ids[i]) && !selection.contains(&ids[i - 1]) {
            ids.swap(i, i - 1);
        }
    }
    ids
}

/// Moves the selected layers to the top, keeping their relative order
pub fn bring_to_front(layers: &[Layer], selection: &[LayerId]) -> Vec<LayerId> {
    let (selected, rest): (Vec<LayerId>, Vec<LayerId>) = layers
        .iter()
        .map(|layer| layer.id)
        .partition(|id| selection.contains(id));
    rest.into_iter().chain(selected).collect()
}

/// Moves the selected layers to the bottom, keeping their relative order
pub fn send_to_back(layers: &[Layer], selection: &[LayerId]) -> Vec<LayerId> {
    let (selected, rest): (Vec<LayerId>, Vec<LayerId>) = layers
        .iter()
        .map(|layer| layer.id)
        .partition(|id| selection.contains(id));
    selected.into_iter().chain(rest).collect()
}
