pub mod hit_testing;
pub mod shapes;

pub use hit_testing::{Handle, hit_handle, hit_layer, layer_contains};
