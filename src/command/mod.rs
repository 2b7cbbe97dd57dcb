mod commands;
mod history;
pub mod reorder;

pub use commands::Command;
pub use history::{DEFAULT_HISTORY_LIMIT, History, Snapshot};
