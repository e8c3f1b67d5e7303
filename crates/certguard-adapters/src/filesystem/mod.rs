//! File inspection adapters.

mod local;
mod memory;

pub use local::{LocalFileInspector, media_type_for};
pub use memory::MemoryFileInspector;
