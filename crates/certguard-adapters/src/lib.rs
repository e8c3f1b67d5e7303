//! Infrastructure adapters for Certguard.
//!
//! This crate implements the ports defined in `certguard-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod form_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFileInspector, MemoryFileInspector};
pub use form_source::FileFormSource;
