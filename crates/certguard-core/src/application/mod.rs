//! Application layer for Certguard.
//!
//! This layer contains:
//! - **Services**: `FormValidator` (per-session form state) and `CheckService`
//!   (validates values, files and whole form documents through the ports)
//! - **Ports**: Interface definitions (traits) for file inspection and form loading
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! validation logic itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CheckService, FormReport, FormValidator};

// Re-export port traits (for adapter implementation)
pub use ports::{FileInspector, FormDocument, FormSource};

pub use error::ApplicationError;
