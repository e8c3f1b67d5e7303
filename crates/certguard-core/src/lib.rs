//! Certguard Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the form
//! validation and sanitization engine used by the certificate management
//! console, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          certguard-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (CheckService, FormValidator)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: FileInspector, FormSource) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   certguard-adapters (Infrastructure)   │
//! │ (LocalFileInspector, FileFormSource)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Rule, Validator, ValidatorCatalog,     │
//! │  sanitizers)                            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use certguard_core::domain::{CatalogEntry, FieldValue, ValidatorCatalog};
//!
//! let catalog = ValidatorCatalog::default();
//! let result = catalog
//!     .get(CatalogEntry::RejectReason)
//!     .validate(&FieldValue::from("Signature does not match the account holder"));
//! assert!(result.is_valid());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CheckService, FormReport, FormValidator,
        ports::{FileInspector, FormDocument, FormSource},
    };
    pub use crate::domain::{
        CatalogEntry, CatalogLimits, FieldValue, FileRef, Rule, Sanitizer, ValidationResult,
        Validator, ValidatorCatalog, sanitize,
    };
    pub use crate::error::{CertguardError, CertguardResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
