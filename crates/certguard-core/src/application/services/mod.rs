//! Application services.

mod check_service;
mod form_validator;

pub use check_service::{CheckService, FormReport};
pub use form_validator::FormValidator;
