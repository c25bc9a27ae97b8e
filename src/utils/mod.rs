//! Shared utilities
//!
//! - **error**: the crate error type and its HTTP mapping
//! - **logging**: tracing subscriber setup
//! - **validation**: field-level request validation

pub mod error;
pub mod logging;
pub mod validation;

pub use error::{AdminError, Result};
pub use validation::{FieldErrors, parse_flag};
