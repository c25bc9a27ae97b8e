//! Error handling for the admin backend
//!
//! This module defines the error taxonomy shared by storage, the policy engine,
//! the menu service and the HTTP layer.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use types::{AdminError, Result};
