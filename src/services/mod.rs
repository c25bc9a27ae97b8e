//! Services module
//!
//! Business logic sitting between the HTTP routes and storage.

pub mod menu;

pub use menu::MenuService;
