//! Storage layer
//!
//! SeaORM persistence for policy rules, roles and menus, plus the
//! idempotent seeding of default roles and policies.

/// Database storage module
pub mod database;
/// Default roles and policies
pub mod seed;

pub use database::Database;
