// Module declarations
mod connection;
mod menu_ops;
mod policy_ops;
mod role_ops;
mod types;

// Re-export public types
pub use types::{DatabaseBackendType, MenuFilter, MenuPatch, NewMenu, SeaOrmDatabase};
