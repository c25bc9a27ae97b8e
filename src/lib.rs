//! # rbac-admin
//!
//! Administrative backend with Casbin-style role-based access control and
//! role-scoped navigation menus.
//!
//! ## Features
//!
//! - **Policy engine**: `p` (subject, object, action) and `g` (user, role)
//!   rules with transitive role inheritance, persisted through SeaORM
//! - **Authorization gateway**: actix middleware that enforces
//!   `(role, resource, HTTP verb)` before a handler runs
//! - **Menu tree**: two-level navigation filtered by role and active flag
//! - **HTTP administration** of rules, menus and roles
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use rbac_admin::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/rbac-admin.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Checking permissions directly
//!
//! ```rust
//! use rbac_admin::auth::rbac::{Enforcer, MemoryPolicyStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> rbac_admin::Result<()> {
//! let enforcer = Enforcer::new(Arc::new(MemoryPolicyStore::new()));
//! enforcer.add_policy("admin", "menus", "GET").await?;
//! enforcer.add_role_for_user("alice", "admin").await?;
//! assert!(enforcer.enforce("alice", "menus", "GET").await?);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{AdminError, Result};

use serde::Serialize;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information reported by `/health`
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl BuildInfo {
    /// Values captured by the build script, `unknown` where unavailable
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}
