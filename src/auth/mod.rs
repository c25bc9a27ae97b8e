//! Authentication and authorization
//!
//! - **jwt**: bearer token issue and verification
//! - **rbac**: the policy engine and its store abstraction
//! - **types**: the authenticated identity carried through a request

pub mod jwt;
pub mod rbac;
pub mod types;

pub use jwt::JwtHandler;
pub use rbac::{Enforcer, PolicyRule, PolicyStore};
pub use types::{AuthMethod, Identity};
