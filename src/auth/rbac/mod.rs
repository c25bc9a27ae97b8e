//! Role-based access control
//!
//! A Casbin-style policy engine: `p` rules grant a subject an action on an
//! object, `g` rules place a user in a role. The [`Enforcer`] is built from a
//! [`PolicyStore`] and injected wherever decisions are needed; it keeps no
//! rule cache, so every decision reflects the persisted rule set.

mod permissions;
mod roles;
mod store;
mod system;
mod types;

pub use store::{MemoryPolicyStore, PolicyStore};
pub use system::{Enforcer, MAX_ROLE_DEPTH};
pub use types::{PermissionEntry, PolicyRule, PolicyType};
