//! Default roles and policies

use crate::auth::rbac::Enforcer;
use crate::storage::Database;
use crate::utils::error::Result;
use tracing::info;

/// HTTP verbs guarded on every protected resource
pub const HTTP_VERBS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Protected resource names
pub const RESOURCES: [&str; 3] = ["menus", "casbin-rules", "roles"];

/// Seeded role definitions: (name, display name, description)
pub const DEFAULT_ROLES: [(&str, &str, &str); 3] = [
    (
        "super_admin",
        "Super Admin",
        "Full access to all resources and system settings",
    ),
    ("admin", "Admin", "Can manage navigation menus"),
    ("guest", "Guest", "Read-only access"),
];

/// Counts of what a seeding run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles: usize,
    pub policies_added: usize,
}

/// Default grants per role
fn default_policies() -> Vec<(&'static str, &'static str, &'static str)> {
    let mut policies = Vec::new();
    for resource in RESOURCES {
        for verb in HTTP_VERBS {
            policies.push(("super_admin", resource, verb));
        }
    }
    for verb in HTTP_VERBS {
        policies.push(("admin", "menus", verb));
    }
    policies.push(("admin", "roles", "GET"));
    policies.push(("guest", "menus", "GET"));
    policies
}

/// Update-or-create the default roles and add any missing default policy.
///
/// Safe to run repeatedly; existing rules are never removed.
pub async fn seed_defaults(db: &Database, enforcer: &Enforcer) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for (name, display_name, description) in DEFAULT_ROLES {
        db.upsert_role(name, display_name, Some(description)).await?;
        report.roles += 1;
    }

    for (subject, object, action) in default_policies() {
        if enforcer.add_policy(subject, object, action).await? {
            report.policies_added += 1;
        }
    }

    info!(
        "Seeded {} roles, added {} policies",
        report.roles, report.policies_added
    );
    Ok(report)
}
