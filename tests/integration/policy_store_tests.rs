//! Policy engine over the SeaORM store
//!
//! Every decision here goes through SQLite, so these also cover that
//! mutations are visible to the very next enforcement.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::{assert_err, assert_ok};
    use rbac_admin::AdminError;
    use rbac_admin::auth::rbac::{PermissionEntry, PolicyRule, PolicyType};
    use rbac_admin::auth::{Enforcer, PolicyStore};
    use rbac_admin::config::DatabaseConfig;
    use rbac_admin::storage::Database;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_super_admin_users_delete_scenario() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        assert!(assert_ok!(enforcer.add_policy("super_admin", "users", "DELETE").await));
        assert!(assert_ok!(enforcer.enforce("super_admin", "users", "DELETE").await));
        assert!(!assert_ok!(enforcer.enforce("admin", "users", "DELETE").await));

        assert!(assert_ok!(enforcer.remove_policy("super_admin", "users", "DELETE").await));
        assert!(!assert_ok!(enforcer.enforce("super_admin", "users", "DELETE").await));
    }

    #[tokio::test]
    async fn test_add_policy_is_idempotent() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        assert!(assert_ok!(enforcer.add_policy("admin", "menus", "GET").await));
        assert!(!assert_ok!(enforcer.add_policy("admin", "menus", "GET").await));
        assert_eq!(assert_ok!(db.db().count(PolicyType::Policy).await), 1);

        // removing twice reports the second call as a no-op
        assert!(assert_ok!(enforcer.remove_policy("admin", "menus", "GET").await));
        assert!(!assert_ok!(enforcer.remove_policy("admin", "menus", "GET").await));
    }

    #[tokio::test]
    async fn test_role_inheritance_through_groupings() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        assert_ok!(enforcer.add_policy("editor", "menus", "PUT").await);
        assert_ok!(enforcer.add_policy("viewer", "menus", "GET").await);
        assert_ok!(enforcer.add_role_for_user("alice", "editor").await);
        assert_ok!(enforcer.add_role_for_user("editor", "viewer").await);

        assert_eq!(
            assert_ok!(enforcer.get_roles_for_user("alice").await),
            vec!["editor".to_string()]
        );
        assert!(assert_ok!(enforcer.enforce("alice", "menus", "PUT").await));
        assert!(assert_ok!(enforcer.enforce("alice", "menus", "GET").await));
        assert!(!assert_ok!(enforcer.enforce("alice", "menus", "DELETE").await));

        let implicit = assert_ok!(enforcer.get_implicit_permissions_for_user("alice").await);
        assert!(implicit.contains(&PermissionEntry::new("menus", "GET")));
        assert!(implicit.contains(&PermissionEntry::new("menus", "PUT")));

        assert_ok!(enforcer.delete_role_for_user("alice", "editor").await);
        assert!(!assert_ok!(enforcer.enforce("alice", "menus", "GET").await));
    }

    #[tokio::test]
    async fn test_cyclic_groupings_terminate() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        assert_ok!(enforcer.add_role_for_user("a", "b").await);
        assert_ok!(enforcer.add_role_for_user("b", "a").await);
        assert_ok!(enforcer.add_policy("b", "roles", "GET").await);

        assert!(assert_ok!(enforcer.enforce("a", "roles", "GET").await));
        assert!(!assert_ok!(enforcer.enforce("a", "roles", "POST").await));
    }

    #[tokio::test]
    async fn test_replace_keeps_row_identity() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        let old = PolicyRule::permission("guest", "menus", "GET");
        let new = PolicyRule::permission("guest", "menus", "POST");
        assert_ok!(enforcer.add_rule(&old).await);
        let before = assert_ok!(db.db().find_rule_by_tuple(&old).await).unwrap();

        assert!(assert_ok!(enforcer.replace_policy(&old, &new).await));
        let after = assert_ok!(db.db().find_rule_by_tuple(&new).await).unwrap();
        assert_eq!(before.id, after.id);
        assert!(assert_ok!(db.db().find_rule_by_tuple(&old).await).is_none());

        assert!(!assert_ok!(enforcer.enforce("guest", "menus", "GET").await));
        assert!(assert_ok!(enforcer.enforce("guest", "menus", "POST").await));
    }

    #[tokio::test]
    async fn test_replace_refuses_missing_or_duplicate_target() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        let a = PolicyRule::permission("guest", "menus", "GET");
        let b = PolicyRule::permission("guest", "menus", "POST");
        let missing = PolicyRule::permission("nobody", "menus", "GET");

        assert_ok!(enforcer.add_rule(&a).await);
        assert_ok!(enforcer.add_rule(&b).await);

        assert!(!assert_ok!(enforcer.replace_policy(&missing, &a).await));
        assert!(!assert_ok!(enforcer.replace_policy(&a, &b).await));
        // both rules survive a refused replace
        assert!(assert_ok!(enforcer.enforce("guest", "menus", "GET").await));
        assert!(assert_ok!(enforcer.enforce("guest", "menus", "POST").await));
    }

    #[tokio::test]
    async fn test_refused_replace_leaves_rows_untouched() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        let a = PolicyRule::permission("guest", "menus", "GET");
        let b = PolicyRule::permission("guest", "menus", "POST");
        assert_ok!(enforcer.add_rule(&a).await);
        assert_ok!(enforcer.add_rule(&b).await);
        let row_a = assert_ok!(db.db().find_rule_by_tuple(&a).await).unwrap();
        let row_b = assert_ok!(db.db().find_rule_by_tuple(&b).await).unwrap();

        // the target tuple is taken, so the unique index rejects the update
        assert!(!assert_ok!(db.db().replace_rule(&a, &b).await));

        let kept_a = assert_ok!(db.db().find_rule(row_a.id).await).unwrap();
        assert_eq!(kept_a.v0, "guest");
        assert_eq!(kept_a.v1, "menus");
        assert_eq!(kept_a.v2, "GET");
        assert_eq!(kept_a.updated_at, row_a.updated_at);

        let kept_b = assert_ok!(db.db().find_rule(row_b.id).await).unwrap();
        assert_eq!(kept_b.v2, "POST");
        assert_eq!(assert_ok!(db.db().count(PolicyType::Policy).await), 2);
    }

    #[tokio::test]
    async fn test_concurrent_adds_store_a_single_row() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections: 8,
            connection_timeout: 5,
            auto_migrate: true,
        };
        let db = Arc::new(assert_ok!(Database::new(&config).await));
        assert_ok!(db.migrate().await);
        let store: Arc<dyn PolicyStore> = db.clone();
        let enforcer = Enforcer::new(store);

        let adds = (0..8).map(|_| enforcer.add_policy("admin", "menus", "GET"));
        let results = futures::future::join_all(adds).await;

        let mut inserted = 0;
        for result in results {
            if assert_ok!(result) {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(assert_ok!(db.count(PolicyType::Policy).await), 1);
    }

    #[tokio::test]
    async fn test_duplicate_grouping_is_not_stored_twice() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        assert!(assert_ok!(enforcer.add_role_for_user("alice", "admin").await));
        assert!(!assert_ok!(enforcer.add_role_for_user("alice", "admin").await));
        assert!(!assert_ok!(db.db().insert_rule(&PolicyRule::grouping("alice", "admin")).await));
        assert_eq!(assert_ok!(db.db().count(PolicyType::Grouping).await), 1);
    }

    #[tokio::test]
    async fn test_incomplete_rules_are_rejected() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        let err = assert_err!(enforcer.add_policy("admin", " ", "GET").await);
        assert!(matches!(err, AdminError::InvalidRule(_)));
        assert_eq!(assert_ok!(db.db().count(PolicyType::Policy).await), 0);
    }

    #[tokio::test]
    async fn test_listing_filters_by_kind_and_pages() {
        let db = TestDatabase::new().await;
        let enforcer = db.enforcer();

        for action in ["GET", "POST", "PUT"] {
            assert_ok!(enforcer.add_policy("admin", "menus", action).await);
        }
        assert_ok!(enforcer.add_role_for_user("alice", "admin").await);

        let (rows, total) = assert_ok!(db.db().list_rules(Some(PolicyType::Policy), 1, 2).await);
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 2);

        let (rows, total) = assert_ok!(db.db().list_rules(Some(PolicyType::Grouping), 1, 15).await);
        assert_eq!(total, 1);
        assert_eq!(
            assert_ok!(rows[0].to_rule()),
            PolicyRule::grouping("alice", "admin")
        );

        let (_, total) = assert_ok!(db.db().list_rules(None, 1, 15).await);
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_seeding_is_repeatable() {
        let db = TestDatabase::seeded().await;
        let policies = assert_ok!(db.db().count(PolicyType::Policy).await);

        let report = assert_ok!(
            rbac_admin::storage::seed::seed_defaults(db.db(), &db.enforcer()).await
        );
        assert_eq!(report.policies_added, 0);
        assert_eq!(assert_ok!(db.db().count(PolicyType::Policy).await), policies);

        let enforcer = db.enforcer();
        assert!(assert_ok!(enforcer.enforce("super_admin", "casbin-rules", "DELETE").await));
        assert!(assert_ok!(enforcer.enforce("guest", "menus", "GET").await));
        assert!(!assert_ok!(enforcer.enforce("guest", "menus", "POST").await));
    }
}
