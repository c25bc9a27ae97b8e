//! Menu tree and sidebar assembly over SQLite

#[cfg(test)]
mod tests {
    use crate::common::fixtures::roles;
    use crate::common::{MenuFactory, TestDatabase};
    use crate::{assert_err, assert_ok};
    use rbac_admin::AdminError;
    use rbac_admin::auth::Identity;
    use rbac_admin::services::menu::{MenuFilter, MenuPatch};

    fn identity(role: Option<&str>) -> Identity {
        Identity::new("user-1", role.map(str::to_string))
    }

    #[tokio::test]
    async fn test_reports_detail_sidebar_scenario() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let reports = assert_ok!(
            menus
                .create(MenuFactory::ordered("Reports", 5), Some(roles(&["admin"])))
                .await
        );
        assert_ok!(
            menus
                .create(
                    MenuFactory::child("Reports/Detail", reports.menu.id, 1),
                    Some(roles(&["admin"]))
                )
                .await
        );

        let sidebar = assert_ok!(menus.sidebar_for(&identity(Some("admin"))).await);
        assert_eq!(sidebar.user_role, "admin");
        assert_eq!(sidebar.menus.len(), 1);
        assert_eq!(sidebar.menus[0].item.name, "Reports");
        assert_eq!(sidebar.menus[0].children.len(), 1);
        assert_eq!(sidebar.menus[0].children[0].name, "Reports/Detail");

        let guest = assert_ok!(menus.sidebar_for(&identity(Some("guest"))).await);
        assert!(guest.menus.is_empty());
    }

    #[tokio::test]
    async fn test_sidebar_requires_a_role() {
        let db = TestDatabase::seeded().await;
        let err = assert_err!(db.menus().sidebar_for(&identity(None)).await);
        assert!(matches!(err, AdminError::NoRole));

        let err = assert_err!(db.menus().sidebar_for(&identity(Some("  "))).await);
        assert!(matches!(err, AdminError::NoRole));
    }

    #[tokio::test]
    async fn test_sidebar_excludes_inactive_foreign_and_orphaned_menus() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();
        let admin = Some(roles(&["admin"]));

        let visible =
            assert_ok!(menus.create(MenuFactory::ordered("Visible", 1), admin.clone()).await);
        assert_ok!(menus.create(MenuFactory::inactive("Hidden"), admin.clone()).await);
        assert_ok!(
            menus
                .create(MenuFactory::ordered("Guests", 2), Some(roles(&["guest"])))
                .await
        );
        // child visible to admin under a parent that is not
        let guest_parent = assert_ok!(
            menus
                .create(MenuFactory::ordered("Guest parent", 3), Some(roles(&["guest"])))
                .await
        );
        assert_ok!(
            menus
                .create(MenuFactory::child("Stray", guest_parent.menu.id, 0), admin.clone())
                .await
        );
        let mut inactive_child = MenuFactory::child("Off", visible.menu.id, 0);
        inactive_child.is_active = false;
        assert_ok!(menus.create(inactive_child, admin.clone()).await);
        assert_ok!(
            menus
                .create(MenuFactory::child("On", visible.menu.id, 1), admin.clone())
                .await
        );

        let sidebar = assert_ok!(menus.sidebar_for(&identity(Some("admin"))).await);
        assert_eq!(sidebar.menus.len(), 1);
        assert_eq!(sidebar.menus[0].item.id, visible.menu.id);
        let children: Vec<&str> = sidebar.menus[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(children, vec!["On"]);
    }

    #[tokio::test]
    async fn test_equal_order_falls_back_to_id() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();
        let admin = Some(roles(&["admin"]));

        let mut ids = Vec::new();
        for name in ["First", "Second", "Third"] {
            let view = assert_ok!(menus.create(MenuFactory::ordered(name, 3), admin.clone()).await);
            ids.push(view.menu.id);
        }
        let early = assert_ok!(menus.create(MenuFactory::ordered("Early", 0), admin.clone()).await);

        for _ in 0..3 {
            let top = assert_ok!(menus.list_top_level("admin", true).await);
            let got: Vec<i32> = top.iter().map(|m| m.id).collect();
            assert_eq!(got, vec![early.menu.id, ids[0], ids[1], ids[2]]);
        }
    }

    #[tokio::test]
    async fn test_set_roles_replaces_without_leftovers() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let view = assert_ok!(
            menus
                .create(MenuFactory::top_level("Settings"), Some(roles(&["guest", "admin"])))
                .await
        );
        let id = view.menu.id;

        assert_ok!(menus.set_roles(id, &[]).await);
        assert!(assert_ok!(menus.get(id).await).roles.is_empty());

        assert_ok!(menus.set_roles(id, &roles(&["admin"])).await);
        assert_eq!(assert_ok!(menus.get(id).await).roles, roles(&["admin"]));

        // duplicates collapse into one association
        assert_ok!(menus.set_roles(id, &roles(&["admin", "admin"])).await);
        assert_eq!(assert_ok!(menus.get(id).await).roles, roles(&["admin"]));

        let err = assert_err!(menus.set_roles(id, &roles(&["nobody"])).await);
        assert!(matches!(err, AdminError::Validation(_)));
        let err = assert_err!(menus.set_roles(9999, &roles(&["admin"])).await);
        assert!(matches!(err, AdminError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_children_of_filters_by_role_and_activity() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();
        let both = Some(roles(&["admin", "guest"]));

        let parent = assert_ok!(menus.create(MenuFactory::top_level("Parent"), both.clone()).await);
        let pid = parent.menu.id;
        assert_ok!(menus.create(MenuFactory::child("Shared", pid, 0), both.clone()).await);
        assert_ok!(
            menus
                .create(MenuFactory::child("Admin only", pid, 1), Some(roles(&["admin"])))
                .await
        );
        let mut off = MenuFactory::child("Off", pid, 2);
        off.is_active = false;
        assert_ok!(menus.create(off, both.clone()).await);

        assert_eq!(assert_ok!(menus.children_of(pid, "guest", true).await).len(), 1);
        assert_eq!(assert_ok!(menus.children_of(pid, "admin", true).await).len(), 2);
        assert_eq!(assert_ok!(menus.children_of(pid, "admin", false).await).len(), 3);
    }

    #[tokio::test]
    async fn test_tree_with_and_without_role() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let a = assert_ok!(
            menus
                .create(MenuFactory::ordered("A", 0), Some(roles(&["admin"])))
                .await
        );
        assert_ok!(menus.create(MenuFactory::ordered("B", 1), None).await);
        assert_ok!(menus.create(MenuFactory::child("A1", a.menu.id, 0), None).await);

        let all = assert_ok!(menus.tree(None).await);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].children.len(), 1);

        let admin = assert_ok!(menus.tree(Some("admin")).await);
        assert_eq!(admin.len(), 1);
        assert!(admin[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_update_validation() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let root = assert_ok!(menus.create(MenuFactory::top_level("Root"), None).await);
        let child = assert_ok!(
            menus
                .create(MenuFactory::child("Child", root.menu.id, 0), None)
                .await
        );

        let mut dup = MenuFactory::top_level("Dup");
        dup.slug = root.menu.slug.clone();
        match assert_err!(menus.create(dup, Some(roles(&["ghost"]))).await) {
            AdminError::Validation(errors) => {
                assert!(errors.contains("slug"));
                assert!(errors.contains("roles"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let cycle = MenuPatch {
            parent_id: Some(Some(child.menu.id)),
            ..Default::default()
        };
        match assert_err!(menus.update(root.menu.id, cycle, None).await) {
            AdminError::Validation(errors) => assert!(errors.contains("parent_id")),
            other => panic!("unexpected {:?}", other),
        }

        let own = MenuPatch {
            parent_id: Some(Some(root.menu.id)),
            ..Default::default()
        };
        assert!(matches!(
            assert_err!(menus.update(root.menu.id, own, None).await),
            AdminError::Validation(_)
        ));

        // keeping its own slug is not a conflict
        let rename = MenuPatch {
            name: Some("Renamed".into()),
            slug: Some(root.menu.slug.clone()),
            icon: Some(Some("home".into())),
            ..Default::default()
        };
        let updated = assert_ok!(menus.update(root.menu.id, rename, None).await);
        assert_eq!(updated.menu.name, "Renamed");
        assert_eq!(updated.menu.icon.as_deref(), Some("home"));

        let detach = MenuPatch {
            parent_id: Some(None),
            ..Default::default()
        };
        let detached = assert_ok!(menus.update(child.menu.id, detach, None).await);
        assert_eq!(detached.menu.parent_id, None);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();
        let admin = Some(roles(&["admin"]));

        let root = assert_ok!(menus.create(MenuFactory::top_level("Root"), admin.clone()).await);
        let mid = assert_ok!(
            menus
                .create(MenuFactory::child("Mid", root.menu.id, 0), admin.clone())
                .await
        );
        assert_ok!(
            menus
                .create(MenuFactory::child("Leaf", mid.menu.id, 0), admin.clone())
                .await
        );
        let other = assert_ok!(menus.create(MenuFactory::top_level("Other"), admin.clone()).await);

        assert_eq!(assert_ok!(menus.delete(root.menu.id).await), 3);
        assert!(matches!(
            assert_err!(menus.get(mid.menu.id).await),
            AdminError::NotFound(_)
        ));
        assert_eq!(assert_ok!(menus.get(other.menu.id).await).roles, roles(&["admin"]));

        let (remaining, total) = assert_ok!(menus.list(&MenuFilter::default(), 1, 15).await);
        assert_eq!(total, 1);
        assert_eq!(remaining[0].menu.id, other.menu.id);

        assert!(matches!(
            assert_err!(menus.delete(root.menu.id).await),
            AdminError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let top = assert_ok!(
            menus
                .create(MenuFactory::top_level("Top"), Some(roles(&["guest"])))
                .await
        );
        assert_ok!(menus.create(MenuFactory::child("Sub", top.menu.id, 0), None).await);
        assert_ok!(menus.create(MenuFactory::inactive("Off"), None).await);

        let filter = MenuFilter {
            parent_only: true,
            ..Default::default()
        };
        assert_eq!(assert_ok!(menus.list(&filter, 1, 15).await).1, 2);

        let filter = MenuFilter {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(assert_ok!(menus.list(&filter, 1, 15).await).1, 1);

        let filter = MenuFilter {
            role: Some("guest".into()),
            ..Default::default()
        };
        let (views, total) = assert_ok!(menus.list(&filter, 1, 15).await);
        assert_eq!(total, 1);
        assert_eq!(views[0].roles, roles(&["guest"]));
    }

    #[tokio::test]
    async fn test_failed_role_write_rolls_back_the_patch() {
        let db = TestDatabase::seeded().await;
        let menus = db.menus();

        let reports = assert_ok!(
            menus
                .create(MenuFactory::ordered("Reports", 5), Some(roles(&["admin"])))
                .await
        );
        let id = reports.menu.id;
        let before = assert_ok!(db.db().find_menu(id).await).unwrap();

        let patch = MenuPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        // unknown role trips the menu_roles foreign key after the menu row is updated
        let missing = roles(&["nope"]);
        assert_err!(db.db().update_menu(id, &patch, Some(missing.as_slice())).await);

        let menu = assert_ok!(db.db().find_menu(id).await).unwrap();
        assert_eq!(menu.name, "Reports");
        assert_eq!(menu.updated_at, before.updated_at);

        let assigned = assert_ok!(db.db().roles_for_menus(&[id]).await);
        assert_eq!(assigned.get(&id), Some(&roles(&["admin"])));
    }
}
