//! HTTP surface end to end

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::assertions::EnvelopeAssertions;
    use actix_web::http::{StatusCode, header};
    use actix_web::{test, web};
    use rbac_admin::Config;
    use rbac_admin::server::{AppState, create_app, state_from_database};
    use serde_json::{Value, json};

    async fn app_state() -> AppState {
        let db = TestDatabase::new().await;
        state_from_database(Config::default(), db.db_arc())
            .await
            .expect("Failed to build application state")
    }

    fn bearer(state: &AppState, role: &str) -> (header::HeaderName, String) {
        let token = state
            .jwt
            .create_access_token("tester", Some(role))
            .expect("Failed to mint token");
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_rule_listing_filters_and_paginates() {
        let state = app_state().await;
        let auth = bearer(&state, "super_admin");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/casbin-rules?ptype=p&page=2&per_page=5")
            .insert_header(auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body.assert_success();
        let pagination = &body["data"]["pagination"];
        assert_eq!(pagination["page"], 2);
        assert_eq!(pagination["per_page"], 5);
        assert_eq!(pagination["has_prev"], true);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
        assert!(
            body["data"]["items"]
                .as_array()
                .unwrap()
                .iter()
                .all(|rule| rule["ptype"] == "p")
        );

        let req = test::TestRequest::get()
            .uri("/casbin-rules?ptype=g")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pagination"]["total"], 0);

        for uri in [
            "/casbin-rules?per_page=101",
            "/casbin-rules?ptype=x",
            "/casbin-rules?page=0",
            "/casbin-rules?page=1000000000000000000&per_page=100",
            "/menus?page=18446744073709551615",
        ] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(auth.clone())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_grouping_rules_and_role_lookups() {
        let state = app_state().await;
        let auth = bearer(&state, "super_admin");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/casbin-rules")
            .insert_header(auth.clone())
            .set_json(json!({"ptype": "g", "user": "alice", "role": "admin"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["ptype"], "g");
        assert_eq!(body["data"]["v0"], "alice");
        assert_eq!(body["data"]["v1"], "admin");

        let req = test::TestRequest::post()
            .uri("/casbin-rules")
            .insert_header(auth.clone())
            .set_json(json!({"ptype": "g", "role": "admin"}))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        body.assert_field_error("user");

        let req = test::TestRequest::get()
            .uri("/casbin-rules/user/alice/roles")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["roles"], json!(["admin"]));

        let req = test::TestRequest::get()
            .uri("/casbin-rules/subject/alice/policies")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["policies"], json!([]));

        let req = test::TestRequest::get()
            .uri("/casbin-rules/subject/alice/policies?implicit=1")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let policies = body["data"]["policies"].as_array().unwrap();
        assert!(policies.contains(&json!({"object": "menus", "action": "DELETE"})));
        assert!(policies.contains(&json!({"object": "roles", "action": "GET"})));

        let req = test::TestRequest::get()
            .uri("/casbin-rules/user/alice/roles?implicit=maybe")
            .insert_header(auth)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[actix_web::test]
    async fn test_switching_rule_kind_requires_new_fields() {
        let state = app_state().await;
        let auth = bearer(&state, "super_admin");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/casbin-rules")
            .insert_header(auth.clone())
            .set_json(json!({"ptype": "p", "role": "auditor", "route": "roles", "action": "GET"}))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/casbin-rules/{}", id))
            .insert_header(auth.clone())
            .set_json(json!({"ptype": "g"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        body.assert_field_error("user");

        let req = test::TestRequest::put()
            .uri(&format!("/casbin-rules/{}", id))
            .insert_header(auth.clone())
            .set_json(json!({"ptype": "g", "user": "bob", "role": "auditor"}))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        body.assert_success();
        assert_eq!(body["data"]["ptype"], "g");
        assert_eq!(body["data"]["v2"], "");

        let req = test::TestRequest::put()
            .uri("/casbin-rules/99999")
            .insert_header(auth)
            .set_json(json!({"action": "GET"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_roles_listing_is_guarded() {
        let state = app_state().await;
        let admin = bearer(&state, "admin");
        let guest = bearer(&state, "guest");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get().uri("/roles").insert_header(admin).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get().uri("/roles").insert_header(guest).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        body.assert_failure();
    }

    #[actix_web::test]
    async fn test_menu_roles_tree_and_sidebar_shape() {
        let state = app_state().await;
        let admin = bearer(&state, "admin");
        let guest = bearer(&state, "guest");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/menus")
            .insert_header(admin.clone())
            .set_json(json!({"name": "Dashboard", "slug": "dashboard", "url": "/", "order": 2}))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["order"], 2);
        assert_eq!(body["data"]["roles"], json!([]));

        let req = test::TestRequest::put()
            .uri(&format!("/menus/{}/roles", id))
            .insert_header(admin.clone())
            .set_json(json!({"roles": ["guest", "admin", "guest"]}))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        body.assert_success();
        assert_eq!(body["data"]["roles"], json!(["admin", "guest"]));

        let req = test::TestRequest::get()
            .uri("/menus/tree?role=guest")
            .insert_header(admin.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"][0]["slug"], "dashboard");
        assert_eq!(body["data"][0]["children"], json!([]));

        let req = test::TestRequest::get()
            .uri("/menus/sidebar")
            .insert_header(guest.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["message"], "Sidebar menus retrieved successfully");
        assert_eq!(
            body["data"]["menus"][0],
            json!({
                "id": id,
                "name": "Dashboard",
                "slug": "dashboard",
                "icon": null,
                "url": "/",
                "order": 2,
                "children": []
            })
        );

        let req = test::TestRequest::patch()
            .uri(&format!("/menus/{}", id))
            .insert_header(admin.clone())
            .set_json(json!({"is_active": false}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/menus/sidebar")
            .insert_header(guest)
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["menus"], json!([]));

        let req = test::TestRequest::get()
            .uri("/menus?is_active=0")
            .insert_header(admin)
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
    }

    #[actix_web::test]
    async fn test_unknown_route_and_preflight() {
        let state = app_state().await;
        let auth = bearer(&state, "admin");
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/nowhere")
            .insert_header(auth)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        body.assert_failure();

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/menus")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(
            resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
