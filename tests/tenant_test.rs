//! HTTP tests for tenant isolation across institutes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_unbound_principal_is_rejected_on_tenant_routes() {
    let app = TestApp::new();
    let login = app.register_and_login("pat@oak.edu", "teacher").await;
    let token = login.access_token();

    for path in ["/api/courses", "/api/students", "/api/teachers", "/api/institutes/current"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(response.code(), Some("MISSING_INSTITUTE_CONTEXT"), "{path}");
    }

    let unauthenticated = app.request("GET", "/api/courses", None, None).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unauthenticated.code(), Some("MISSING_TOKEN"));
}

#[tokio::test]
async fn test_refresh_after_creating_institute_binds_token() {
    let app = TestApp::new();
    let login = app.register_and_login("admin@oak.edu", "institute_admin").await;
    let stale = login.access_token();

    let created = app
        .request(
            "POST",
            "/api/institutes",
            Some(json!({ "name": "Oak School", "institute_type": "school" })),
            Some(&stale),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let institute_id = created.body["data"]["id"].as_str().unwrap().to_string();

    // The old access token still carries no institute.
    let before = app.request("GET", "/api/courses", None, Some(&stale)).await;
    assert_eq!(before.code(), Some("MISSING_INSTITUTE_CONTEXT"));

    let refreshed = app.refresh(&login.refresh_cookie()).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["data"]["user"]["institute_id"], institute_id.as_str());

    let current = app
        .request(
            "GET",
            "/api/institutes/current",
            None,
            Some(&refreshed.access_token()),
        )
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(current.body["data"]["id"], institute_id.as_str());
    assert_eq!(current.body["data"]["name"], "Oak School");

    let second = app
        .request(
            "POST",
            "/api/institutes",
            Some(json!({ "name": "Another", "institute_type": "college" })),
            Some(&refreshed.access_token()),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_only_admins_create_institutes() {
    let app = TestApp::new();
    let login = app.register_and_login("pat@oak.edu", "teacher").await;

    let response = app
        .request(
            "POST",
            "/api/institutes",
            Some(json!({ "name": "Oak School", "institute_type": "school" })),
            Some(&login.access_token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cross_institute_course_is_not_found() {
    let app = TestApp::new();
    let (token_a, _) = app.admin_with_institute("a@oak.edu", "Oak").await;
    let (token_b, _) = app.admin_with_institute("b@pine.edu", "Pine").await;

    let created = app
        .request(
            "POST",
            "/api/courses",
            Some(json!({ "title": "Algebra", "description": "Linear equations" })),
            Some(&token_a),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let course_id = created.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/courses/{course_id}");

    let own = app.request("GET", &path, None, Some(&token_a)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"]["title"], "Algebra");

    let foreign = app.request("GET", &path, None, Some(&token_b)).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.code(), Some("NOT_FOUND"));

    let foreign_delete = app.request("DELETE", &path, None, Some(&token_b)).await;
    assert_eq!(foreign_delete.status, StatusCode::NOT_FOUND);

    let listed = app.request("GET", "/api/courses", None, Some(&token_b)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 0);

    let deleted = app.request("DELETE", &path, None, Some(&token_a)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let gone = app.request("GET", &path, None, Some(&token_a)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bound_caller_cannot_choose_institute() {
    let app = TestApp::new();
    let (token_a, id_a) = app.admin_with_institute("a@oak.edu", "Oak").await;
    let (token_b, id_b) = app.admin_with_institute("b@pine.edu", "Pine").await;

    let smuggled = app
        .request(
            "POST",
            "/api/students",
            Some(json!({ "name": "Sam", "email": "sam@oak.edu", "institute_id": id_b })),
            Some(&token_a),
        )
        .await;
    assert_eq!(smuggled.status, StatusCode::CREATED);
    assert_eq!(smuggled.body["data"]["institute_id"], id_a.as_str());

    app.request(
        "POST",
        "/api/students",
        Some(json!({ "name": "Bo", "email": "bo@pine.edu" })),
        Some(&token_b),
    )
    .await;

    let narrowed = app
        .request(
            "GET",
            &format!("/api/students?institute_id={id_b}"),
            None,
            Some(&token_a),
        )
        .await;
    assert_eq!(narrowed.status, StatusCode::OK);
    let students = narrowed.body["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "Sam");
}

#[tokio::test]
async fn test_search_by_name() {
    let app = TestApp::new();
    let (token, _) = app.admin_with_institute("a@oak.edu", "Oak").await;

    for (name, subject) in [("Ada Byron", "Maths"), ("Alan Turing", "Computing"), ("Grace Hopper", "Computing")] {
        let response = app
            .request(
                "POST",
                "/api/teachers",
                Some(json!({
                    "name": name,
                    "email": format!("{}@oak.edu", name.split(' ').next().unwrap().to_lowercase()),
                    "subject": subject,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    let hits = app
        .request("GET", "/api/teachers?q=a%20b", None, Some(&token))
        .await;
    assert_eq!(hits.status, StatusCode::OK);
    let names: Vec<&str> = hits.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Byron"]);

    let all = app
        .request("GET", "/api/teachers?q=", None, Some(&token))
        .await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_record_writes_need_admin_role() {
    let app = TestApp::new();
    let root = app.super_admin_token().await;
    let (admin_token, institute_id) = app.admin_with_institute("a@oak.edu", "Oak").await;

    let teacher = app.register_and_login("t@oak.edu", "teacher").await;
    let teacher_id = teacher.body["data"]["user"]["id"].as_str().unwrap().to_string();

    // A bound admin cannot move principals between institutes.
    let denied = app
        .request(
            "PUT",
            &format!("/api/users/{teacher_id}/institute"),
            Some(json!({ "institute_id": institute_id })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let assigned = app
        .request(
            "PUT",
            &format!("/api/users/{teacher_id}/institute"),
            Some(json!({ "institute_id": institute_id })),
            Some(&root),
        )
        .await;
    assert_eq!(assigned.status, StatusCode::OK, "{:?}", assigned.body);
    assert_eq!(assigned.body["data"]["institute_id"], institute_id.as_str());

    let token = app.refresh(&teacher.refresh_cookie()).await.access_token();

    let read = app.request("GET", "/api/courses", None, Some(&token)).await;
    assert_eq!(read.status, StatusCode::OK);

    let write = app
        .request(
            "POST",
            "/api/courses",
            Some(json!({ "title": "Art" })),
            Some(&token),
        )
        .await;
    assert_eq!(write.status, StatusCode::FORBIDDEN);
    assert_eq!(write.code(), Some("FORBIDDEN"));
}

#[tokio::test]
async fn test_super_admin_works_across_institutes() {
    let app = TestApp::new();
    let root = app.super_admin_token().await;
    let (token_a, id_a) = app.admin_with_institute("a@oak.edu", "Oak").await;
    let (_, id_b) = app.admin_with_institute("b@pine.edu", "Pine").await;

    let institutes = app.request("GET", "/api/institutes", None, Some(&root)).await;
    assert_eq!(institutes.status, StatusCode::OK);
    assert_eq!(institutes.body["data"].as_array().unwrap().len(), 2);

    let not_root = app.request("GET", "/api/institutes", None, Some(&token_a)).await;
    assert_eq!(not_root.status, StatusCode::FORBIDDEN);

    let no_target = app
        .request("POST", "/api/courses", Some(json!({ "title": "Art" })), Some(&root))
        .await;
    assert_eq!(no_target.status, StatusCode::BAD_REQUEST);

    for (title, id) in [("Art", &id_a), ("Botany", &id_b)] {
        let created = app
            .request(
                "POST",
                "/api/courses",
                Some(json!({ "title": title, "institute_id": id })),
                Some(&root),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
        assert_eq!(created.body["data"]["institute_id"], id.as_str());
    }

    let everything = app.request("GET", "/api/courses", None, Some(&root)).await;
    assert_eq!(everything.body["data"].as_array().unwrap().len(), 2);

    let narrowed = app
        .request(
            "GET",
            &format!("/api/courses?institute_id={id_b}"),
            None,
            Some(&root),
        )
        .await;
    let courses = narrowed.body["data"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Botany");

    let current = app
        .request("GET", "/api/institutes/current", None, Some(&root))
        .await;
    assert_eq!(current.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_ids_are_validation_errors() {
    let app = TestApp::new();
    let (token, _) = app.admin_with_institute("a@oak.edu", "Oak").await;

    let bad_path = app
        .request("GET", "/api/courses/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(bad_path.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_path.code(), Some("VALIDATION_ERROR"));

    let bad_query = app
        .request("GET", "/api/courses?institute_id=xyz", None, Some(&token))
        .await;
    assert_eq!(bad_query.status, StatusCode::BAD_REQUEST);
}
