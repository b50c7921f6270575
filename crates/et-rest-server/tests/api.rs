// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end API tests against an in-memory database

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use et_rest_server::auth::hash_password;
use et_rest_server::server::Server;
use et_rest_server::state::AppState;
use et_rest_server::ServerConfig;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> (Router, AppState) {
    let config = ServerConfig {
        jwt_secret: "test_secret".to_string(),
        ..Default::default()
    };
    let state = AppState::new(config.clone()).await.expect("app state");
    let app = Server::build_app(state.clone(), &config);
    (app, state)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Seed a SUPER_ADMIN and log in through the API, returning the bearer token.
async fn admin_token(app: &Router, state: &AppState) -> String {
    let hash = hash_password("admin-password").expect("hash");
    state
        .db()
        .insert_user("IT Admin", "admin@lnu.local", &hash)
        .expect("seed admin");

    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/auth/login/admin",
            None,
            Some(json!({"email": "Admin@LNU.local", "password": "admin-password"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().expect("token").to_string()
}

async fn create_equipment_fixture(app: &Router, token: &str) -> (i64, i64, String) {
    let (status, category) = send(
        app,
        request(
            Method::POST,
            "/api/categories",
            Some(token),
            Some(json!({"name": "Computer", "description": "Desktops"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["data"]["id"].as_i64().unwrap();

    let (status, faculty) = send(
        app,
        request(
            Method::POST,
            "/api/faculty",
            Some(token),
            Some(json!({"name": "Dr. Santos", "employeeId": "fac-0001", "password": "faculty-pass-1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let faculty_id = faculty["data"]["id"].as_str().unwrap().to_string();
    // Employee ids are normalized to uppercase on the way in.
    assert_eq!(faculty["data"]["employeeId"], "FAC-0001");

    let (status, equipment) = send(
        app,
        request(
            Method::POST,
            "/api/equipment",
            Some(token),
            Some(json!({
                "serialNumber": "PC-001",
                "name": "Dell Optiplex",
                "categoryId": category_id,
                "facultyId": faculty_id,
                "datePurchased": "2024-01-15T00:00:00Z"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let equipment_id = equipment["data"]["id"].as_i64().unwrap();
    (equipment_id, category_id, faculty_id)
}

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = test_app().await;
    let (status, body) = send(&app, request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["uptime"].is_u64());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _state) = test_app().await;
    let (status, body) = send(&app, request(Method::GET, "/api/categories", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["title"], "Authentication Failed");
}

#[tokio::test]
async fn admin_login_rejects_bad_credentials() {
    let (app, state) = test_app().await;
    let hash = hash_password("admin-password").unwrap();
    state.db().insert_user("IT Admin", "admin@lnu.local", &hash).unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login/admin",
            None,
            Some(json!({"email": "admin@lnu.local", "password": "wrong-password"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid credentials");
}

#[tokio::test]
async fn me_reflects_the_logged_in_admin() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;

    let (status, body) = send(&app, request(Method::GET, "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role"], "SUPER_ADMIN");
    assert_eq!(body["data"]["email"], "admin@lnu.local");
}

#[tokio::test]
async fn faculty_token_cannot_reach_admin_routes() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;

    send(
        &app,
        request(
            Method::POST,
            "/api/faculty",
            Some(&token),
            Some(json!({"name": "Dr. Cruz", "employeeId": "FAC-0002", "password": "faculty-pass-2"})),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login/faculty",
            None,
            Some(json!({"employeeId": "fac-0002", "password": "faculty-pass-2"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let faculty_token = body["access_token"].as_str().unwrap();
    assert_eq!(body["user"]["role"], "USER");

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/users", Some(faculty_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["title"], "Authorization Failed");
}

#[tokio::test]
async fn category_crud_round_trip() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;

    let (status, created) = send(
        &app,
        request(
            Method::POST,
            "/api/categories",
            Some(&token),
            Some(json!({"name": "Projector"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/categories",
            Some(&token),
            Some(json!({"name": "Projector"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "A category with the same unique value already exists"
    );

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/api/categories/{id}"),
            Some(&token),
            Some(json!({"name": "Projectors"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Projectors");

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/categories/999", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Category with ID 999 not found");

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/categories/{id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_a_referenced_category_is_rejected() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (_, category_id, _) = create_equipment_fixture(&app, &token).await;

    let (status, body) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/categories/{category_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Cannot delete this category because it is referenced by other records"
    );
}

#[tokio::test]
async fn equipment_create_validates_relations() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/equipment",
            Some(&token),
            Some(json!({
                "serialNumber": "PC-404",
                "name": "Ghost PC",
                "categoryId": 999,
                "facultyId": "nope",
                "datePurchased": "2024-01-15T00:00:00Z"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Category with ID 999 does not exist");
}

#[tokio::test]
async fn equipment_filters_and_aliases() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, category_id, _) = create_equipment_fixture(&app, &token).await;

    send(
        &app,
        request(
            Method::POST,
            "/api/status-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "status": "AVAILABLE"})),
        ),
    )
    .await;

    // The /equipments alias serves the same listing.
    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/equipments?search=optiplex",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["currentStatus"]["status"], "AVAILABLE");
    assert_eq!(body["data"][0]["category"]["id"], category_id);

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/equipment?status=available",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // An empty categoryId is treated as no filter at all.
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/equipment?categoryId=", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/equipment?categoryId=banana",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "categoryId must be a valid number");
}

#[tokio::test]
async fn summary_and_dashboard_agree() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, _, _) = create_equipment_fixture(&app, &token).await;

    send(
        &app,
        request(
            Method::POST,
            "/api/status-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "status": "MAINTENANCE"})),
        ),
    )
    .await;

    let (status, summary) = send(
        &app,
        request(Method::GET, "/api/equipment/summary", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["data"]["totalEquipment"], 1);
    assert_eq!(summary["data"]["maintenanceCount"], 1);
    assert_eq!(summary["data"]["activeEquipment"], 0);

    let (status, stats) = send(
        &app,
        request(Method::GET, "/api/dashboard/stats", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["totalEquipment"], 1);
    assert_eq!(stats["data"]["maintenanceCount"], 1);
}

#[tokio::test]
async fn location_history_rejects_reassigning_the_same_room() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, _, _) = create_equipment_fixture(&app, &token).await;

    let (status, room) = send(
        &app,
        request(
            Method::POST,
            "/api/rooms",
            Some(&token),
            Some(json!({"name": "ComLab 1", "building": "Main"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let room_id = room["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/location-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "roomId": room_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/location-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "roomId": room_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        format!("Equipment {equipment_id} is already assigned to room {room_id}")
    );
}

#[tokio::test]
async fn history_reads_return_newest_first_with_actors() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, _, _) = create_equipment_fixture(&app, &token).await;

    let (_, me) = send(&app, request(Method::GET, "/api/auth/me", Some(&token), None)).await;
    let admin_id = me["data"]["id"].as_str().unwrap().to_string();

    for status_value in ["AVAILABLE", "ASSIGNED"] {
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/status-history",
                Some(&token),
                Some(json!({
                    "equipmentId": equipment_id,
                    "status": status_value,
                    "changedById": admin_id
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/status-history/equipment/{equipment_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first: the ASSIGNED change came after AVAILABLE.
    assert_eq!(entries[0]["status"], "ASSIGNED");
    assert_eq!(entries[1]["status"], "AVAILABLE");
    assert_eq!(entries[0]["changedBy"]["name"], "IT Admin");
    assert_eq!(entries[0]["changedBy"]["email"], "admin@lnu.local");
    assert!(!body.to_string().contains("password"));

    let mut room_ids = Vec::new();
    for name in ["ComLab 3", "ComLab 4"] {
        let (status, room) = send(
            &app,
            request(
                Method::POST,
                "/api/rooms",
                Some(&token),
                Some(json!({"name": name})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        room_ids.push(room["data"]["id"].as_i64().unwrap());
    }
    for room_id in &room_ids {
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/location-history",
                Some(&token),
                Some(json!({
                    "equipmentId": equipment_id,
                    "roomId": room_id,
                    "assignedById": admin_id
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/location-history/equipment/{equipment_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["room"]["name"], "ComLab 4");
    assert_eq!(entries[1]["room"]["name"], "ComLab 3");
    assert_eq!(entries[0]["assignedBy"]["name"], "IT Admin");
    assert!(!body.to_string().contains("password"));

    // Unknown equipment is a 404 on both read endpoints.
    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/status-history/equipment/999",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Equipment with ID 999 not found");

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            "/api/location-history/equipment/999",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn timeline_merges_both_history_tables() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, _, _) = create_equipment_fixture(&app, &token).await;

    send(
        &app,
        request(
            Method::POST,
            "/api/status-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "status": "MAINTENANCE", "notes": "fan noise"})),
        ),
    )
    .await;

    let (_, room) = send(
        &app,
        request(
            Method::POST,
            "/api/rooms",
            Some(&token),
            Some(json!({"name": "ComLab 2"})),
        ),
    )
    .await;
    send(
        &app,
        request(
            Method::POST,
            "/api/location-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "roomId": room["data"]["id"]})),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/equipment/{equipment_id}/timeline?range=7d"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    // Newest first: the room assignment happened after the status change.
    assert_eq!(events[0]["type"], "LOCATION");
    assert_eq!(
        events[0]["description"],
        "Dell Optiplex (PC-001) assigned to ComLab 2"
    );
    assert_eq!(events[1]["type"], "MAINTENANCE");
    assert_eq!(
        events[1]["description"],
        "Status updated to MAINTENANCE for Dell Optiplex (PC-001)"
    );
    assert!(events[1]["id"].as_str().unwrap().starts_with("status-"));

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/equipment/{equipment_id}/timeline?range=90d"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn activity_feed_describes_recent_events() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (equipment_id, _, _) = create_equipment_fixture(&app, &token).await;

    send(
        &app,
        request(
            Method::POST,
            "/api/status-history",
            Some(&token),
            Some(json!({"equipmentId": equipment_id, "status": "ASSIGNED"})),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/activities/recent", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let activities = body["data"].as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(
        activities[0]["description"],
        "Status updated to ASSIGNED for Dell Optiplex (PC-001)"
    );
    assert!(activities[0]["id"].as_str().unwrap().starts_with("status-"));
}

#[tokio::test]
async fn password_reset_workflow_end_to_end() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;
    let (_, _, _faculty_id) = create_equipment_fixture(&app, &token).await;

    // Unknown employee ids get the same acknowledgement.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/password-requests",
            None,
            Some(json!({"employeeId": "FAC-9999"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["data"]["message"],
        "If an account exists, a request has been submitted"
    );

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/password-requests",
            None,
            Some(json!({"employeeId": "fac-0001"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/password-requests", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let requests = body["data"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["status"], "PENDING");
    assert_eq!(requests[0]["faculty"]["employeeId"], "FAC-0001");
    let request_id = requests[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/password-requests/{request_id}/resolve"),
            Some(&token),
            Some(json!({"newPassword": "fresh-password-1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "COMPLETED");
    assert_eq!(body["data"]["resolvedByAdmin"]["email"], "admin@lnu.local");

    // Resolving twice is rejected.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/password-requests/{request_id}/resolve"),
            Some(&token),
            Some(json!({"newPassword": "fresh-password-2"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Password reset request is already completed");

    // The faculty can log in with the new password.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login/faculty",
            None,
            Some(json!({"employeeId": "FAC-0001", "password": "fresh-password-1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn user_creation_routes_by_role() {
    let (app, state) = test_app().await;
    let token = admin_token(&app, &state).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({
                "name": "Second Admin",
                "role": "SUPER_ADMIN",
                "email": "Second@LNU.local",
                "password": "another-admin-pw"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["accountType"], "SUPER_ADMIN");
    assert_eq!(body["data"]["email"], "second@lnu.local");

    // Same email again conflicts.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({
                "name": "Second Admin",
                "role": "SUPER_ADMIN",
                "email": "second@lnu.local",
                "password": "another-admin-pw"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "SUPER_ADMIN account already exists");

    // A USER account lands in the faculty table and needs an employee id.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({
                "name": "Prof. Reyes",
                "role": "USER",
                "password": "faculty-pw-123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "employeeId is required for USER");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({
                "name": "Prof. Reyes",
                "role": "USER",
                "employeeId": "fac-0042",
                "password": "faculty-pw-123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["accountType"], "USER");
    assert_eq!(body["data"]["employeeId"], "FAC-0042");

    // The /user alias answers listing too; password hashes stay private.
    let (status, body) = send(&app, request(Method::GET, "/api/user", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(!body.to_string().contains("password"));

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/users/unknown-id", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn db_test_reports_categories() {
    let (app, state) = test_app().await;
    state.db().insert_category("Printer", None).unwrap();

    let (status, body) = send(&app, request(Method::GET, "/api/db-test", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Database connection successful");
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["categories"][0]["name"], "Printer");
}
