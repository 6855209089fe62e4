mod common;

use axum::http::StatusCode;
use common::{create_admin, create_customer, json_request, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let customer = create_customer(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, json_request("GET", "/api/users", Some(&admin.token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(&app, json_request("GET", "/api/users?role=user", Some(&admin.token), None)).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["username"], customer.username);

    let (status, _) = send(&app, json_request("GET", "/api/users", Some(&customer.token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_updates_role(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let customer = create_customer(&pool).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/users/{}", customer.id);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&admin.token),
            Some(json!({"username": customer.username, "email": customer.email, "role": "admin"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&admin.token),
            Some(json!({"username": customer.username, "email": customer.email, "role": "owner"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown role: owner");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_to_taken_username_is_conflict(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let customer = create_customer(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{}", customer.id),
            Some(&admin.token),
            Some(json!({"username": admin.username, "email": customer.email, "role": "user"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let customer = create_customer(&pool).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/users/{}", customer.id);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&admin.token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, json_request("GET", &uri, Some(&admin.token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request("DELETE", &format!("/api/users/{}", Uuid::new_v4()), Some(&admin.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roles(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = setup_test_app(pool);

    let (status, roles) = send(&app, json_request("GET", "/api/roles", Some(&admin.token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = roles
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "user"]);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/roles", Some(&admin.token), Some(json!({"name": "support"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/roles", Some(&admin.token), Some(json!({"name": "support"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
