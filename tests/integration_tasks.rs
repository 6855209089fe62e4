mod common;

use axum::http::StatusCode;
use common::{create_customer, json_request, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_task_crud(pool: PgPool) {
    let owner = create_customer(&pool).await;
    let app = setup_test_app(pool);

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/tasks",
            Some(&owner.token),
            Some(json!({"title": "Restock cups"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["completed"], false);
    assert_eq!(created["description"], "");
    assert_eq!(created["owner_id"], owner.id.to_string());

    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, json_request("GET", &uri, Some(&owner.token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&owner.token),
            Some(json!({"title": "Restock cups", "description": "Blue ones", "completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["description"], "Blue ones");

    let (_, list) = send(&app, json_request("GET", "/api/tasks", Some(&owner.token), None)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&owner.token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, json_request("GET", &uri, Some(&owner.token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tasks_are_owner_scoped(pool: PgPool) {
    let owner = create_customer(&pool).await;
    let other = create_customer(&pool).await;
    let app = setup_test_app(pool);

    let (_, created) = send(
        &app,
        json_request("POST", "/api/tasks", Some(&owner.token), Some(json!({"title": "Mine"}))),
    )
    .await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, json_request("GET", &uri, Some(&other.token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&other.token),
            Some(json!({"title": "Theirs", "description": "", "completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&other.token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, json_request("GET", "/api/tasks", Some(&other.token), None)).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_missing_task(pool: PgPool) {
    let owner = create_customer(&pool).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/tasks/{}", Uuid::new_v4());

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&owner.token),
            Some(json!({"title": "x", "description": "", "completed": false})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&owner.token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_requires_every_field(pool: PgPool) {
    let owner = create_customer(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/tasks/{}", Uuid::new_v4()),
            Some(&owner.token),
            Some(json!({"title": "x"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "description is required");
}
