mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{json_request, lazy_pool, send, setup_test_app, test_state, token_for_role};
use serde_json::json;
use shopfront::router::init_router;
use shopfront_config::RateLimitConfig;

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = setup_test_app(lazy_pool());
    let (status, body) = send(&app, json_request("GET", "/api/auth/me", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization header missing");
}

#[tokio::test]
async fn test_non_bearer_scheme() {
    let app = setup_test_app(lazy_pool());
    let request = Request::builder()
        .uri("/api/categories")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[tokio::test]
async fn test_empty_bearer_token() {
    let app = setup_test_app(lazy_pool());
    let request = Request::builder()
        .uri("/api/tasks")
        .header(header::AUTHORIZATION, "Bearer ")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Bearer token missing");
}

#[tokio::test]
async fn test_invalid_token() {
    let app = setup_test_app(lazy_pool());
    let (status, body) = send(
        &app,
        json_request("GET", "/api/orders", Some("not.a.token"), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_returns_token_identity() {
    let app = setup_test_app(lazy_pool());
    let token = token_for_role("user");
    let (status, body) = send(&app, json_request("GET", "/api/auth/me", Some(&token), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ghost");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_admin_route_accepts_admin() {
    let app = setup_test_app(lazy_pool());
    let token = token_for_role("admin");
    let (status, body) = send(&app, json_request("GET", "/api/admin", Some(&token), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome Admin!");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_admin_routes_reject_other_roles() {
    let app = setup_test_app(lazy_pool());

    for role in ["user", "Admin", "superuser"] {
        let token = token_for_role(role);
        for uri in ["/api/admin", "/api/users", "/api/roles", "/api/reports/sales"] {
            let (status, body) = send(&app, json_request("GET", uri, Some(&token), None)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{role} on {uri}");
            assert_eq!(body["error"], "Access forbidden");
        }
    }
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = setup_test_app(lazy_pool());
    let (status, _) = send(&app, json_request("GET", "/api/users", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_writes_reject_non_admin() {
    let app = setup_test_app(lazy_pool());
    let token = token_for_role("user");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/categories",
            Some(&token),
            Some(json!({"name": "Kitchen"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            "/api/products/00000000-0000-0000-0000-000000000001",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_path_ids_are_json_400() {
    let app = setup_test_app(lazy_pool());
    let user = token_for_role("user");
    let admin = token_for_role("admin");

    for (method, uri, token) in [
        ("GET", "/api/tasks/not-a-uuid", &user),
        ("GET", "/api/orders/not-a-uuid", &user),
        ("GET", "/api/products/not-a-uuid", &user),
        ("GET", "/api/products/not-a-uuid/reviews", &user),
        ("DELETE", "/api/cart/items/42", &user),
        ("GET", "/api/users/not-a-uuid", &admin),
    ] {
        let (status, body) = send(&app, json_request(method, uri, Some(token), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["error"], "Invalid path parameter", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = setup_test_app(lazy_pool());
    let response = tower::ServiceExt::oneshot(
        app,
        json_request("GET", "/api/auth/me", None, None),
    )
    .await
    .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(headers["content-security-policy"], "default-src 'self'");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_test_app(lazy_pool());
    let request = Request::builder()
        .uri("/api/auth/me")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_register_validation_is_400() {
    let app = setup_test_app(lazy_pool());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "al", "email": "not-an-email", "password": "short"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let app = setup_test_app(lazy_pool());
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from(r#"{"username":"a","password":"b"}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let app = setup_test_app(lazy_pool());
    let (status, body) = send(&app, json_request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_item_store_crud() {
    let app = setup_test_app(lazy_pool());
    let token = token_for_role("user");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/items",
            Some(&token),
            Some(json!({"id": "sku-1", "name": "Espresso cup"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "sku-1");

    let (status, body) = send(&app, json_request("GET", "/api/items/sku-1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Espresso cup");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/items/sku-1",
            Some(&token),
            Some(json!({"name": "Latte cup"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Latte cup");

    let (status, body) = send(&app, json_request("DELETE", "/api/items/sku-1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted");

    let (status, _) = send(&app, json_request("GET", "/api/items/sku-1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_store_missing_ids() {
    let app = setup_test_app(lazy_pool());
    let token = token_for_role("user");

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/items/nope", Some(&token), Some(json!({"name": "x"}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("DELETE", "/api/items/nope", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_store_requires_auth() {
    let app = setup_test_app(lazy_pool());
    let (status, _) = send(
        &app,
        json_request("POST", "/api/items", None, Some(json!({"id": "a", "name": "b"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_rate_limit_exceeded() {
    let strict = RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: 1,
        trust_proxy_headers: true,
    };
    let app = init_router(test_state(lazy_pool()).with_rate_limit_config(strict));

    let attempt = || {
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "192.168.1.100")
            .body(Body::from("{}"))
            .unwrap()
    };

    let (status, _) = send(&app, attempt()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, attempt()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_is_per_client() {
    let strict = RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: 1,
        trust_proxy_headers: true,
    };
    let app = init_router(test_state(lazy_pool()).with_rate_limit_config(strict));

    for ip in ["10.0.0.1", "10.0.0.2"] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{ip}");
    }
}

#[tokio::test]
async fn test_rotating_forwarded_for_still_limited() {
    let strict = RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: 1,
        trust_proxy_headers: false,
    };
    let app = init_router(test_state(lazy_pool()).with_rate_limit_config(strict));

    let mut limited = 0;
    for n in 1..=5 {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .header("x-forwarded-for", format!("10.1.0.{n}"))
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(&app, request).await;
        if status == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }
    assert_eq!(limited, 4);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = setup_test_app(lazy_pool());
    let (status, body) = send(&app, json_request("GET", "/api-docs/openapi.json", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/orders"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
