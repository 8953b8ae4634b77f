//! HTTP API Tests
//!
//! Drive the full router (CORS, cookies, handlers) against the in-memory
//! store.
//!
//! Covers:
//! - token issue / verify / logout through cookies
//! - wishlist reads limited to the signed-in owner
//! - blog create / fetch / upsert and both list orders
//! - wishlist delete counts

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use writewave::auth::{CookiePolicy, TokenConfig, TokenManager};
use writewave::http_server::{AppState, HttpServer, HttpServerConfig};
use writewave::store::MemoryStore;

// =============================================================================
// Test Utilities
// =============================================================================

const SECRET: &str = "integration-test-secret";
const FRONTEND: &str = "http://localhost:5173";

fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        TokenManager::new(TokenConfig::new(SECRET)),
        CookiePolicy::new(false),
    );
    HttpServer::new(HttpServerConfig::default(), state).router()
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }

    /// `name=value` part of the token Set-Cookie header
    fn token_cookie(&self) -> String {
        let set_cookie = self
            .headers
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().trim().to_string()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

/// Sign in and return the `token=...` cookie pair
async fn login(app: &Router, email: &str) -> String {
    let response = send(app, json_request(Method::POST, "/jwt", json!({"email": email}))).await;
    assert_eq!(response.status, StatusCode::OK);
    response.token_cookie()
}

async fn create_blog(app: &Router, body: Value) -> String {
    let response = send(app, json_request(Method::POST, "/blogs", body)).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["insertedId"]
        .as_str()
        .expect("insertedId")
        .to_string()
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_root_greeting() {
    let app = test_app();
    let response = send(&app, get("/")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text(),
        "Hello writeWave! This is your backend server."
    );
}

#[tokio::test]
async fn test_health_reports_database_up() {
    let app = test_app();
    let response = send(&app, get("/health")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["database"], "up");
}

// =============================================================================
// Auth Cookie
// =============================================================================

#[tokio::test]
async fn test_jwt_sets_http_only_cookie() {
    let app = test_app();
    let response = send(
        &app,
        json_request(Method::POST, "/jwt", json!({"email": "writer@example.com"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true}));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_issued_cookie_carries_signed_identity() {
    let app = test_app();
    let response = send(
        &app,
        json_request(
            Method::POST,
            "/jwt",
            json!({"email": "writer@example.com", "name": "Writer"}),
        ),
    )
    .await;

    let cookie = response.token_cookie();
    let token = cookie.strip_prefix("token=").unwrap();

    let identity = TokenManager::new(TokenConfig::new(SECRET))
        .verify(token)
        .unwrap();
    assert_eq!(identity.email, "writer@example.com");
    assert_eq!(identity.extra["name"], json!("Writer"));
}

#[tokio::test]
async fn test_jwt_without_email_is_rejected() {
    let app = test_app();
    let response = send(&app, json_request(Method::POST, "/jwt", json!({"name": "x"}))).await;
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = test_app();
    let response = send(&app, get("/logout")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true}));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_protected_route_after_logout_is_unauthorized() {
    let app = test_app();
    let _ = login(&app, "writer@example.com").await;

    // The browser applies the removal cookie and sends an empty token
    let cleared = send(&app, get("/logout")).await.token_cookie();
    assert_eq!(cleared, "token=");

    let response = send(
        &app,
        get_with_cookie("/wishlist/writer@example.com", &cleared),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["code"], 401);
}

#[tokio::test]
async fn test_protected_route_without_cookie_is_unauthorized() {
    let app = test_app();
    let response = send(&app, get("/wishlist/writer@example.com")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let app = test_app();
    let forged = TokenManager::new(TokenConfig::new("some-other-secret"))
        .issue(&writewave::auth::Identity::new("writer@example.com"))
        .unwrap();

    let response = send(
        &app,
        get_with_cookie("/wishlist/writer@example.com", &format!("token={forged}")),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_read_by_owner() {
    let app = test_app();
    for (email, blog) in [
        ("writer@example.com", "b1"),
        ("writer@example.com", "b2"),
        ("reader@example.com", "b3"),
    ] {
        let response = send(
            &app,
            json_request(Method::POST, "/wishlist", json!({"email": email, "blog_id": blog})),
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["acknowledged"], true);
    }

    let cookie = login(&app, "writer@example.com").await;
    let response = send(&app, get_with_cookie("/wishlist/writer@example.com", &cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.json();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["email"] == "writer@example.com"));
}

#[tokio::test]
async fn test_wishlist_read_for_other_email_is_forbidden() {
    let app = test_app();
    send(
        &app,
        json_request(Method::POST, "/wishlist", json!({"email": "reader@example.com"})),
    )
    .await;

    let cookie = login(&app, "writer@example.com").await;
    let response = send(&app, get_with_cookie("/wishlist/reader@example.com", &cookie)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["code"], 403);
}

#[tokio::test]
async fn test_wishlist_delete_twice() {
    let app = test_app();
    let created = send(
        &app,
        json_request(Method::POST, "/wishlist", json!({"email": "writer@example.com"})),
    )
    .await
    .json();
    let id = created["insertedId"].as_str().unwrap().to_string();

    let first = send(&app, delete(&format!("/wishlist/{id}"))).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), json!({"acknowledged": true, "deletedCount": 1}));

    let second = send(&app, delete(&format!("/wishlist/{id}"))).await;
    assert_eq!(second.json()["deletedCount"], 0);
}

#[tokio::test]
async fn test_wishlist_delete_invalid_id() {
    let app = test_app();
    let response = send(&app, delete("/wishlist/not-an-id")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Blogs
// =============================================================================

#[tokio::test]
async fn test_create_then_fetch_blog() {
    let app = test_app();
    let body = json!({"title": "A", "long_des": "hello", "long_des_count": 5});
    let id = create_blog(&app, body.clone()).await;

    let response = send(&app, get(&format!("/blogs/{id}"))).await;
    assert_eq!(response.status, StatusCode::OK);

    let post = response.json();
    assert_eq!(post["_id"], json!(id));
    for (key, value) in body.as_object().unwrap() {
        assert_eq!(&post[key], value, "field {key}");
    }
}

#[tokio::test]
async fn test_missing_blog_is_null() {
    let app = test_app();
    let response = send(&app, get("/blogs/65a1f0c2e4b0a1b2c3d4e5f6")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), Value::Null);
}

#[tokio::test]
async fn test_blog_invalid_id() {
    let app = test_app();
    let response = send(&app, get("/blogs/xyz")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 400);
}

#[tokio::test]
async fn test_blogs_sorted_by_date_desc() {
    let app = test_app();
    for date in ["2024-01-10", "2024-03-02", "2023-11-30"] {
        create_blog(&app, json!({"title": date, "date": date})).await;
    }

    let posts = send(&app, get("/blogs")).await.json();
    let dates: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-02", "2024-01-10", "2023-11-30"]);
}

#[tokio::test]
async fn test_blog_table_sorted_by_length_desc() {
    let app = test_app();
    for count in [120, 5, 42, 980] {
        create_blog(&app, json!({"long_des_count": count})).await;
    }

    let posts = send(&app, get("/blogs/table")).await.json();
    let counts: Vec<i64> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["long_des_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts.len(), 4);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_put_updates_existing_blog() {
    let app = test_app();
    let id = create_blog(&app, json!({"title": "A", "long_des": "hello"})).await;

    let response = send(
        &app,
        json_request(Method::PUT, &format!("/blogs/{id}"), json!({"title": "B"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let outcome = response.json();
    assert_eq!(outcome["matchedCount"], 1);
    assert_eq!(outcome["modifiedCount"], 1);
    assert_eq!(outcome["upsertedId"], Value::Null);

    let post = send(&app, get(&format!("/blogs/{id}"))).await.json();
    assert_eq!(post["title"], "B");
    assert_eq!(post["long_des"], "hello");
}

#[tokio::test]
async fn test_put_unknown_id_creates_blog() {
    let app = test_app();
    let id = "65a1f0c2e4b0a1b2c3d4e5f6";

    let response = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/blogs/{id}"),
            json!({"_id": "ignored", "title": "fresh"}),
        ),
    )
    .await;
    let outcome = response.json();
    assert_eq!(outcome["upsertedCount"], 1);
    assert_eq!(outcome["upsertedId"], id);

    let post = send(&app, get(&format!("/blogs/{id}"))).await.json();
    assert_eq!(post["_id"], id);
    assert_eq!(post["title"], "fresh");
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn test_create_comment() {
    let app = test_app();
    let response = send(
        &app,
        json_request(
            Method::POST,
            "/comments",
            json!({"blog_id": "65a1f0c2e4b0a1b2c3d4e5f6", "comment": "nice"}),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let outcome = response.json();
    assert_eq!(outcome["acknowledged"], true);
    assert_eq!(outcome["insertedId"].as_str().unwrap().len(), 24);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_frontend_with_credentials() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/blogs")
        .header(header::ORIGIN, FRONTEND)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = test_app();
    let request = Request::get("/blogs")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .headers
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
