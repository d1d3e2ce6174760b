//! End-to-end tests against a real Postgres store. `#[sqlx::test]` provisions
//! an isolated database per test (derived from `DATABASE_URL`) and applies the
//! migrations before handing over the pool, so these cover the behavior the
//! lazy-pool tests in `http_api_tests.rs` deliberately stop short of.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use time::Duration;
use tower::ServiceExt;

use fintrack::{
    app::build_app,
    auth::JwtKeys,
    config::{AppConfig, JwtConfig},
    state::AppState,
};

const TEST_SECRET: &str = "test-secret";

fn app_with(pool: PgPool) -> Router {
    let config = Arc::new(AppConfig {
        database_url: String::new(),
        environment: "test".into(),
        jwt: JwtConfig {
            secret: TEST_SECRET.into(),
            ttl_hours: 24,
        },
    });
    build_app(AppState::from_parts(pool, config))
}

fn token_for(user_id: i32) -> String {
    JwtKeys::new(TEST_SECRET, Duration::hours(24))
        .sign(user_id)
        .expect("sign test token")
}

fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).expect("body should be json");
    (status, body)
}

async fn register(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    let payload = json!({ "name": name, "email": email, "password": password });
    send(
        app,
        request(Method::POST, "/api/users/register", None, Some(&payload)),
    )
    .await
}

/// NUMERIC columns come back over the wire as decimal strings.
fn decimal(v: &Value) -> f64 {
    v.as_str()
        .expect("decimal string")
        .parse()
        .expect("parse decimal")
}

fn id_of(v: &Value) -> i32 {
    v["id"].as_i64().expect("numeric id") as i32
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_registration_conflicts(pool: PgPool) {
    let app = app_with(pool);

    let (status, _) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "Alice Again", "alice@example.com", "hunter22").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists.");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_failures_are_identical_for_unknown_email_and_wrong_password(pool: PgPool) {
    let app = app_with(pool);
    let (_, _) = register(&app, "Alice", "alice@example.com", "hunter22").await;

    let wrong_password = json!({ "email": "alice@example.com", "password": "wrong" });
    let unknown_email = json!({ "email": "nobody@example.com", "password": "hunter22" });

    let (status_a, body_a) = send(
        &app,
        request(Method::POST, "/api/users/login", None, Some(&wrong_password)),
    )
    .await;
    let (status_b, body_b) = send(
        &app,
        request(Method::POST, "/api/users/login", None, Some(&unknown_email)),
    )
    .await;

    assert_eq!(status_a, StatusCode::BAD_REQUEST);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn settings_first_read_materializes_defaults_idempotently(pool: PgPool) {
    let app = app_with(pool);
    let (_, user) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    let user_id = id_of(&user);
    let token = token_for(user_id);
    let uri = format!("/api/settings/user/{user_id}");

    let (status, first) = send(&app, request(Method::GET, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["currency"], "USD");
    assert_eq!(decimal(&first["monthly_income_target"]), 0.0);

    let (status, second) = send(&app, request(Method::GET, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["currency"], "USD");
    assert_eq!(decimal(&second["monthly_income_target"]), 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_settings_update_preserves_omitted_fields(pool: PgPool) {
    let app = app_with(pool);
    let (_, user) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    let user_id = id_of(&user);
    let token = token_for(user_id);
    let uri = format!("/api/settings/user/{user_id}");

    let full = json!({ "currency": "EUR", "monthly_income_target": 1500 });
    let (status, body) = send(&app, request(Method::PUT, &uri, Some(&token), Some(&full))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "EUR");
    assert_eq!(decimal(&body["monthly_income_target"]), 1500.0);

    // Currency-only update must not reset the saved target.
    let currency_only = json!({ "currency": "GBP" });
    let (status, body) = send(
        &app,
        request(Method::PUT, &uri, Some(&token), Some(&currency_only)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "GBP");
    assert_eq!(decimal(&body["monthly_income_target"]), 1500.0);

    // And the other way around.
    let target_only = json!({ "monthly_income_target": 2000 });
    let (status, body) = send(
        &app,
        request(Method::PUT, &uri, Some(&token), Some(&target_only)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "GBP");
    assert_eq!(decimal(&body["monthly_income_target"]), 2000.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn budget_create_then_fetch_round_trip(pool: PgPool) {
    let app = app_with(pool);
    let (_, user) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    let user_id = id_of(&user);
    let token = token_for(user_id);

    let payload = json!({
        "user_id": user_id,
        "name": "Groceries",
        "amount": 500,
        "period": "monthly",
    });
    let (status, created) = send(
        &app,
        request(Method::POST, "/api/budgets", Some(&token), Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_i64());

    let (status, list) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/budgets/user/{user_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = list.as_array().expect("list of budgets");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], created["id"]);
    assert_eq!(rows[0]["name"], "Groceries");
    assert_eq!(decimal(&rows[0]["amount"]), 500.0);
    assert_eq!(rows[0]["period"], "monthly");
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_missing_resources_is_404(pool: PgPool) {
    let app = app_with(pool);
    let (_, user) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    let token = token_for(id_of(&user));

    for (uri, missing) in [
        ("/api/budgets/9999", "Budget not found"),
        ("/api/expenses/9999", "Expense not found"),
        ("/api/goals/9999", "Goal not found"),
    ] {
        let (status, body) = send(&app, request(Method::DELETE, uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], missing, "{uri}");
    }

    let (status, body) = send(&app, request(Method::DELETE, "/api/users/9999", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn goal_lifecycle_end_to_end(pool: PgPool) {
    let app = app_with(pool);

    let (status, _) = register(&app, "Alice", "alice@example.com", "hunter22").await;
    assert_eq!(status, StatusCode::CREATED);

    let credentials = json!({ "email": "alice@example.com", "password": "hunter22" });
    let (status, login) = send(
        &app,
        request(Method::POST, "/api/users/login", None, Some(&credentials)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().expect("token").to_string();
    let user_id = id_of(&login["user"]);

    let payload = json!({
        "user_id": user_id,
        "name": "Emergency fund",
        "target_amount": 2000,
        "current_amount": 500,
        "deadline": "2025-12-31",
    });
    let (status, created) = send(
        &app,
        request(Method::POST, "/api/goals", Some(&token), Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = id_of(&created);

    let list_uri = format!("/api/goals/user/{user_id}");
    let (status, list) = send(&app, request(Method::GET, &list_uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = list.as_array().expect("list of goals");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Emergency fund");
    assert_eq!(decimal(&rows[0]["target_amount"]), 2000.0);
    assert_eq!(decimal(&rows[0]["current_amount"]), 500.0);
    assert_eq!(rows[0]["deadline"], "2025-12-31");

    let (status, body) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/goals/{goal_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Goal deleted");

    let (status, list) = send(&app, request(Method::GET, &list_uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(0));
}
