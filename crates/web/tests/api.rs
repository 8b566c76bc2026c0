use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use storage::Database;
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "admin";

// A single connection keeps the in-memory database alive for the whole
// test; separate connections would each see their own empty database.
async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let db = Database::from_pool(pool);
    db.run_migrations().await.unwrap();
    web::bootstrap::seed(&db, ADMIN_PASSWORD).await.unwrap();

    web::app(db)
}

async fn send_json(app: &Router, method: &str, uri: &str, cookie: Option<&str>, body: Value) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_owned());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body, set_cookie)
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body, location)
}

async fn register(app: &Router, username: &str, role: &str) -> Value {
    let (status, body, _) = send_json(
        app,
        "POST",
        "/register",
        None,
        json!({
            "username": username,
            "full_name": format!("{username} Test"),
            "email": format!("{username}@example.com"),
            "password": "secret123",
            "role": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, _, set_cookie) = send_json(
        app,
        "POST",
        "/login",
        None,
        json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = set_cookie.expect("login must set the session cookie");
    assert!(set_cookie.starts_with("session_token="));
    set_cookie.split(';').next().unwrap().to_owned()
}

#[tokio::test]
async fn register_student_is_confirmed_immediately() {
    let app = test_app().await;

    let body = register(&app, "alice", "student").await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "student");
    assert_eq!(body["is_confirmed"], true);
    assert_eq!(body["points"], 0);
}

#[tokio::test]
async fn register_teacher_awaits_confirmation() {
    let app = test_app().await;

    let body = register(&app, "carol", "teacher").await;

    assert_eq!(body["is_confirmed"], false);

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/login",
        None,
        json!({ "username": "carol", "password": "secret123" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "account awaiting confirmation");
}

#[tokio::test]
async fn admin_cannot_be_self_registered() {
    let app = test_app().await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/register",
        None,
        json!({
            "username": "mallory",
            "full_name": "Mallory Test",
            "email": "mallory@example.com",
            "password": "secret123",
            "role": "admin",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "admin accounts cannot be self-registered");
}

#[tokio::test]
async fn seeded_admin_can_log_in() {
    let app = test_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = get(&app, "/points", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn unauthenticated_request_redirects_to_login() {
    let app = test_app().await;

    let (status, _, location) = get(&app, "/points", None).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn any_authenticated_user_can_list_users() {
    let app = test_app().await;
    register(&app, "alice", "student").await;
    let cookie = login(&app, "alice", "secret123").await;

    let (status, body, _) = get(&app, "/users", Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    let usernames: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert!(usernames.contains(&"admin"));
    assert!(usernames.contains(&"alice"));

    let (status, _, location) = get(&app, "/users", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn student_is_redirected_from_admin_pages() {
    let app = test_app().await;
    register(&app, "alice", "student").await;
    let cookie = login(&app, "alice", "secret123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/manage_users")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/top_users"
    );
    let flash = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .find(|v| v.to_str().unwrap().starts_with("flash="))
        .expect("role rejection must set a flash cookie");
    assert!(flash.to_str().unwrap().contains("access_denied"));
}

#[tokio::test]
async fn competition_award_credits_the_dimension_sum() {
    let app = test_app().await;
    let student = register(&app, "alice", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/award",
        Some(&cookie),
        json!({
            "award_type": "competition",
            "user_id": student["id"],
            "name": "Spring Hackathon",
            "level": 3,
            "quality": 2,
            "place": 1,
            "communication": 4,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["points_awarded"], 10);
    assert_eq!(body["new_points"], 10);
}

#[tokio::test]
async fn leaderboard_orders_by_points_descending() {
    let app = test_app().await;
    register(&app, "alice", "student").await;
    let bob = register(&app, "bob", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    send_json(
        &app,
        "POST",
        "/award_points",
        Some(&cookie),
        json!({
            "user_id": bob["id"],
            "points": 15,
            "reason": "extra credit",
            "transaction_type": "award",
        }),
    )
    .await;

    let (status, body, _) = get(&app, "/top_users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["rank"], 1);
    assert_eq!(body["data"][0]["user"]["username"], "bob");
    assert_eq!(body["data"][0]["user"]["points"], 15);
    // Anonymous callers get no personal rank.
    assert_eq!(body["my_rank"], Value::Null);
}

#[tokio::test]
async fn penalty_subtracts_points() {
    let app = test_app().await;
    let student = register(&app, "alice", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    send_json(
        &app,
        "POST",
        "/award_points",
        Some(&cookie),
        json!({
            "user_id": student["id"],
            "points": 10,
            "reason": "good work",
            "transaction_type": "award",
        }),
    )
    .await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/award_points",
        Some(&cookie),
        json!({
            "user_id": student["id"],
            "points": 4,
            "reason": "late submission",
            "transaction_type": "penalty",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_points"], 6);
    assert_eq!(body["transaction"]["points"], -4);
}

#[tokio::test]
async fn invalid_transaction_type_is_rejected() {
    let app = test_app().await;
    let student = register(&app, "alice", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/award_points",
        Some(&cookie),
        json!({
            "user_id": student["id"],
            "points": 5,
            "reason": null,
            "transaction_type": "bonus",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid transaction type");
}

#[tokio::test]
async fn weekly_sheet_adjust_rejects_unknown_action() {
    let app = test_app().await;
    let student = register(&app, "alice", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/weekly_performance",
        Some(&cookie),
        json!({
            "student_id": student["id"],
            "points": 5,
            "reason": null,
            "action": "smite",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid action");
}

#[tokio::test]
async fn updating_missing_weekly_record_is_not_found() {
    let app = test_app().await;
    let student = register(&app, "alice", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = send_json(
        &app,
        "POST",
        "/update_weekly_performance",
        Some(&cookie),
        json!({
            "student_id": student["id"],
            "week_start": "2026-08-17",
            "academic_performance": 3,
            "mentoring": 2,
            "teamwork": 1,
            "discipline": 2,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn weekly_sheet_creates_zeroed_rows_for_students() {
    let app = test_app().await;
    register(&app, "alice", "student").await;
    register(&app, "bob", "student").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = get(&app, "/weekly_performance?date=2026-08-19", Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week_start"], "2026-08-17");
    assert_eq!(body["week_end"], "2026-08-23");
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    assert_eq!(body["entries"][0]["performance"]["points"], 0);
}

#[tokio::test]
async fn admin_account_cannot_be_deleted() {
    let app = test_app().await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let request = Request::builder()
        .method("POST")
        .uri("/delete_user/1")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/manage_users"
    );
    let flash = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .find(|v| v.to_str().unwrap().starts_with("flash="))
        .expect("admin deletion must set a flash cookie");
    assert!(flash.to_str().unwrap().contains("cannot_delete_admin"));
}

#[tokio::test]
async fn admin_confirms_pending_teacher() {
    let app = test_app().await;
    let teacher = register(&app, "carol", "teacher").await;
    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body, _) = get(&app, "/confirm_users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["username"], "carol");

    let (status, _, _) = send_json(
        &app,
        "POST",
        "/confirm_users",
        Some(&cookie),
        json!({ "user_id": teacher["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The teacher can log in now.
    login(&app, "carol", "secret123").await;
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = test_app().await;
    register(&app, "alice", "student").await;

    let (status, _, _) = send_json(
        &app,
        "POST",
        "/register",
        None,
        json!({
            "username": "alice",
            "full_name": "Alice Again",
            "email": "alice2@example.com",
            "password": "secret123",
            "role": "student",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}
