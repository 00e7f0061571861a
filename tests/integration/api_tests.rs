//! API integration tests
//!
//! These run against a live server seeded with an `admin` / `admin` account:
//! `cargo test --test api_tests -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to log in and get a bearer token
async fn login(client: &Client, student_id: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "student_id": student_id,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", student_id);
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a student through the admin API and return its id
async fn create_student(client: &Client, admin_token: &str) -> String {
    let student_id = format!("it{}", chrono::Utc::now().timestamp_micros());
    let response = client
        .post(format!("{}/admin/users", BASE_URL))
        .bearer_auth(admin_token)
        .json(&json!({ "username": student_id, "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    student_id
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "student_id": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_admin_login_lands_on_admin() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "student_id": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.headers().get("set-cookie").is_some());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["redirect"], "/admin");
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_new_student_week_is_defaults() {
    let client = Client::new();
    let admin = login(&client, "admin", "admin").await;
    let student_id = create_student(&client, &admin).await;
    let token = login(&client, &student_id, "password").await;

    let response = client
        .get(format!("{}/attendance", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let week: Value = response.json().await.expect("Failed to parse response");
    let days = week["days"].as_array().expect("days is not an array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], today());
    for day in days {
        assert_eq!(day["breakfast"], true);
        assert_eq!(day["lunch"], true);
        assert_eq!(day["dinner"], true);
        assert_eq!(day["overnight"], false);
        assert_eq!(day["note"], "");
    }
}

#[tokio::test]
#[ignore]
async fn test_cookie_session_submit_and_read_back() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let admin = login(&Client::new(), "admin", "admin").await;
    let student_id = create_student(&client, &admin).await;
    // Populates the cookie store
    login(&client, &student_id, "password").await;

    let date = today();
    let response = client
        .post(format!("{}/attendance", BASE_URL))
        .form(&[
            (format!("breakfast-{}", date), "on".to_string()),
            (format!("overnight-{}", date), "on".to_string()),
            (format!("note-{}", date), "late return".to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let first = &body["week"]["days"][0];
    assert_eq!(first["breakfast"], true);
    assert_eq!(first["lunch"], false);
    assert_eq!(first["dinner"], false);
    assert_eq!(first["overnight"], true);
    assert_eq!(first["note"], "late return");
}

#[tokio::test]
#[ignore]
async fn test_admin_edit_uses_skip_semantics() {
    let client = Client::new();
    let admin = login(&client, "admin", "admin").await;
    let student_id = create_student(&client, &admin).await;

    let date = today();
    let response = client
        .post(format!("{}/admin/users/{}/attendance", BASE_URL, student_id))
        .bearer_auth(&admin)
        .form(&[(format!("breakfast-{}", date), "on")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let first = &body["week"]["days"][0];
    assert_eq!(first["breakfast"], false);
    assert_eq!(first["lunch"], true);
    assert_eq!(first["overnight"], false);
}

#[tokio::test]
#[ignore]
async fn test_admin_lists_users() {
    let client = Client::new();
    let admin = login(&client, "admin", "admin").await;

    let response = client
        .get(format!("{}/admin/users", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let users: Value = response.json().await.expect("Failed to parse response");
    assert!(users
        .as_array()
        .expect("users is not an array")
        .iter()
        .any(|u| u["username"] == "admin"));
}

#[tokio::test]
#[ignore]
async fn test_admin_unknown_student_is_not_found() {
    let client = Client::new();
    let admin = login(&client, "admin", "admin").await;

    let response = client
        .get(format!("{}/admin/users/no-such-student/attendance", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
