//! API integration tests
//!
//! Run against a live server with seeded "librarian"/"librarian" and
//! "patron"/"patron" accounts: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a bearer token for the given account
async fn get_auth_token(client: &Client, login: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": login,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn librarian_token(client: &Client) -> String {
    get_auth_token(client, "librarian", "librarian").await
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "librarian",
            "password": "librarian"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["can_mark_returned"], true);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "librarian",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans/mine", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_patron_forbidden_from_all_loans_but_sees_own() {
    let client = Client::new();
    let token = get_auth_token(&client, "patron", "patron").await;

    // All loans requires the librarian capability
    let response = client
        .get(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);

    // Own loans only requires authentication
    let response = client
        .get(format!("{}/loans/mine", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let body: Value = response.json().await.expect("Failed to parse response");
    for copy in body.as_array().expect("Expected an array") {
        assert_eq!(copy["status"], "on_loan");
        assert_eq!(copy["borrower_id"], me["id"]);
    }
}

#[tokio::test]
#[ignore]
async fn test_patron_cannot_create_author() {
    let client = Client::new();
    let token = get_auth_token(&client, "patron", "patron").await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "No",
            "last_name": "Access"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_book() {
    let client = Client::new();
    let token = librarian_token(&client).await;

    // Create book
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Test Book",
            "summary": "A book created by the integration tests",
            "isbn": "9780000000000"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    // Delete book
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_book_rejects_bad_isbn() {
    let client = Client::new();
    let token = librarian_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Bad ISBN",
            "summary": "",
            "isbn": "978-030640615"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_renewal_window() {
    let client = Client::new();
    let token = librarian_token(&client).await;

    // Create a book with one copy on loan
    let book: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Renewal Test",
            "summary": "",
            "isbn": "9780000000001"
        }))
        .send()
        .await
        .expect("Failed to create book")
        .json()
        .await
        .expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("No book ID");

    let copy: Value = client
        .post(format!("{}/books/{}/copies", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "imprint": "First edition",
            "status": "on_loan"
        }))
        .send()
        .await
        .expect("Failed to create copy")
        .json()
        .await
        .expect("Failed to parse copy");
    let copy_id = copy["id"].as_str().expect("No copy ID").to_string();

    // The proposed date (three weeks out) is inside the window
    let proposal: Value = client
        .get(format!("{}/copies/{}/renew", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch proposal")
        .json()
        .await
        .expect("Failed to parse proposal");
    let proposed = proposal["proposed_renewal_date"]
        .as_str()
        .expect("No proposed date")
        .to_string();

    let response = client
        .post(format!("{}/copies/{}/renew", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "renewal_date": proposed }))
        .send()
        .await
        .expect("Failed to renew");

    assert!(response.status().is_success());
    let renewed: Value = response.json().await.expect("Failed to parse renewed copy");
    assert_eq!(renewed["due_back"], proposal["proposed_renewal_date"]);
    // Renewal never touches the status
    assert_eq!(renewed["status"], "on_loan");

    // A date in the past is rejected
    let response = client
        .post(format!("{}/copies/{}/renew", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "renewal_date": "2000-01-01" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "InvalidDate");

    // Cleanup
    let _ = client
        .delete(format!("{}/copies/{}", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_keeps_books() {
    let client = Client::new();
    let token = librarian_token(&client).await;

    let author: Value = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ephemeral",
            "last_name": "Author"
        }))
        .send()
        .await
        .expect("Failed to create author")
        .json()
        .await
        .expect("Failed to parse author");
    let author_id = author["id"].as_i64().expect("No author ID");

    let book: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Orphaned Book",
            "summary": "",
            "isbn": "9780000000002",
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to create book")
        .json()
        .await
        .expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete author");
    assert_eq!(response.status(), 204);

    // The book survives with its author reference cleared
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["title"], "Orphaned Book");
    assert!(book["author"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_dashboard_counts_and_visit_counter() {
    let client = Client::new();
    let token = librarian_token(&client).await;

    let first: Value = client
        .get(format!("{}/dashboard", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch dashboard")
        .json()
        .await
        .expect("Failed to parse dashboard");

    assert!(first["num_books"].is_number());
    assert!(first["num_copies"].is_number());
    assert!(first["num_copies_available"].is_number());
    assert!(first["num_authors"].is_number());
    assert_eq!(first["num_visits"], 0);

    let session_key = first["session_key"].as_str().expect("No session key");

    let second: Value = client
        .get(format!("{}/dashboard", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .header("x-session-key", session_key)
        .send()
        .await
        .expect("Failed to fetch dashboard")
        .json()
        .await
        .expect("Failed to parse dashboard");

    assert_eq!(second["num_visits"], 1);
    assert_eq!(second["session_key"], session_key);
}
