mod common;

use auth::Role;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn create_restaurant(app: &TestApp, token: &str, name: &str) -> Value {
    let response = app
        .post_authenticated("/api/v1/restaurants", token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_restaurant_lifecycle() {
    let app = TestApp::spawn().await;
    let token = app.superadmin_token().await;

    // Create
    let response = app
        .post_authenticated("/api/v1/restaurants", &token)
        .json(&json!({
            "name": "Da Mario",
            "description": "Wood-fired pizza",
            "email": "mario@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Da Mario");
    assert_eq!(body["data"]["is_active"], true);
    assert!(body["data"].get("address").is_none());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Read
    let response = app
        .get_authenticated(&format!("/api/v1/restaurants/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "mario@example.com");

    // Partial update
    let response = app
        .put_authenticated(&format!("/api/v1/restaurants/{}", id), &token)
        .json(&json!({ "address": "Via Roma 1", "is_active": false }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Da Mario");
    assert_eq!(body["data"]["description"], "Wood-fired pizza");
    assert_eq!(body["data"]["address"], "Via Roma 1");
    assert_eq!(body["data"]["is_active"], false);

    // Delete
    let response = app
        .delete_authenticated(&format!("/api/v1/restaurants/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/v1/restaurants/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&format!("/api/v1/restaurants/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_restaurants_paginates() {
    let app = TestApp::spawn().await;
    let token = app.superadmin_token().await;

    for name in ["First", "Second", "Third"] {
        create_restaurant(&app, &token, name).await;
    }

    let response = app
        .get_authenticated("/api/v1/restaurants?page=2&page_size=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["page_size"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let response = app
        .get_authenticated("/api/v1/restaurants?page=0&page_size=0", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["page_size"], 10);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);

    let response = app
        .get_authenticated("/api/v1/restaurants?page_size=1000", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["page_size"], 100);
}

#[tokio::test]
async fn test_restaurant_validation() {
    let app = TestApp::spawn().await;
    let token = app.superadmin_token().await;

    let response = app
        .post_authenticated("/api/v1/restaurants", &token)
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_authenticated("/api/v1/restaurants", &token)
        .json(&json!({ "name": "Bistro", "email": "nope" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .get_authenticated("/api/v1/restaurants/42", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .get_authenticated(
            &format!("/api/v1/restaurants/{}", uuid::Uuid::new_v4()),
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restaurants_require_superadmin() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/restaurants")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Roles carry no hierarchy; admin is not enough
    app.register("carol@x.io", "secret1").await;
    app.identities.set_role("carol@x.io", Role::Admin);
    let admin_token = app.access_token("carol@x.io", "secret1").await;

    let response = app
        .post_authenticated("/api/v1/restaurants", &admin_token)
        .json(&json!({ "name": "Sneaky" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
