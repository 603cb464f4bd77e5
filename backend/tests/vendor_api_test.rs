// Integration tests for the Vendor API lifecycle.

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{config_with_secret, vendor_token, TestServer, SECRET};

const APP_PATH: &str = "/api/moysklad/vendor/1.0/apps/app-1/acc-1";

fn activation_body() -> Value {
    json!({
        "appUid": "expensesms.vendor",
        "accountName": "shop",
        "cause": "Install",
        "access": [{"resource": "https://api.moysklad.ru/api/remap/1.2", "scope": ["admin"], "access_token": "tok-1"}]
    })
}

async fn status_of(server: &TestServer, auth: &str) -> String {
    let resp = server
        .client
        .get(server.url(&format!("{}/status", APP_PATH)))
        .bearer_auth(auth)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    body["status"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_activate_status_deactivate() {
    let server = TestServer::start(config_with_secret(Some(SECRET))).await;
    let token = vendor_token(SECRET);

    assert_eq!(status_of(&server, &token).await, "SettingsRequired");

    let resp = server
        .client
        .put(server.url(APP_PATH))
        .bearer_auth(&token)
        .json(&activation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"status": "Activated"}));

    assert_eq!(status_of(&server, &token).await, "Activated");

    let resp = server
        .client
        .delete(server.url(APP_PATH))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.bytes().await.unwrap().is_empty());

    assert_eq!(status_of(&server, &token).await, "SettingsRequired");
}

#[tokio::test]
async fn test_deactivate_unknown_account_is_ok() {
    let server = TestServer::start(config_with_secret(Some(SECRET))).await;
    let resp = server
        .client
        .delete(server.url("/api/moysklad/vendor/1.0/apps/app-1/nobody"))
        .bearer_auth(vendor_token(SECRET))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bad_or_missing_token_is_rejected() {
    let server = TestServer::start(config_with_secret(Some(SECRET))).await;

    let resp = server
        .client
        .put(server.url(APP_PATH))
        .json(&activation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = server
        .client
        .put(server.url(APP_PATH))
        .bearer_auth(vendor_token("wrong-secret"))
        .json(&activation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token signature");
}

#[tokio::test]
async fn test_malformed_activation_body_is_bad_request() {
    let server = TestServer::start(config_with_secret(None)).await;
    let resp = server
        .client
        .put(server.url(APP_PATH))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_without_secret_tokens_are_not_checked() {
    let server = TestServer::start(config_with_secret(None)).await;
    let resp = server
        .client
        .put(server.url(APP_PATH))
        .json(&activation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(status_of(&server, "anything").await, "Activated");
}
