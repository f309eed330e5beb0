// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end signup/login flow through the HTTP router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use relational_auth_server::{
    api::router,
    auth::{SessionClaims, SigningKey},
    state::AppState,
};
use tower::ServiceExt;

const KEY: &str = "integration-signing-key";

fn app() -> Router {
    router(AppState::in_memory(&SigningKey::new(KEY)))
}

async fn post(app: &Router, uri: &str, json: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn register_login_reject_duplicate() {
    let app = app();

    let response = post(
        &app,
        "/signup",
        r#"{"username":"alice01","password":"p@ss","age":30,"gender":"f"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post(&app, "/login", r#"{"username":"alice01","password":"p@ss"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = text(response).await;

    let claims = decode::<SessionClaims>(
        &token,
        &DecodingKey::from_secret(KEY.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .expect("token verifies with the configured key")
    .claims;
    assert_eq!(claims.username, "alice01");

    let response = post(&app, "/login", r#"{"username":"alice01","password":"wrong"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(text(response).await, "Wrong username or password");

    let response = post(&app, "/signup", r#"{"username":"alice01","password":"x"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await, "User already exists");
}

#[tokio::test]
async fn unknown_user_gets_same_answer_as_wrong_password() {
    let app = app();
    post(&app, "/signup", r#"{"username":"bob","password":"pw"}"#).await;

    let wrong_password = post(&app, "/login", r#"{"username":"bob","password":"nope"}"#).await;
    let unknown_user = post(&app, "/login", r#"{"username":"mallory","password":"pw"}"#).await;

    assert_eq!(wrong_password.status(), unknown_user.status());
    assert_eq!(text(wrong_password).await, text(unknown_user).await);
}

#[tokio::test]
async fn token_payload_uses_contract_claim_names() {
    let app = app();
    post(&app, "/signup", r#"{"username":"carol_9","password":"pw"}"#).await;
    let token = text(post(&app, "/login", r#"{"username":"carol_9","password":"pw"}"#).await).await;

    let payload_segment = token.split('.').nth(1).expect("payload segment");
    let payload: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload_segment).unwrap()).unwrap();

    let object = payload.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(payload["username"], "carol_9");
    assert!(payload["exp"].is_i64());
}

#[tokio::test]
async fn signup_rejects_bad_usernames_and_empty_fields() {
    let app = app();
    for body in [
        r#"{"username":"Upper","password":"pw"}"#,
        r#"{"username":"with space","password":"pw"}"#,
        r#"{"username":"sym!bol","password":"pw"}"#,
        r#"{"username":"","password":"pw"}"#,
        r#"{"username":"dave","password":""}"#,
        r#"{"password":"pw"}"#,
    ] {
        let response = post(&app, "/signup", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(text(response).await, "Invalid username or password");
    }
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let response = post(&app(), "/signup", "username=alice").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await, "Failed to parse JSON input from client");
}
