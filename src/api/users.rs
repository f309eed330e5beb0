// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup and login endpoints.
//!
//! Both endpoints take a JSON body and answer in plain text: a confirmation
//! for signup, the bare session token for login.

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    auth::AuthError,
    error::ApiError,
    models::{LoginRequest, SignupRequest},
    state::AppState,
};

pub const SIGNUP_OK: &str = "User added successfully.";
const PARSE_FAILED: &str = "Failed to parse JSON input from client";
const SAVE_FAILED: &str = "Failed to save to credential store";
const READ_FAILED: &str = "Failed to read from credential store";
const TOKEN_FAILED: &str = "Failed to generate token";

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed body, invalid username/password, or username taken", body = String, content_type = "text/plain"),
        (status = 500, description = "Credential store unavailable", body = String, content_type = "text/plain"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let request: SignupRequest = parse_body(&body)?;

    state
        .auth
        .register_user(request.into())
        .await
        .map_err(|err| {
            if let AuthError::InvalidInput(reason) = &err {
                tracing::debug!(reason, "Signup rejected");
            }
            match err {
                AuthError::StoreUnavailable(_) => ApiError::internal(SAVE_FAILED),
                other => ApiError::new(other.status_code(), other.to_string()),
            }
        })?;

    Ok((StatusCode::CREATED, SIGNUP_OK))
}

/// Exchange credentials for a session token.
///
/// The response body is the signed token itself.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed session token", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 401, description = "Wrong username or password", body = String, content_type = "text/plain"),
        (status = 500, description = "Credential store unavailable or signing failed", body = String, content_type = "text/plain"),
    )
)]
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<String, ApiError> {
    let request: LoginRequest = parse_body(&body)?;

    state
        .auth
        .authenticate(&request.username, &request.password)
        .await
        .map_err(|err| match err {
            AuthError::StoreUnavailable(_) => ApiError::internal(READ_FAILED),
            AuthError::TokenSigning(_) => ApiError::internal(TOKEN_FAILED),
            other => ApiError::new(other.status_code(), other.to_string()),
        })
}

/// Decode a JSON body regardless of the declared content type.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::bad_request(PARSE_FAILED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SigningKey;

    fn state() -> AppState {
        AppState::in_memory(&SigningKey::new("secret"))
    }

    fn body(json: &str) -> Bytes {
        Bytes::from(json.to_string())
    }

    #[tokio::test]
    async fn signup_success_returns_created() {
        let (status, message) = signup(
            State(state()),
            body(r#"{"username":"alice01","password":"p@ss","age":30,"gender":"f"}"#),
        )
        .await
        .expect("signup succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(message, SIGNUP_OK);
    }

    #[tokio::test]
    async fn signup_duplicate_is_bad_request() {
        let state = state();
        let payload = r#"{"username":"alice01","password":"p@ss"}"#;
        signup(State(state.clone()), body(payload)).await.unwrap();

        let err = signup(State(state), body(payload)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User already exists");
    }

    #[tokio::test]
    async fn signup_invalid_username_is_bad_request() {
        let err = signup(
            State(state()),
            body(r#"{"username":"Alice","password":"p@ss"}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid username or password");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = login(State(state()), body("{not json")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, PARSE_FAILED);
    }

    #[tokio::test]
    async fn login_returns_token_and_rejects_wrong_password() {
        let state = state();
        signup(
            State(state.clone()),
            body(r#"{"username":"bob","password":"pw"}"#),
        )
        .await
        .unwrap();

        let token = login(
            State(state.clone()),
            body(r#"{"username":"bob","password":"pw"}"#),
        )
        .await
        .expect("login succeeds");
        assert_eq!(token.split('.').count(), 3);

        let err = login(State(state), body(r#"{"username":"bob","password":"nope"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Wrong username or password");
    }
}
