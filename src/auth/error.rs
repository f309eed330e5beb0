// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::http::StatusCode;

use crate::storage::StoreError;

/// Failure kinds for signup and login.
///
/// Callers branch on the variant, never on the rendered message.
/// `InvalidCredentials` deliberately covers both an unknown username and a
/// wrong password.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Empty field or a username outside `[a-z0-9_]+`
    #[error("Invalid username or password")]
    InvalidInput(&'static str),

    /// An account with this username is already registered
    #[error("User already exists")]
    DuplicateAccount,

    /// No stored record matches both username and password
    #[error("Wrong username or password")]
    InvalidCredentials,

    /// The credential store could not be reached or queried
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// The session token could not be signed
    #[error("Failed to generate token: {0}")]
    TokenSigning(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            // The store's create-only write is the authoritative duplicate signal
            StoreError::AlreadyExists(_) => AuthError::DuplicateAccount,
            other => AuthError::StoreUnavailable(other),
        }
    }
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "invalid_input",
            AuthError::DuplicateAccount => "duplicate_account",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::StoreUnavailable(_) => "store_unavailable",
            AuthError::TokenSigning(_) => "token_signing",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) | AuthError::DuplicateAccount => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_) | AuthError::TokenSigning(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
