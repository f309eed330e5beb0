// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration and credential verification.
//!
//! ## Request Lifecycle
//!
//! ```text
//! Received -> Validated -> StoreConsulted -> Completed | Rejected
//! ```
//!
//! Nothing is carried between requests. The service holds no records; every
//! call goes to the [`CredentialStore`].
//!
//! ## Known Weakness
//!
//! Passwords are stored and compared as plain strings. Hashing policy is
//! outside this service; see DESIGN.md.

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;

use super::{AuthError, SessionClaims, TokenIssuer};
use crate::models::User;
use crate::storage::CredentialStore;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("username pattern is valid"));

/// Signup and login over a credential store.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// The backing credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Register a new account.
    ///
    /// Input is validated before the store is contacted. A username that is
    /// already registered fails with [`AuthError::DuplicateAccount`], whether
    /// the pre-check sees it or the store rejects the create-only insert.
    pub async fn register_user(&self, user: User) -> Result<(), AuthError> {
        validate_signup(&user)?;

        let exists = self
            .store
            .exists_by_username(&user.username)
            .await
            .map_err(|e| self.store_failure("exists_by_username", e.into()))?;

        if exists {
            tracing::debug!(username = %user.username, "Signup rejected: username taken");
            return Err(AuthError::DuplicateAccount);
        }

        match self.store.insert_user(&user).await.map_err(AuthError::from) {
            Ok(()) => {}
            Err(AuthError::DuplicateAccount) => {
                tracing::debug!(username = %user.username, "Signup lost create race");
                return Err(AuthError::DuplicateAccount);
            }
            Err(e) => return Err(self.store_failure("insert_user", e)),
        }

        tracing::info!(username = %user.username, "User registered");
        Ok(())
    }

    /// Verify credentials and return a signed session token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let candidates = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| self.store_failure("find_by_username", e.into()))?;

        let Some(user) = candidates
            .iter()
            .find(|u| u.username == username && u.password == password)
        else {
            tracing::debug!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let claims = SessionClaims::new(&user.username, Utc::now());
        let token = self.tokens.sign(&claims).inspect_err(|e| {
            tracing::error!(username = %user.username, error = %e, "Token signing failed");
        })?;

        tracing::info!(
            username = %user.username,
            expires_at = claims.expires_at,
            "Login succeeded"
        );
        Ok(token)
    }

    fn store_failure(&self, operation: &'static str, err: AuthError) -> AuthError {
        if let AuthError::StoreUnavailable(ref cause) = err {
            tracing::error!(
                backend = self.store.backend_name(),
                operation,
                error = %cause,
                "Credential store call failed"
            );
        }
        err
    }
}

fn validate_signup(user: &User) -> Result<(), AuthError> {
    if user.username.is_empty() {
        return Err(AuthError::InvalidInput("username is empty"));
    }
    if user.password.is_empty() {
        return Err(AuthError::InvalidInput("password is empty"));
    }
    if !USERNAME_PATTERN.is_match(&user.username) {
        return Err(AuthError::InvalidInput(
            "username must contain only lowercase letters, digits and underscores",
        ));
    }
    Ok(())
}
