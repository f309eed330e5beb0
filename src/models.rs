// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the credential record persisted in the store and the
//! request bodies accepted by the HTTP API. Request types derive `ToSchema`
//! for OpenAPI documentation.
//!
//! Missing JSON fields decode to their defaults (empty strings, no age), so a
//! body without a username is rejected by validation rather than by the JSON
//! decoder.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Credential Record
// =============================================================================

/// A registered account as stored in the credential store.
///
/// The username doubles as the document identifier. The password is stored
/// exactly as supplied at signup.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identity key (`[a-z0-9_]+`).
    pub username: String,
    /// Password as supplied at signup.
    pub password: String,
    /// Age in years (not validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    /// Free-form gender (not validated).
    #[serde(default)]
    pub gender: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("age", &self.age)
            .field("gender", &self.gender)
            .finish()
    }
}

impl From<SignupRequest> for User {
    fn from(request: SignupRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            age: request.age,
            gender: request.gender,
        }
    }
}

// =============================================================================
// Request Models
// =============================================================================

/// Request body for `POST /signup`.
#[derive(Debug, Clone, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SignupRequest {
    /// Lowercase letters, digits and underscores only.
    #[serde(default)]
    pub username: String,
    /// Must not be empty.
    #[serde(default)]
    pub password: String,
    /// Optional age in years.
    #[serde(default)]
    pub age: Option<i64>,
    /// Optional free-form gender.
    #[serde(default)]
    pub gender: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
