// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Credential Storage Module
//!
//! This module owns every persisted [`User`] record. The rest of the service
//! talks to it only through the [`CredentialStore`] trait.
//!
//! ## Backends
//!
//! - [`ElasticStore`] - Elasticsearch REST API (production)
//! - [`InMemoryStore`] - process-local map (development mode and tests)
//!
//! ## Write Semantics
//!
//! Records are keyed by username. Inserts are create-only: writing a username
//! that already exists fails with [`StoreError::AlreadyExists`] instead of
//! overwriting the stored credentials. Inserts are visible to the very next
//! query (Elasticsearch `refresh=wait_for`).

pub mod elastic;
pub mod memory;

use async_trait::async_trait;

use crate::models::User;

pub use elastic::{ElasticConfig, ElasticStore};
pub use memory::InMemoryStore;

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the request
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// A record with the same username is already stored
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The store answered with something we could not interpret
    #[error("credential store response was invalid: {0}")]
    InvalidResponse(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup and write access to persisted credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact-match lookup on `username`.
    ///
    /// Normally yields zero or one record. Callers must still cope with
    /// several hits; the store does not enforce uniqueness on reads.
    async fn find_by_username(&self, username: &str) -> StoreResult<Vec<User>>;

    /// Whether the exact-match lookup on `username` has any hit.
    async fn exists_by_username(&self, username: &str) -> StoreResult<bool>;

    /// Create a record keyed by its username, visible to subsequent queries
    /// once this returns.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
