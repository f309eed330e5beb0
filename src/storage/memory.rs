// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory credential store.
//!
//! Used when no Elasticsearch cluster is configured (development mode) and by
//! tests. Records live only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialStore, StoreError, StoreResult};
use crate::models::User;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned().into_iter().collect())
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::AlreadyExists(format!("User {}", user.username)));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
