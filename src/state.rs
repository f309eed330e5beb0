// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthService, SigningKey, TokenIssuer};
use crate::storage::{CredentialStore, InMemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, signing_key: &SigningKey) -> Self {
        Self {
            auth: Arc::new(AuthService::new(store, TokenIssuer::new(signing_key))),
        }
    }

    /// State over an empty in-memory store.
    pub fn in_memory(signing_key: &SigningKey) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), signing_key)
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        self.auth.store()
    }
}
