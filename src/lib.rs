// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Auth - Credential Store & Session Token Service
//!
//! This crate registers accounts in a search-indexed credential store and
//! exchanges valid credentials for signed session tokens.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Signup/login service and HS256 token issuance
//! - `storage` - Credential store adapters (Elasticsearch, in-memory)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
