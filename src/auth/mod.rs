// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Account registration and login for the Relational Auth API.
//!
//! ## Auth Flow
//!
//! 1. Client registers with `POST /signup` (`username`, `password`, `age`, `gender`)
//! 2. Client logs in with `POST /login`
//! 3. Server:
//!    - Looks up the username in the credential store
//!    - Compares the supplied password with the stored one
//!    - Issues an HS256 token with `username` and `exp` claims
//! 4. Client sends `Authorization: Bearer <token>` to downstream services
//!
//! ## Security
//!
//! - Tokens expire 24 hours after issue
//! - The signing key is injected configuration, fixed for the process lifetime
//! - Login failures never reveal whether the username exists

pub mod claims;
pub mod error;
pub mod service;
pub mod token;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use service::AuthService;
pub use token::{SigningKey, TokenIssuer};
