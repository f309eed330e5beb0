// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session lifetime in hours.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Claims carried by an issued session token.
///
/// Claim names are part of the external contract: any service verifying
/// these tokens expects `username` and `exp` (unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Authenticated subject
    pub username: String,

    /// Expiration timestamp
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl SessionClaims {
    /// Claims for `username` expiring one session lifetime after `issued_at`.
    pub fn new(username: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            expires_at: (issued_at + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_one_day_after_issue() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = SessionClaims::new("alice01", issued_at);
        assert_eq!(claims.expires_at, 1_700_000_000 + 86_400);
    }

    #[test]
    fn serializes_with_contract_claim_names() {
        let claims = SessionClaims {
            username: "alice01".into(),
            expires_at: 1_700_086_400,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "username": "alice01", "exp": 1_700_086_400 })
        );
    }
}
