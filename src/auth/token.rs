// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 session token signing.
//!
//! The signing key is resolved once at startup and handed to
//! [`TokenIssuer::new`]. There is no process-wide key.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use super::{AuthError, SessionClaims};

/// Symmetric secret used to sign session tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey(<{} bytes>)", self.0.len())
    }
}

/// Signs [`SessionClaims`] into compact JWTs.
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(key: &SigningKey) -> Self {
        Self {
            header: Header::new(Algorithm::HS256),
            key: EncodingKey::from_secret(key.as_bytes()),
        }
    }

    /// Sign the claims.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&self.header, claims, &self.key).map_err(|e| AuthError::TokenSigning(e.to_string()))
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("alg", &self.header.alg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn claims() -> SessionClaims {
        SessionClaims {
            username: "alice01".into(),
            expires_at: chrono::Utc::now().timestamp() + 3600,
        }
    }

    #[test]
    fn signed_token_verifies_with_same_key() {
        let key = SigningKey::new("secret");
        let token = TokenIssuer::new(&key).sign(&claims()).unwrap();

        let decoded = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(key.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(decoded.claims.username, "alice01");
    }

    #[test]
    fn signed_token_rejects_other_key() {
        let token = TokenIssuer::new(&SigningKey::new("secret"))
            .sign(&claims())
            .unwrap();

        let result = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[test]
    fn header_declares_hs256() {
        let token = TokenIssuer::new(&SigningKey::new("secret"))
            .sign(&claims())
            .unwrap();
        let header_segment = token.split('.').next().unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_segment).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
    }

    #[test]
    fn debug_output_hides_secret() {
        let key = SigningKey::new("super-secret-value");
        assert_eq!(format!("{key:?}"), "SigningKey(<18 bytes>)");
    }
}
