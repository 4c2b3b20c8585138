//! Credential guards for the protected playground endpoints.
//!
//! Both guards compare a request header against a shared secret taken from
//! configuration. Neither performs any real credential management.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

/// Header carrying the API key for write access to users.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Why a guard refused a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was supplied.
    #[error("missing {0}")]
    Missing(&'static str),
    /// A credential was supplied but does not match.
    #[error("invalid {0}")]
    Mismatch(&'static str),
}

/// Checks `Authorization: Bearer <token>` against a fixed token.
#[derive(Debug, Clone)]
pub struct BearerGuard {
    token: String,
}

impl BearerGuard {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Absent header is [`AuthError::Missing`]; anything other than the exact
    /// `Bearer <token>` value is [`AuthError::Mismatch`].
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::Missing("authorization header"))?;

        let presented = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "));

        match presented {
            Some(token) if token == self.token => Ok(()),
            _ => {
                tracing::warn!(target: "playground-authz", "bearer token rejected");
                Err(AuthError::Mismatch("bearer token"))
            }
        }
    }
}

/// Checks the `X-API-Key` header against a fixed key.
#[derive(Debug, Clone)]
pub struct ApiKeyGuard {
    key: String,
}

impl ApiKeyGuard {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers
            .get(API_KEY_HEADER)
            .ok_or(AuthError::Missing("API key"))?;

        if header.to_str().ok() == Some(self.key.as_str()) {
            Ok(())
        } else {
            tracing::warn!(target: "playground-authz", "api key rejected");
            Err(AuthError::Mismatch("API key"))
        }
    }
}
