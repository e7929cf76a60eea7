//! Token verification seam consumed by the authorization gate.
//!
//! The gate only depends on this trait, not on the concrete JWT service:
//! - production wires `AuthService` (EdDSA JWT) behind `Arc<dyn TokenVerifier>`
//! - tests inject a stub and count handler invocations
//!
//! Failure contract:
//! - `detail` is for server logs only (may name claims, algorithms, ...)
//! - `reason` / `status` are what a client may see; when absent the gate
//!   falls back to "Authentication failed" / 401.

use axum::http::StatusCode;
use uuid::Uuid;

/// Identity resolved from a verified credential.
///
/// `role` stays a raw string here: unknown values must flow through to the
/// role gate, which treats them as "not a member" of any allow-list.
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub role: String,
    pub jti: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("{detail}")]
pub struct VerifyError {
    /// Internal description, surfaced only via tracing.
    detail: String,
    /// Client-facing reason, if the verifier wants to expose one.
    reason: Option<String>,
    /// Suggested HTTP status; the gate defaults to 401.
    status: Option<StatusCode>,
}

impl VerifyError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            reason: None,
            status: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

/// Credential verification collaborator.
///
/// Implementations must be cheap to call concurrently; the gate performs
/// exactly one call per request and no retries.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<VerifiedAccessToken, VerifyError>;
}
