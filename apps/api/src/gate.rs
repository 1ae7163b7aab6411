//! # Access Control Gate
//!
//! Every mutating route passes through here before any business logic runs.
//!
//! ```text
//!  request headers
//!        │
//!        ▼
//!  x-auth-token? ──no──► Authorization: Bearer? ──no──► (no token)
//!        │                       │
//!        └───────────┬───────────┘
//!                    ▼
//!        IdentityVerifier::verify
//!          │        │          │
//!     no token   invalid     Identity
//!          │        │          │
//!          ▼        ▼          ▼
//!        401      400     role check ──fail──► 403
//!                              │
//!                              ▼
//!                           handler
//! ```
//!
//! Authentication is always decided before the role. The extractors run
//! before the JSON body is parsed, so an anonymous request with a broken
//! body still gets "authentication required".

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, AUTHORIZATION};
use axum::http::request::Parts;
use reel_core::{CoreError, CoreResult, Identity, RequiredRole};
use tracing::warn;

use crate::auth::{AuthError, IdentityVerifier};
use crate::error::ApiError;
use crate::AppState;

/// Header carrying the identity token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Checks identity and role for gated operations.
#[derive(Debug, Clone)]
pub struct AccessGate {
    verifier: Arc<IdentityVerifier>,
}

impl AccessGate {
    pub fn new(verifier: Arc<IdentityVerifier>) -> Self {
        AccessGate { verifier }
    }

    /// The verifier, also used to issue tokens at login.
    pub fn verifier(&self) -> &IdentityVerifier {
        &self.verifier
    }

    /// Admits or rejects a caller.
    ///
    /// ## Returns
    /// * `Err(AuthenticationRequired)` - no token
    /// * `Err(MalformedCredentials)` - token present but invalid
    /// * `Err(InsufficientPrivilege)` - valid token, role not met
    pub fn authorize(&self, token: Option<&str>, role: RequiredRole) -> CoreResult<Identity> {
        let identity = self.verifier.verify(token.unwrap_or_default())?;

        if !role.permits(&identity) {
            return Err(CoreError::InsufficientPrivilege);
        }

        Ok(identity)
    }
}

/// Pulls the token from `x-auth-token`, falling back to a Bearer
/// `Authorization` header. Any other `Authorization` scheme is malformed.
pub fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        return value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::InvalidToken("non-ASCII token header".to_string()));
    }

    match headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| AuthError::InvalidToken("non-ASCII authorization header".to_string()))?;
            value
                .strip_prefix("Bearer ")
                .map(Some)
                .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))
        }
    }
}

fn admit(parts: &Parts, state: &AppState, role: RequiredRole) -> Result<Identity, ApiError> {
    let token = token_from_headers(&parts.headers).map_err(CoreError::from);
    let result = token.and_then(|token| state.gate.authorize(token, role));

    result.map_err(|err| {
        warn!(
            method = %parts.method,
            path = %parts.uri.path(),
            reason = %err,
            "Request rejected by access gate"
        );
        ApiError::from(err)
    })
}

// =============================================================================
// Extractors
// =============================================================================

/// Any authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        admit(parts, state, RequiredRole::Authenticated).map(AuthUser)
    }
}

/// An authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        admit(parts, state, RequiredRole::Admin).map(AdminUser)
    }
}
