//! JWT identity module.
//!
//! Issues identity tokens on registration and login, and turns a token back
//! into an [`Identity`] on every gated request.
//!
//! ## Token Format
//! ```text
//! HS256( { "sub": "<user id>", "isAdmin": false, "iat": 1767225600, "exp": 1767312000 } )
//! ```
//! `exp` is mandatory. Verification is a pure function of the token and
//! the signing secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reel_core::{CoreError, Identity};
use serde::{Deserialize, Serialize};

/// Identity token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    #[serde(rename = "isAdmin")]
    pub is_admin: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token on the request.
    #[error("No token provided")]
    Unauthenticated,

    /// Malformed, expired, or signed with another key.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for CoreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => CoreError::AuthenticationRequired,
            AuthError::InvalidToken(_) => CoreError::MalformedCredentials,
            AuthError::Signing(msg) => CoreError::internal(msg),
        }
    }
}

/// Signs and verifies identity tokens with one process-wide secret.
pub struct IdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

impl IdentityVerifier {
    /// Create a verifier for `secret`, issuing tokens valid for `lifetime_secs`.
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        IdentityVerifier {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_secs,
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user_id: &str, is_admin: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            is_admin,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Decode a token into the caller's identity.
    ///
    /// ## Returns
    /// * `Err(Unauthenticated)` - empty token
    /// * `Err(InvalidToken)` - structurally invalid, expired, or bad signature
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(Identity {
            user_id: data.claims.sub,
            is_admin: data.claims.is_admin,
        })
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}
