//! Error types for the JWT MAC primitive.

use signet_core::KeyError;
use thiserror::Error;

/// Errors that can occur while signing or verifying tokens.
///
/// [`JwtError::VerificationFailed`] deliberately carries no payload: which
/// key almost matched, and why, must stay invisible to callers handling
/// adversarial tokens. Every other variant reflects configuration or
/// structural problems and may carry diagnostic detail.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Key or keyset construction failed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The token is not a well-formed three-segment compact serialization.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// No enabled primary key is available to sign with.
    #[error("no usable primary key in the keyset")]
    NoUsablePrimaryKey,

    /// No enabled key's tag matched the token.
    #[error("token verification failed")]
    VerificationFailed,

    /// The token's MAC is valid but the validator rejected its claims.
    #[error("claims rejected: {reason}")]
    ClaimsRejected { reason: String },

    /// The payload segment does not decode into a claims object.
    #[error("invalid claims payload: {0}")]
    InvalidClaims(String),
}
