//! Error types for the key model.

use thiserror::Error;

/// Errors raised while constructing keys and keysets.
///
/// These are configuration errors: they surface before any token is
/// processed, never in response to adversarial input.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The key's output prefix type cannot decorate tokenized output.
    #[error("unsupported output prefix type for token keys: {0}")]
    UnsupportedKeyFormat(String),

    /// The keyset violates a structural invariant.
    #[error("invalid keyset: {0}")]
    InvalidKeyset(String),

    /// The key material cannot be used with HMAC-SHA256.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
}
