//! The JWT MAC primitive: compute-and-encode, verify-and-decode.

use crate::claims::Claims;
use crate::error::JwtError;
use crate::format;
use crate::primitive_set::PrimitiveSet;
use crate::validator::Validator;
use signet_core::{HmacSha256, Keyset};

/// A keyset-backed MAC primitive for signed compact tokens.
///
/// Immutable after construction: all state is resolved from the keyset
/// snapshot up front, so a `JwtMac` can be shared freely across concurrent
/// signers and verifiers. Rotation means building a new `JwtMac` from a new
/// keyset snapshot (see [`crate::rotation::RotatingJwtMac`]).
#[derive(Debug)]
pub struct JwtMac {
    primitives: PrimitiveSet,
}

impl JwtMac {
    /// Resolve a keyset snapshot into a ready-to-use primitive.
    ///
    /// Succeeds even when the keyset has zero enabled keys; such a
    /// primitive verifies nothing and fails at sign time, which lets a
    /// verify-only deployment construct its side before any signing need
    /// is known.
    pub fn new(keyset: &Keyset) -> Self {
        let primitives = PrimitiveSet::resolve(keyset);
        tracing::debug!(
            enabled = primitives.enabled_len(),
            indexed = primitives.indexed_len(),
            can_sign = primitives.signing().is_some(),
            "resolved keyset into jwt mac primitive"
        );
        Self { primitives }
    }

    /// Sign claims with the primary key and return the compact token.
    ///
    /// Fails with [`JwtError::NoUsablePrimaryKey`] if the primary key is
    /// absent or not enabled.
    pub fn compute_and_encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let entry = self
            .primitives
            .signing()
            .ok_or(JwtError::NoUsablePrimaryKey)?;
        // Snapshots are immutable, but a stale set misused after rotation
        // must still refuse to sign with a retired key.
        if !entry.key().is_enabled() {
            return Err(JwtError::NoUsablePrimaryKey);
        }

        let header = format::build_header(entry.key());
        let payload = claims.encode()?;
        let unsigned = format::unsigned_compact(&header, &payload);
        let tag = HmacSha256::compute(entry.key().material(), unsigned.as_bytes())?;
        Ok(format::create_signed_compact(&unsigned, &tag))
    }

    /// Verify a compact token against every enabled key and decode its
    /// claims.
    ///
    /// The header's `kid` only orders the candidate keys; acceptance is a
    /// pure OR over all enabled keys, independent of which key is primary.
    /// When no key's tag matches, the error is an undifferentiated
    /// [`JwtError::VerificationFailed`]: revealing which key came close
    /// would hand probers an oracle into the keyset.
    pub fn verify_and_decode(
        &self,
        token: &str,
        validator: &Validator,
    ) -> Result<Claims, JwtError> {
        let split = format::split_signed_compact(token)?;
        let kid = format::header_kid(&split.header);

        for entry in self.primitives.candidates(kid) {
            let verified =
                HmacSha256::verify(entry.key().material(), &split.unsigned, &split.tag);
            if matches!(verified, Ok(true)) {
                let claims = Claims::decode(&split.payload)?;
                validator.validate(&claims)?;
                return Ok(claims);
            }
        }
        Err(JwtError::VerificationFailed)
    }
}
