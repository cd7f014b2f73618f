//! Lock-free rotation of the primitive behind long-lived handles.

use crate::claims::Claims;
use crate::error::JwtError;
use crate::token::JwtMac;
use crate::validator::Validator;
use arc_swap::ArcSwap;
use signet_core::Keyset;
use std::sync::Arc;

/// A shareable handle whose underlying [`JwtMac`] can be swapped atomically.
///
/// Every sign or verify call loads the current snapshot once and runs
/// entirely against it; [`RotatingJwtMac::install`] publishes a new
/// snapshot without blocking readers, so in-flight operations finish
/// against the fully consistent view they started with.
#[derive(Clone)]
pub struct RotatingJwtMac {
    current: Arc<ArcSwap<JwtMac>>,
}

impl RotatingJwtMac {
    /// Create a handle over the initial keyset snapshot.
    pub fn new(keyset: &Keyset) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(JwtMac::new(keyset))),
        }
    }

    /// Build a primitive from a rotated keyset and swap it in.
    pub fn install(&self, keyset: &Keyset) {
        self.current.store(Arc::new(JwtMac::new(keyset)));
        tracing::debug!(
            primary_key_id = keyset.primary_key_id(),
            keys = keyset.keys().len(),
            "installed rotated keyset"
        );
    }

    /// The current snapshot, pinned for as long as the caller holds it.
    pub fn current(&self) -> Arc<JwtMac> {
        self.current.load_full()
    }

    /// Sign against the current snapshot.
    pub fn compute_and_encode(&self, claims: &Claims) -> Result<String, JwtError> {
        self.current.load().compute_and_encode(claims)
    }

    /// Verify against the current snapshot.
    pub fn verify_and_decode(
        &self,
        token: &str,
        validator: &Validator,
    ) -> Result<Claims, JwtError> {
        self.current.load().verify_and_decode(token, validator)
    }
}
