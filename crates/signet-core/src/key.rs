//! Versioned HMAC keys.

use crate::error::KeyError;
use rand::RngCore;
use std::fmt;

/// Minimum HMAC-SHA256 key size in bytes.
pub const MIN_KEY_SIZE: usize = 32;

/// Lifecycle status of a key within a keyset.
///
/// Only `Enabled` keys participate in signing or verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Enabled,
    Disabled,
    Destroyed,
}

/// Controls how a key's use decorates token output.
///
/// `Raw` keys produce bare tokens that look identical to unversioned ones;
/// `Tink` keys self-identify through the header's `kid` field. `Legacy` and
/// `Crunchy` exist only for non-token MAC compatibility and are rejected at
/// key construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputPrefixType {
    Raw,
    Tink,
    Legacy,
    Crunchy,
}

/// An immutable versioned HMAC-SHA256 key.
///
/// The key id is unique within a keyset. An operator-chosen `custom_kid`,
/// when present, is used verbatim wherever a header identifier is needed,
/// regardless of the prefix type.
#[derive(Clone)]
pub struct HmacKey {
    key_id: u32,
    material: Vec<u8>,
    status: KeyStatus,
    prefix: OutputPrefixType,
    custom_kid: Option<String>,
}

impl HmacKey {
    /// Create a key from existing material.
    ///
    /// Fails with [`KeyError::UnsupportedKeyFormat`] for the `Legacy` and
    /// `Crunchy` prefix types, and with [`KeyError::InvalidKeyMaterial`] if
    /// the material is shorter than [`MIN_KEY_SIZE`].
    pub fn new(
        key_id: u32,
        material: Vec<u8>,
        status: KeyStatus,
        prefix: OutputPrefixType,
    ) -> Result<Self, KeyError> {
        match prefix {
            OutputPrefixType::Raw | OutputPrefixType::Tink => {}
            OutputPrefixType::Legacy | OutputPrefixType::Crunchy => {
                return Err(KeyError::UnsupportedKeyFormat(format!("{prefix:?}")));
            }
        }
        if material.len() < MIN_KEY_SIZE {
            return Err(KeyError::InvalidKeyMaterial(format!(
                "key material must be at least {MIN_KEY_SIZE} bytes, got {}",
                material.len()
            )));
        }
        Ok(Self {
            key_id,
            material,
            status,
            prefix,
            custom_kid: None,
        })
    }

    /// Generate a key with fresh random material.
    pub fn generate(
        key_id: u32,
        status: KeyStatus,
        prefix: OutputPrefixType,
    ) -> Result<Self, KeyError> {
        let mut material = vec![0u8; MIN_KEY_SIZE];
        rand::rng().fill_bytes(&mut material);
        Self::new(key_id, material, status, prefix)
    }

    /// Attach an operator-chosen header identifier.
    #[must_use]
    pub fn with_custom_kid(mut self, kid: impl Into<String>) -> Self {
        self.custom_kid = Some(kid.into());
        self
    }

    /// Copy this key with a different status (used by the keyset builder).
    pub(crate) fn with_status(&self, status: KeyStatus) -> Self {
        let mut key = self.clone();
        key.status = status;
        key
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn material(&self) -> &[u8] {
        &self.material
    }

    pub fn status(&self) -> KeyStatus {
        self.status
    }

    pub fn prefix(&self) -> OutputPrefixType {
        self.prefix
    }

    pub fn custom_kid(&self) -> Option<&str> {
        self.custom_kid.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.status == KeyStatus::Enabled
    }
}

// Key material never appears in debug output or logs.
impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("prefix", &self.prefix)
            .field("custom_kid", &self.custom_kid)
            .finish_non_exhaustive()
    }
}
