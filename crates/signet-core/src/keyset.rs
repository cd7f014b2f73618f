//! Keysets: ordered rotation history with one designated primary key.

use crate::error::KeyError;
use crate::key::{HmacKey, KeyStatus, OutputPrefixType};
use std::collections::HashSet;

/// An immutable keyset snapshot.
///
/// Key order is rotation history. The primary key id must name a member of
/// the set; it designates which key signs. A primary that names a disabled
/// member is tolerated here and surfaces as a sign-time failure, so that a
/// verify-only keyset remains constructible.
#[derive(Debug, Clone)]
pub struct Keyset {
    keys: Vec<HmacKey>,
    primary_key_id: u32,
}

impl Keyset {
    /// Build a keyset, validating its structural invariants.
    ///
    /// Fails with [`KeyError::InvalidKeyset`] on duplicate key ids or a
    /// primary id that names no member.
    pub fn new(keys: Vec<HmacKey>, primary_key_id: u32) -> Result<Self, KeyError> {
        let mut seen = HashSet::new();
        for key in &keys {
            if !seen.insert(key.key_id()) {
                return Err(KeyError::InvalidKeyset(format!(
                    "duplicate key id {}",
                    key.key_id()
                )));
            }
        }
        if !seen.contains(&primary_key_id) {
            return Err(KeyError::InvalidKeyset(format!(
                "primary key id {primary_key_id} is not in the keyset"
            )));
        }
        Ok(Self {
            keys,
            primary_key_id,
        })
    }

    pub fn keys(&self) -> &[HmacKey] {
        &self.keys
    }

    pub fn primary_key_id(&self) -> u32 {
        self.primary_key_id
    }

    /// The primary member, regardless of its status.
    pub fn primary(&self) -> Option<&HmacKey> {
        self.keys.iter().find(|k| k.key_id() == self.primary_key_id)
    }
}

/// Builder producing keyset snapshots during rotation.
///
/// The builder itself is mutable; every [`KeysetBuilder::build`] call
/// produces an independent immutable snapshot, so a rotation sequence is a
/// series of builds, not an edit of a live keyset.
#[derive(Debug, Default)]
pub struct KeysetBuilder {
    keys: Vec<HmacKey>,
    primary_key_id: Option<u32>,
}

impl KeysetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing key.
    pub fn add_key(&mut self, key: HmacKey) -> Result<(), KeyError> {
        if self.keys.iter().any(|k| k.key_id() == key.key_id()) {
            return Err(KeyError::InvalidKeyset(format!(
                "duplicate key id {}",
                key.key_id()
            )));
        }
        self.keys.push(key);
        Ok(())
    }

    /// Generate a fresh enabled key with a random unused id; returns the id.
    pub fn generate_key(&mut self, prefix: OutputPrefixType) -> Result<u32, KeyError> {
        let key_id = self.unused_key_id();
        let key = HmacKey::generate(key_id, KeyStatus::Enabled, prefix)?;
        self.keys.push(key);
        Ok(key_id)
    }

    /// Designate which key signs in snapshots built from here on.
    pub fn set_primary(&mut self, key_id: u32) -> Result<(), KeyError> {
        if !self.keys.iter().any(|k| k.key_id() == key_id) {
            return Err(KeyError::InvalidKeyset(format!(
                "cannot promote unknown key id {key_id}"
            )));
        }
        self.primary_key_id = Some(key_id);
        Ok(())
    }

    /// Retire a key: it stops verifying in snapshots built from here on.
    pub fn disable_key(&mut self, key_id: u32) -> Result<(), KeyError> {
        self.set_status(key_id, KeyStatus::Disabled)
    }

    /// Re-activate a previously disabled key.
    pub fn enable_key(&mut self, key_id: u32) -> Result<(), KeyError> {
        self.set_status(key_id, KeyStatus::Enabled)
    }

    /// Produce an immutable snapshot of the current state.
    pub fn build(&self) -> Result<Keyset, KeyError> {
        let primary_key_id = self.primary_key_id.ok_or_else(|| {
            KeyError::InvalidKeyset("no primary key id has been set".to_string())
        })?;
        Keyset::new(self.keys.clone(), primary_key_id)
    }

    fn set_status(&mut self, key_id: u32, status: KeyStatus) -> Result<(), KeyError> {
        let key = self
            .keys
            .iter_mut()
            .find(|k| k.key_id() == key_id)
            .ok_or_else(|| {
                KeyError::InvalidKeyset(format!("cannot change status of unknown key id {key_id}"))
            })?;
        *key = key.with_status(status);
        Ok(())
    }

    fn unused_key_id(&self) -> u32 {
        loop {
            let candidate = rand::random::<u32>();
            if candidate != 0 && !self.keys.iter().any(|k| k.key_id() == candidate) {
                return candidate;
            }
        }
    }
}
