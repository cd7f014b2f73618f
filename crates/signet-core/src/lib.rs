//! # signet-core
//!
//! Versioned key and keyset model for Signet's keyset-backed JWT MAC.
//!
//! This crate provides:
//! - Immutable versioned HMAC keys with a status and an output prefix type
//! - Keysets: an ordered rotation history of keys with one designated primary
//! - A builder for producing keyset snapshots during rotation
//! - The HMAC-SHA256 algorithm used to tag and verify token contents
//!
//! ## Rotation Model
//!
//! A `Keyset` is an immutable snapshot. Rotation never mutates a keyset in
//! use; the `KeysetBuilder` produces a fresh snapshot for each step:
//!
//! | Step | Builder call | Effect on next snapshot |
//! |------|--------------|-------------------------|
//! | Introduce key | `generate_key` | New key verifies, old key still signs |
//! | Promote key | `set_primary` | New key signs, old key still verifies |
//! | Retire key | `disable_key` | Old key no longer verifies |
//!
//! Tokens signed under any snapshot keep verifying as long as some later
//! snapshot still carries the signing key in `Enabled` status.

pub mod error;
pub mod key;
pub mod keyset;
pub mod mac;

pub use error::KeyError;
pub use key::{HmacKey, KeyStatus, OutputPrefixType, MIN_KEY_SIZE};
pub use keyset::{Keyset, KeysetBuilder};
pub use mac::HmacSha256;
