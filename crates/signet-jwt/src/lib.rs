//! # signet-jwt
//!
//! Keyset-backed JWT MAC primitive for Signet.
//!
//! This crate provides functionality for:
//! - Signing claims into compact `header.payload.signature` tokens with a
//!   keyset's primary key
//! - Verifying tokens against every enabled key in the keyset, so rotation
//!   never breaks in-flight tokens
//! - Validating claims (issuer, audience, expiry) after the MAC checks out
//! - Swapping rotated keysets atomically under live traffic
//!
//! ## Verification Semantics
//!
//! The header's `kid` field is advisory. It orders the candidate keys for
//! lookup efficiency but never gates acceptance: a token verifies if any
//! enabled key's tag matches, regardless of what its header claims about
//! the key. Failed verification reports a single undifferentiated error to
//! avoid acting as an oracle over the keyset.
//!
//! ## Example
//!
//! ```
//! use signet_core::{KeysetBuilder, OutputPrefixType};
//! use signet_jwt::{Claims, JwtMac, Validator};
//!
//! let mut builder = KeysetBuilder::new();
//! let key_id = builder.generate_key(OutputPrefixType::Tink)?;
//! builder.set_primary(key_id)?;
//! let jwt_mac = JwtMac::new(&builder.build()?);
//!
//! let claims = Claims::new().with_issuer("example");
//! let token = jwt_mac.compute_and_encode(&claims)?;
//!
//! let validator = Validator::new()
//!     .expect_issuer("example")
//!     .allow_missing_expiration();
//! let verified = jwt_mac.verify_and_decode(&token, &validator)?;
//! assert_eq!(verified.issuer.as_deref(), Some("example"));
//! # Ok::<(), signet_jwt::JwtError>(())
//! ```

pub mod claims;
pub mod error;
pub mod format;
mod primitive_set;
pub mod rotation;
pub mod token;
pub mod validator;

pub use claims::Claims;
pub use error::JwtError;
pub use rotation::RotatingJwtMac;
pub use token::JwtMac;
pub use validator::Validator;
