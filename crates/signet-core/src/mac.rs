//! HMAC-SHA256 tag computation and constant-time verification.

use crate::error::KeyError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Size of an HMAC-SHA256 tag in bytes.
pub const TAG_SIZE: usize = 32;

/// The HMAC-SHA256 algorithm used over `header.payload` token contents.
pub struct HmacSha256;

impl HmacSha256 {
    /// Compute the tag for a message.
    pub fn compute(material: &[u8], message: &[u8]) -> Result<Vec<u8>, KeyError> {
        let mut mac = <Hmac<Sha256>>::new_from_slice(material)
            .map_err(|e| KeyError::InvalidKeyMaterial(e.to_string()))?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Check a tag against a message.
    ///
    /// The comparison runs in constant time; a generic `==` over the tag
    /// bytes would short-circuit and leak timing.
    pub fn verify(material: &[u8], message: &[u8], tag: &[u8]) -> Result<bool, KeyError> {
        let mut mac = <Hmac<Sha256>>::new_from_slice(material)
            .map_err(|e| KeyError::InvalidKeyMaterial(e.to_string()))?;
        mac.update(message);
        Ok(mac.verify_slice(tag).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_and_verify_roundtrip() {
        let material = [0xabu8; 32];
        let tag = HmacSha256::compute(&material, b"message").unwrap();
        assert_eq!(tag.len(), TAG_SIZE);
        assert!(HmacSha256::verify(&material, b"message", &tag).unwrap());
    }

    #[test]
    fn tampered_message_fails() {
        let material = [0xabu8; 32];
        let tag = HmacSha256::compute(&material, b"message").unwrap();
        assert!(!HmacSha256::verify(&material, b"messagE", &tag).unwrap());
    }

    #[test]
    fn wrong_key_fails() {
        let tag = HmacSha256::compute(&[0xabu8; 32], b"message").unwrap();
        assert!(!HmacSha256::verify(&[0xcdu8; 32], b"message", &tag).unwrap());
    }

    #[test]
    fn truncated_tag_fails() {
        let material = [0xabu8; 32];
        let tag = HmacSha256::compute(&material, b"message").unwrap();
        assert!(!HmacSha256::verify(&material, b"message", &tag[..16]).unwrap());
    }

    // RFC 4231 test case 2.
    #[test]
    fn known_answer_vector() {
        let tag = HmacSha256::compute(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
