//! Header construction and the three-segment compact serialization.
//!
//! Pure functions over the `header.payload.signature` compact form. Nothing
//! here judges cryptographic validity; the codec only enforces structure.

use crate::error::JwtError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};
use signet_core::{HmacKey, OutputPrefixType};

/// The only algorithm this primitive emits or accepts.
pub const ALGORITHM: &str = "HS256";

/// A structurally valid token, split into the parts verification needs.
#[derive(Debug)]
pub struct SplitToken {
    /// The exact `header.payload` bytes the MAC covers.
    pub unsigned: Vec<u8>,
    /// The parsed header object.
    pub header: Map<String, Value>,
    /// The decoded payload segment.
    pub payload: Vec<u8>,
    /// The decoded signature segment.
    pub tag: Vec<u8>,
}

/// Encode a numeric key id as a header identifier: base64url of the
/// big-endian 4-byte id. Reversible via [`decode_keyset_kid`].
pub fn keyset_kid(key_id: u32) -> String {
    URL_SAFE_NO_PAD.encode(key_id.to_be_bytes())
}

/// Recover a numeric key id from a header identifier produced by
/// [`keyset_kid`].
pub fn decode_keyset_kid(kid: &str) -> Option<u32> {
    let bytes = URL_SAFE_NO_PAD.decode(kid).ok()?;
    let bytes: [u8; 4] = bytes.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Build the header JSON for a signing key.
///
/// `Raw` keys omit `kid` unless the operator set a custom identifier, so
/// their tokens look identical to unversioned ones. `Tink` keys always
/// self-identify: the custom identifier when present, the encoded numeric
/// id otherwise.
pub fn build_header(key: &HmacKey) -> String {
    let mut header = Map::new();
    header.insert("alg".to_string(), Value::String(ALGORITHM.to_string()));
    let kid = match key.prefix() {
        OutputPrefixType::Raw => key.custom_kid().map(str::to_string),
        OutputPrefixType::Tink => Some(
            key.custom_kid()
                .map(str::to_string)
                .unwrap_or_else(|| keyset_kid(key.key_id())),
        ),
        // Rejected at key construction; no key with these prefixes exists.
        OutputPrefixType::Legacy | OutputPrefixType::Crunchy => None,
    };
    if let Some(kid) = kid {
        header.insert("kid".to_string(), Value::String(kid));
    }
    Value::Object(header).to_string()
}

/// The advisory `kid` field of a parsed header, if any.
pub fn header_kid(header: &Map<String, Value>) -> Option<&str> {
    header.get("kid").and_then(Value::as_str)
}

/// Join header and payload JSON into the bytes the MAC covers.
pub fn unsigned_compact(header_json: &str, payload_json: &str) -> String {
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(payload_json)
    )
}

/// Append the signature segment to a `header.payload` prefix.
pub fn create_signed_compact(unsigned: &str, tag: &[u8]) -> String {
    format!("{unsigned}.{}", URL_SAFE_NO_PAD.encode(tag))
}

/// Split and structurally validate a compact token.
///
/// Fails with [`JwtError::MalformedToken`] unless the token has exactly
/// three dot-separated segments, each segment decodes as base64url, the
/// header parses as a JSON object and its `alg` is `HS256`.
pub fn split_signed_compact(token: &str) -> Result<SplitToken, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, tag_b64] = segments[..] else {
        return Err(JwtError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    };

    let header_bytes = decode_segment(header_b64, "header")?;
    let payload = decode_segment(payload_b64, "payload")?;
    let tag = decode_segment(tag_b64, "signature")?;

    let header: Map<String, Value> = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::MalformedToken(format!("header is not a JSON object: {e}")))?;
    match header.get("alg").and_then(Value::as_str) {
        Some(ALGORITHM) => {}
        Some(other) => {
            return Err(JwtError::MalformedToken(format!(
                "unexpected algorithm {other:?}"
            )));
        }
        None => {
            return Err(JwtError::MalformedToken(
                "header has no algorithm field".to_string(),
            ));
        }
    }

    let unsigned_len = header_b64.len() + 1 + payload_b64.len();
    Ok(SplitToken {
        unsigned: token.as_bytes()[..unsigned_len].to_vec(),
        header,
        payload,
        tag,
    })
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, JwtError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::MalformedToken(format!("{name} segment is not base64url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_core::{KeyStatus, MIN_KEY_SIZE};

    fn key(prefix: OutputPrefixType) -> HmacKey {
        HmacKey::new(0x01020304, vec![7u8; MIN_KEY_SIZE], KeyStatus::Enabled, prefix).unwrap()
    }

    #[test]
    fn keyset_kid_is_reversible() {
        let kid = keyset_kid(0x01020304);
        assert_eq!(kid, "AQIDBA");
        assert_eq!(decode_keyset_kid(&kid), Some(0x01020304));
    }

    #[test]
    fn decode_keyset_kid_rejects_wrong_length() {
        assert_eq!(decode_keyset_kid("AQID"), None);
        assert_eq!(decode_keyset_kid("!!!"), None);
    }

    #[test]
    fn raw_key_header_has_no_kid() {
        let header: Map<String, Value> =
            serde_json::from_str(&build_header(&key(OutputPrefixType::Raw))).unwrap();
        assert_eq!(header.get("alg").unwrap(), "HS256");
        assert!(!header.contains_key("kid"));
    }

    #[test]
    fn raw_key_honors_custom_kid() {
        let key = key(OutputPrefixType::Raw).with_custom_kid("my kid");
        let header: Map<String, Value> = serde_json::from_str(&build_header(&key)).unwrap();
        assert_eq!(header.get("kid").unwrap(), "my kid");
    }

    #[test]
    fn tink_key_header_kid_decodes_to_key_id() {
        let header: Map<String, Value> =
            serde_json::from_str(&build_header(&key(OutputPrefixType::Tink))).unwrap();
        let kid = header_kid(&header).unwrap();
        assert_eq!(decode_keyset_kid(kid), Some(0x01020304));
    }

    #[test]
    fn tink_key_custom_kid_wins() {
        let key = key(OutputPrefixType::Tink).with_custom_kid("my kid");
        let header: Map<String, Value> = serde_json::from_str(&build_header(&key)).unwrap();
        assert_eq!(header_kid(&header), Some("my kid"));
    }

    #[test]
    fn split_roundtrip() {
        let header = build_header(&key(OutputPrefixType::Tink));
        let unsigned = unsigned_compact(&header, r#"{"iss":"a"}"#);
        let token = create_signed_compact(&unsigned, &[1, 2, 3]);

        let split = split_signed_compact(&token).unwrap();
        assert_eq!(split.unsigned, unsigned.as_bytes());
        assert_eq!(split.payload, br#"{"iss":"a"}"#);
        assert_eq!(split.tag, [1, 2, 3]);
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        for token in ["", "a.b", "a.b.c.d"] {
            assert!(matches!(
                split_signed_compact(token),
                Err(JwtError::MalformedToken(_))
            ));
        }
    }

    #[test]
    fn non_base64url_segment_is_malformed() {
        let header = build_header(&key(OutputPrefixType::Raw));
        let unsigned = unsigned_compact(&header, "{}");
        let token = format!("{unsigned}.???");
        assert!(matches!(
            split_signed_compact(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn non_object_header_is_malformed() {
        let unsigned = unsigned_compact("[1,2]", "{}");
        let token = create_signed_compact(&unsigned, &[0]);
        assert!(matches!(
            split_signed_compact(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn wrong_algorithm_is_malformed() {
        let unsigned = unsigned_compact(r#"{"alg":"RS256"}"#, "{}");
        let token = create_signed_compact(&unsigned, &[0]);
        assert!(matches!(
            split_signed_compact(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }
}
