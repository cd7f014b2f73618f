//! Token claims and their JSON payload encoding.

use crate::error::JwtError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The claims carried in a token payload.
///
/// Registered JWT fields plus arbitrary custom claims. Timestamps are
/// serialized as NumericDate seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (`iss`).
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Subject (`sub`).
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Audience (`aud`).
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Expiration time (`exp`).
    #[serde(
        rename = "exp",
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration: Option<DateTime<Utc>>,

    /// Not-before time (`nbf`).
    #[serde(
        rename = "nbf",
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_before: Option<DateTime<Utc>>,

    /// Issued-at time (`iat`).
    #[serde(
        rename = "iat",
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<DateTime<Utc>>,

    /// Token id (`jti`).
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub jwt_id: Option<String>,

    /// Any non-registered claims.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl Claims {
    /// Create empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn with_not_before(mut self, not_before: DateTime<Utc>) -> Self {
        self.not_before = Some(not_before);
        self
    }

    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    pub fn with_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    /// Attach a custom claim.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Serialize into the payload segment JSON.
    pub fn encode(&self) -> Result<String, JwtError> {
        serde_json::to_string(self).map_err(|e| JwtError::InvalidClaims(e.to_string()))
    }

    /// Parse a decoded payload segment.
    pub fn decode(payload: &[u8]) -> Result<Self, JwtError> {
        serde_json::from_slice(payload).map_err(|e| JwtError::InvalidClaims(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn registered_claims_use_short_names() {
        let claims = Claims::new()
            .with_issuer("issuer")
            .with_expiration(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let json: Value = serde_json::from_str(&claims.encode().unwrap()).unwrap();
        assert_eq!(json["iss"], "issuer");
        assert_eq!(json["exp"], 1_700_000_000);
        assert!(json.get("sub").is_none());
    }

    #[test]
    fn custom_claims_are_flattened() {
        let claims = Claims::new().with_claim("tenant", "client_a");
        let json: Value = serde_json::from_str(&claims.encode().unwrap()).unwrap();
        assert_eq!(json["tenant"], "client_a");

        let decoded = Claims::decode(json.to_string().as_bytes()).unwrap();
        assert_eq!(decoded.custom.get("tenant").unwrap(), "client_a");
    }

    #[test]
    fn garbage_payload_is_invalid_claims() {
        assert!(matches!(
            Claims::decode(b"not json"),
            Err(JwtError::InvalidClaims(_))
        ));
        assert!(matches!(
            Claims::decode(b"[1,2,3]"),
            Err(JwtError::InvalidClaims(_))
        ));
    }
}
