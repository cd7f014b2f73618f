//! Claim validation policy, applied after a token's MAC checks out.

use crate::claims::Claims;
use crate::error::JwtError;
use chrono::{DateTime, Duration, Utc};

/// Validates claims of a cryptographically verified token.
///
/// Validation failures are [`JwtError::ClaimsRejected`], distinct from
/// [`JwtError::VerificationFailed`]: a rejected claim says nothing about
/// the MAC, which has already been confirmed.
#[derive(Debug, Clone)]
pub struct Validator {
    expected_issuer: Option<String>,
    expected_audience: Option<String>,
    allow_missing_expiration: bool,
    clock_skew: Duration,
    fixed_now: Option<DateTime<Utc>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            expected_issuer: None,
            expected_audience: None,
            allow_missing_expiration: false,
            clock_skew: Duration::zero(),
            fixed_now: None,
        }
    }

    /// Require the `iss` claim to equal this value.
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Require the `aud` claim to equal this value.
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Accept tokens without an `exp` claim.
    pub fn allow_missing_expiration(mut self) -> Self {
        self.allow_missing_expiration = true;
        self
    }

    /// Tolerate this much clock drift when checking `exp` and `nbf`.
    pub fn clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    /// Pin the validation clock (test hook).
    pub fn fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Check claims against this policy.
    pub fn validate(&self, claims: &Claims) -> Result<(), JwtError> {
        let now = self.fixed_now.unwrap_or_else(Utc::now);

        match claims.expiration {
            Some(expiration) => {
                if now > expiration + self.clock_skew {
                    return Err(rejected(format!("token expired at {expiration}")));
                }
            }
            None => {
                if !self.allow_missing_expiration {
                    return Err(rejected("token has no expiration".to_string()));
                }
            }
        }

        if let Some(not_before) = claims.not_before
            && now + self.clock_skew < not_before
        {
            return Err(rejected(format!("token not valid before {not_before}")));
        }

        if let Some(expected) = &self.expected_issuer
            && claims.issuer.as_deref() != Some(expected.as_str())
        {
            return Err(rejected(format!(
                "issuer mismatch: expected {expected:?}, got {:?}",
                claims.issuer
            )));
        }

        if let Some(expected) = &self.expected_audience
            && claims.audience.as_deref() != Some(expected.as_str())
        {
            return Err(rejected(format!(
                "audience mismatch: expected {expected:?}, got {:?}",
                claims.audience
            )));
        }

        Ok(())
    }
}

fn rejected(reason: String) -> JwtError {
    JwtError::ClaimsRejected { reason }
}
