//! Cost Katana webhook signature verification using HMAC-SHA256.
//!
//! Deliveries carry an `X-CostKatana-Signature` header of the form
//! `t=<unix-seconds>,v1=<hex-hmac-sha256>`. The signed payload is the
//! timestamp, a literal `.`, and the raw request body bytes exactly as
//! received. Verification checks the timestamp against a replay tolerance
//! window before recomputing the HMAC and comparing in constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::VerificationError;

type HmacSha256 = Hmac<Sha256>;

/// Default replay tolerance window (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed components of the `X-CostKatana-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp (seconds) at which the signature was generated.
    pub timestamp: i64,
    /// The v1 signature as a hex string.
    ///
    /// Hex validity is not checked here; a signature that fails to decode
    /// is reported by the verifier as a mismatch, not a malformed header.
    pub signature_hex: String,
}

impl SignatureHeader {
    /// Parses a signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>`. Field order is not
    /// significant and unknown fields are ignored so the sender can add
    /// new scheme versions without breaking existing receivers.
    ///
    /// # Errors
    ///
    /// Returns `VerificationError::MalformedHeader` if any part is not a
    /// `key=value` pair, the timestamp is not an integer, or either
    /// required field is absent.
    pub fn parse(header: &str) -> Result<Self, VerificationError> {
        let mut timestamp: Option<i64> = None;
        let mut signature_hex: Option<String> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(VerificationError::MalformedHeader)?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| VerificationError::MalformedHeader)?,
                    );
                }
                "v1" => {
                    signature_hex = Some(value.to_string());
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let timestamp = timestamp.ok_or(VerificationError::MalformedHeader)?;
        let signature_hex = signature_hex.ok_or(VerificationError::MalformedHeader)?;

        Ok(SignatureHeader {
            timestamp,
            signature_hex,
        })
    }
}

/// Verifier for Cost Katana webhook signatures.
///
/// Owns the shared signing secret for the process lifetime. The secret is
/// injected at construction (from [`crate::config::WebhookConfig`] in the
/// binary) rather than read from ambient global state.
pub struct WebhookVerifier {
    /// The shared signing secret, redacted from `Debug` output.
    secret: SecretString,
    /// Maximum allowed `|now - timestamp|` in seconds.
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given secret and tolerance window.
    pub fn new(secret: SecretString, tolerance_secs: i64) -> Self {
        Self {
            secret,
            tolerance_secs,
        }
    }

    /// Creates a verifier with the default 5-minute tolerance.
    pub fn with_default_tolerance(secret: SecretString) -> Self {
        Self::new(secret, DEFAULT_TOLERANCE_SECS)
    }

    /// Creates a verifier from the application's webhook configuration.
    pub fn from_config(config: &crate::config::WebhookConfig) -> Self {
        Self::new(config.secret.clone(), config.tolerance_secs)
    }

    /// Verifies a webhook delivery.
    ///
    /// # Verification Steps
    ///
    /// 1. Reject absent or empty headers (`missing_header`)
    /// 2. Parse the signature header (`malformed_header`)
    /// 3. Validate the timestamp against the tolerance window (`timestamp_expired`)
    /// 4. Recompute the HMAC over `{timestamp}.{raw body}` and compare in
    ///    constant time (`signature_mismatch`)
    ///
    /// `now` is the receiver's current unix time in seconds; it is a
    /// parameter so callers and tests control the clock.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`VerificationError`]; never panics on
    /// malformed input.
    pub fn verify(
        &self,
        body: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<(), VerificationError> {
        let header = match header {
            Some(value) if !value.is_empty() => value,
            _ => return Err(VerificationError::MissingHeader),
        };

        let parsed = SignatureHeader::parse(header)?;
        self.validate_timestamp(parsed.timestamp, now)?;

        // Malformed hex is indistinguishable from a wrong signature to the
        // caller; both are reported as a mismatch.
        let received = hex::decode(&parsed.signature_hex)
            .map_err(|_| VerificationError::SignatureMismatch)?;

        let expected = self.compute_signature(parsed.timestamp, body);
        if !constant_time_compare(&expected, &received) {
            return Err(VerificationError::SignatureMismatch);
        }

        Ok(())
    }

    /// Validates that the signed timestamp is within the tolerance window.
    ///
    /// The window is symmetric: a timestamp too far in the future is as
    /// suspect as one too far in the past. `abs_diff` keeps the check
    /// overflow-free for the extreme timestamps an attacker can put in
    /// the header.
    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), VerificationError> {
        if now.abs_diff(timestamp) > self.tolerance_secs as u64 {
            return Err(VerificationError::TimestampExpired);
        }
        Ok(())
    }

    /// Computes the HMAC-SHA256 signature for the given timestamp and body.
    ///
    /// The signed payload is the raw body bytes as received on the wire.
    /// Re-serializing the parsed JSON is not byte-stable and would break
    /// the signature.
    fn compute_signature(&self, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }

    /// Signs a payload, producing a complete header value.
    ///
    /// Returns a string in the format `t=<timestamp>,v1=<hex>`. This is the
    /// sender side of the scheme, used for test fixtures and local delivery
    /// simulation.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        let signature = self.compute_signature(timestamp, body);
        format!("t={},v1={}", timestamp, hex::encode(signature))
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// Execution time does not depend on where the first differing byte occurs,
/// so an attacker cannot recover the expected signature byte by byte from
/// response timing.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
