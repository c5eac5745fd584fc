//! Payment gateway signature verification.
//!
//! The gateway proves authenticity of payment confirmations with an
//! HMAC-SHA256 over a message both sides can reconstruct, rendered as
//! lowercase hex. Two framings share this primitive:
//!
//! - Client redirect: `{gateway_order_id}|{gateway_payment_id}`, signed with
//!   the API key secret.
//! - Webhook: the exact raw request body, signed with the webhook secret.
//!   Verification must happen before JSON parsing; re-serializing the body
//!   can change key order or whitespace and invalidate the signature.
//!
//! Comparison is constant-time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded HMAC-SHA256 digest.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Failure classes for signature verification.
///
/// Callers must treat every variant as "payment unverified" (fail closed),
/// but `MissingSecret` indicates operational misconfiguration rather than a
/// forged request and maps to a different HTTP response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Signing secret is absent from configuration.
    #[error("Signing secret not configured")]
    MissingSecret,

    /// Supplied signature is not a 64-character hex string.
    #[error("Malformed signature")]
    Malformed,

    /// Computed digest does not equal the supplied signature.
    #[error("Signature mismatch")]
    Mismatch,
}

/// Message framing for the client-redirect path.
pub fn checkout_message(order_ref: &str, payment_ref: &str) -> String {
    format!("{}|{}", order_ref, payment_ref)
}

/// Verifier for gateway-supplied signatures.
///
/// Holds one confidential secret, sourced from configuration and never from
/// request input. Pure and stateless: safe to share across request tasks.
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a verifier with the given shared secret.
    ///
    /// An empty secret is accepted here; [`verify`](Self::verify) fails
    /// closed with `MissingSecret` rather than skipping verification.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Returns true when a non-empty secret is present.
    pub fn is_configured(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// Computes the signature for a message as lowercase hex.
    pub fn sign(&self, message: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a supplied signature against the message.
    ///
    /// # Errors
    ///
    /// - `MissingSecret` - verifier was built with an empty secret
    /// - `Malformed` - signature is not a 64-character hex string
    /// - `Mismatch` - digests differ
    pub fn verify(&self, message: &[u8], supplied: &str) -> Result<(), SignatureError> {
        if self.secret.expose_secret().is_empty() {
            return Err(SignatureError::MissingSecret);
        }
        if supplied.len() != SIGNATURE_HEX_LEN {
            return Err(SignatureError::Malformed);
        }
        let supplied_bytes = hex::decode(supplied).map_err(|_| SignatureError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(message);
        let expected = mac.finalize().into_bytes();

        // Length is already gated; ct_eq does not short-circuit on content.
        if expected.as_slice().ct_eq(&supplied_bytes).unwrap_u8() != 1 {
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }

    /// Verifies a client-redirect signature over `{order_ref}|{payment_ref}`.
    pub fn verify_checkout(
        &self,
        order_ref: &str,
        payment_ref: &str,
        supplied: &str,
    ) -> Result<(), SignatureError> {
        self.verify(checkout_message(order_ref, payment_ref).as_bytes(), supplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "whsec_test";

    // ══════════════════════════════════════════════════════════════
    // Concrete Vector (reproducible fixture)
    // ══════════════════════════════════════════════════════════════

    /// HMAC-SHA256("whsec_test", "order_1|pay_99") as lowercase hex.
    const KNOWN_SIGNATURE: &str =
        "06264b8fe9757767d9effb0db7c1418a3c53c3a06d21d60743fcd66629e28c2b";

    #[test]
    fn sign_produces_known_vector() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.sign(checkout_message("order_1", "pay_99").as_bytes()),
            KNOWN_SIGNATURE
        );
    }

    #[test]
    fn verify_accepts_known_vector() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify_checkout("order_1", "pay_99", KNOWN_SIGNATURE),
            Ok(())
        );
    }

    #[test]
    fn verify_rejects_flipped_last_character() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let mut tampered = KNOWN_SIGNATURE.to_string();
        tampered.pop();
        tampered.push('c'); // last char is 'b'
        assert_eq!(
            verifier.verify_checkout("order_1", "pay_99", &tampered),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_rejects_empty_signature() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify_checkout("order_1", "pay_99", ""),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn verify_fails_closed_without_secret() {
        let verifier = SignatureVerifier::new("");
        assert_eq!(
            verifier.verify_checkout("order_1", "pay_99", KNOWN_SIGNATURE),
            Err(SignatureError::MissingSecret)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Format Robustness
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_rejects_wrong_length() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify(b"msg", &"a".repeat(63)),
            Err(SignatureError::Malformed)
        );
        assert_eq!(
            verifier.verify(b"msg", &"a".repeat(65)),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn verify_rejects_non_hex_characters() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify(b"msg", &"z".repeat(64)),
            Err(SignatureError::Malformed)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Message and Secret Sensitivity
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn changed_order_ref_fails_verification() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = verifier.sign(checkout_message("order_1", "pay_99").as_bytes());
        assert_eq!(
            verifier.verify_checkout("order_2", "pay_99", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn changed_payment_ref_fails_verification() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = verifier.sign(checkout_message("order_1", "pay_99").as_bytes());
        assert_eq!(
            verifier.verify_checkout("order_1", "pay_98", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let signer = SignatureVerifier::new(TEST_SECRET);
        let other = SignatureVerifier::new("whsec_other");
        let signature = signer.sign(checkout_message("order_1", "pay_99").as_bytes());
        assert_ne!(
            signature,
            other.sign(checkout_message("order_1", "pay_99").as_bytes())
        );
        assert_eq!(
            other.verify_checkout("order_1", "pay_99", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Webhook Byte-Exactness
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn reserialized_json_fails_verification() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let original = br#"{"event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
        let signature = verifier.sign(original);

        // Same JSON value, different bytes (whitespace)
        let value: serde_json::Value = serde_json::from_slice(original).unwrap();
        let reserialized = serde_json::to_string_pretty(&value).unwrap();
        assert_ne!(original.as_slice(), reserialized.as_bytes());

        assert_eq!(verifier.verify(original, &signature), Ok(()));
        assert_eq!(
            verifier.verify(reserialized.as_bytes(), &signature),
            Err(SignatureError::Mismatch)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Hardening Test
    // ══════════════════════════════════════════════════════════════

    // Pins the constant-time path for equal-length inputs: a forged
    // signature of the correct length and alphabet must still be rejected.
    #[test]
    fn equal_length_mismatch_is_rejected() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = verifier.sign(b"message");
        let mut forged: Vec<u8> = signature.into_bytes();
        forged[0] = if forged[0] == b'0' { b'1' } else { b'0' };
        let forged = String::from_utf8(forged).unwrap();
        assert_eq!(
            verifier.verify(b"message", &forged),
            Err(SignatureError::Mismatch)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn sign_then_verify_round_trips(
            order_ref in "[a-zA-Z0-9_]{1,24}",
            payment_ref in "[a-zA-Z0-9_]{1,24}",
            secret in "[ -~]{1,32}",
        ) {
            let verifier = SignatureVerifier::new(secret);
            let signature = verifier.sign(checkout_message(&order_ref, &payment_ref).as_bytes());
            prop_assert_eq!(signature.len(), SIGNATURE_HEX_LEN);
            prop_assert_eq!(
                verifier.verify_checkout(&order_ref, &payment_ref, &signature),
                Ok(())
            );
        }

        #[test]
        fn verify_never_panics_on_arbitrary_signature(
            supplied in "\\PC*",
        ) {
            let verifier = SignatureVerifier::new(TEST_SECRET);
            let _ = verifier.verify(b"order_1|pay_99", &supplied);
        }

        #[test]
        fn different_messages_produce_different_signatures(
            a in "[a-z0-9]{1,16}",
            b in "[a-z0-9]{1,16}",
        ) {
            prop_assume!(a != b);
            let verifier = SignatureVerifier::new(TEST_SECRET);
            prop_assert_ne!(verifier.sign(a.as_bytes()), verifier.sign(b.as_bytes()));
        }
    }
}
