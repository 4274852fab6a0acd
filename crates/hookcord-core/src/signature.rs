//! GitHub webhook signature verification (HMAC-SHA256).
//!
//! GitHub signs every delivery with the shared secret and sends the result in
//! the `X-Hub-Signature-256` header as `sha256=<hex>`. The MAC covers the raw
//! body bytes exactly as received, so verification must run on those bytes and
//! never on a re-serialized payload.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Why a delivery failed signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The request carried no signature header.
    #[error("signature header is missing")]
    Missing,
    /// The header is not `sha256=<hex>`.
    #[error("signature header is malformed")]
    Malformed,
    /// The digest does not match the body under the configured secret.
    #[error("signature does not match payload")]
    Mismatch,
}

/// Parses a signature header (`sha256=<hex>`) into raw digest bytes.
///
/// Returns `None` for a missing prefix, another algorithm, or invalid hex.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.trim().strip_prefix(SIGNATURE_PREFIX)?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 of `payload` under `secret`.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a digest as a header value, `sha256=<lowercase hex>`.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(signature))
}

/// Signs `payload` and returns the ready-to-send header value.
pub fn sign_payload(payload: &[u8], secret: &[u8]) -> String {
    format_signature_header(&compute_signature(payload, secret))
}

/// Verifies a delivery signature against the raw body.
///
/// The digest comparison is constant-time (`Mac::verify_slice`).
pub fn verify_signature(
    payload: &[u8],
    signature_header: Option<&str>,
    secret: &[u8],
) -> Result<(), SignatureError> {
    let header = signature_header.ok_or(SignatureError::Missing)?;
    let claimed = parse_signature_header(header).ok_or(SignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::Mismatch)?;
    mac.update(payload);
    mac.verify_slice(&claimed)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_signature_header() {
        assert_eq!(
            parse_signature_header("sha256=1234abcd"),
            Some(vec![0x12, 0x34, 0xab, 0xcd])
        );
        assert_eq!(
            parse_signature_header("sha256=ABCD1234"),
            Some(vec![0xab, 0xcd, 0x12, 0x34])
        );
        assert_eq!(parse_signature_header("1234abcd"), None);
        assert_eq!(parse_signature_header("sha1=1234abcd"), None);
        assert_eq!(parse_signature_header("sha256=xyz"), None);
        assert_eq!(parse_signature_header("sha256=abc"), None);
    }

    /// Known vector from GitHub's "validating webhook deliveries" guide.
    #[test]
    fn test_github_documentation_vector() {
        let header = "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";
        assert_eq!(
            verify_signature(b"Hello, World!", Some(header), b"It's a Secret to Everybody"),
            Ok(())
        );
    }

    #[test]
    fn test_verify_errors() {
        let payload = br#"{"zen":"Keep it logically awesome."}"#;
        let secret = b"my-secret-key";
        let header = sign_payload(payload, secret);

        assert_eq!(verify_signature(payload, Some(&header), secret), Ok(()));
        assert_eq!(
            verify_signature(payload, None, secret),
            Err(SignatureError::Missing)
        );
        assert_eq!(
            verify_signature(payload, Some("sha1=abc"), secret),
            Err(SignatureError::Malformed)
        );
        assert_eq!(
            verify_signature(payload, Some(&header), b"wrong-secret"),
            Err(SignatureError::Mismatch)
        );
        assert_eq!(
            verify_signature(b"tampered", Some(&header), secret),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_truncated_digest_is_rejected() {
        let payload = b"payload";
        let secret = b"secret";
        let mut sig = compute_signature(payload, secret);
        sig.truncate(16);

        assert_eq!(
            verify_signature(payload, Some(&format_signature_header(&sig)), secret),
            Err(SignatureError::Mismatch)
        );
    }

    proptest! {
        #[test]
        fn prop_sign_verify_roundtrip(payload: Vec<u8>, secret: Vec<u8>) {
            let header = sign_payload(&payload, &secret);
            prop_assert_eq!(verify_signature(&payload, Some(&header), &secret), Ok(()));
        }

        #[test]
        fn prop_single_bit_flip_fails(
            payload in proptest::collection::vec(any::<u8>(), 1..512),
            secret: Vec<u8>,
            index: proptest::sample::Index,
            bit in 0u8..8,
        ) {
            let header = sign_payload(&payload, &secret);
            let mut mutated = payload.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= 1 << bit;

            prop_assert_eq!(
                verify_signature(&mutated, Some(&header), &secret),
                Err(SignatureError::Mismatch)
            );
        }

        #[test]
        fn prop_malformed_header_never_panics(header: String, payload: Vec<u8>) {
            let _ = verify_signature(&payload, Some(&header), b"secret");
        }
    }
}
