//! Subresource integrity checks.
//!
//! An integrity string has the form `<algorithm>-<hex digest>`, for example
//! `sha256-2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824`.
//! Digests are compared as lowercase hex.

use crate::errors::ResponseError;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

pub const SUPPORTED_ALGORITHMS: &[&str] = &[
    "md5",
    "sha1",
    "sha224",
    "sha256",
    "sha384",
    "sha512",
    "sha512/224",
    "sha512/256",
];

/// Verifies `contents` against `integrity`. `None` always passes.
///
/// The string is split on its first `-`; a string without one is treated as
/// an algorithm name with an empty digest.
pub fn check_integrity(integrity: Option<&str>, contents: &[u8]) -> Result<(), ResponseError> {
    let Some(integrity) = integrity else {
        return Ok(());
    };

    let (algorithm, expected) = integrity.split_once('-').unwrap_or((integrity, ""));
    let actual = hex_digest(algorithm, contents)
        .ok_or_else(|| ResponseError::UnsupportedIntegrityAlgorithm(algorithm.to_string()))?;

    if actual != expected {
        log::debug!("integrity mismatch: {algorithm} digest {actual} != {expected}");
        return Err(ResponseError::IntegrityMismatch {
            algorithm: algorithm.to_string(),
        });
    }

    Ok(())
}

/// Lowercase hex digest of `contents`, `None` for unsupported algorithms.
pub fn hex_digest(algorithm: &str, contents: &[u8]) -> Option<String> {
    let digest = match algorithm {
        "md5" => Md5::digest(contents).to_vec(),
        "sha1" => Sha1::digest(contents).to_vec(),
        "sha224" => Sha224::digest(contents).to_vec(),
        "sha256" => Sha256::digest(contents).to_vec(),
        "sha384" => Sha384::digest(contents).to_vec(),
        "sha512" => Sha512::digest(contents).to_vec(),
        "sha512/224" => Sha512_224::digest(contents).to_vec(),
        "sha512/256" => Sha512_256::digest(contents).to_vec(),
        _ => return None,
    };

    Some(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn absent_integrity_passes() {
        assert!(check_integrity(None, b"anything").is_ok());
    }

    #[test]
    fn correct_digest_passes() {
        let integrity = format!("sha256-{HELLO_SHA256}");
        assert!(check_integrity(Some(&integrity), b"hello").is_ok());
        assert!(check_integrity(Some("md5-5d41402abc4b2a76b9719d911017c592"), b"hello").is_ok());
        assert!(check_integrity(Some("sha1-aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"), b"hello").is_ok());
    }

    #[test]
    fn wrong_digest_is_a_mismatch() {
        let integrity = format!("sha256-{HELLO_SHA256}");
        let err = check_integrity(Some(&integrity), b"hello!").unwrap_err();
        assert!(matches!(err, ResponseError::IntegrityMismatch { ref algorithm } if algorithm == "sha256"));
    }

    #[test]
    fn unknown_algorithm_is_unsupported() {
        let err = check_integrity(Some("bogus-xyz"), b"hello").unwrap_err();
        assert!(matches!(err, ResponseError::UnsupportedIntegrityAlgorithm(ref a) if a == "bogus"));

        let err = check_integrity(Some("nodash"), b"hello").unwrap_err();
        assert!(matches!(err, ResponseError::UnsupportedIntegrityAlgorithm(ref a) if a == "nodash"));
    }

    #[test]
    fn every_supported_algorithm_hashes() {
        for algorithm in SUPPORTED_ALGORITHMS {
            let digest = hex_digest(algorithm, b"").unwrap();
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            assert!(check_integrity(Some(&format!("{algorithm}-{digest}")), b"").is_ok());
        }
    }
}
