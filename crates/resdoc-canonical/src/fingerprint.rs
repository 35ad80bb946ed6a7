use crate::encoding::{Canonicalizer, EncodingError};
use crate::validation::ValidationError;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Domain separator mixed into every document fingerprint.
const DOCUMENT_DOMAIN_SEPARATOR: &[u8] = b"resdoc:document:v1\0";

/// Supported fingerprint algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FingerprintAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Content fingerprint of a canonical document, base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Hash algorithm.
    pub alg: FingerprintAlg,
    /// Base64URL (no padding) hash bytes.
    pub b64: String,
}

impl Fingerprint {
    /// Constructs a validated fingerprint.
    pub fn new(alg: FingerprintAlg, b64: impl Into<String>) -> Result<Self, ValidationError> {
        let b64 = b64.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("invalid regex");
        if !re.is_match(&b64) {
            return Err(ValidationError::PatternMismatch {
                field: "fingerprint",
                value: b64,
            });
        }
        Ok(Self { alg, b64 })
    }

    /// Fingerprints any serializable value over its canonical bytes.
    ///
    /// Formula: `sha256(domain_separator || canonical_bytes(value))`
    pub fn of<T: Serialize>(value: &T) -> Result<Self, EncodingError> {
        let bytes = Canonicalizer::new().encode(value)?;
        let mut hasher = Sha256::new();
        hasher.update(DOCUMENT_DOMAIN_SEPARATOR);
        hasher.update(&bytes);
        let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize());
        Ok(Self {
            alg: FingerprintAlg::Sha256,
            b64,
        })
    }
}
