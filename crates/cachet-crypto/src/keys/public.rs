//! Public key half: canonical text encoding and fingerprint

use rsa::{
    RsaPublicKey,
    pkcs8::{DecodePublicKey, EncodePublicKey},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use sha1::{Digest, Sha1};

use crate::{encoding, error::CryptoError};

/// Size of a public key fingerprint in bytes (SHA-1 output).
pub const FINGERPRINT_SIZE: usize = 20;

/// Fingerprint of a canonical public-key text encoding.
///
/// Deterministic digest used as a storage lookup key and wire identifier.
/// It backs identity lookup only, never a security decision.
pub fn fingerprint(encoded: &str) -> [u8; FINGERPRINT_SIZE] {
    Sha1::digest(encoded.as_bytes()).into()
}

/// An RSA public key with its canonical text encoding and fingerprint.
///
/// The text encoding is base64-wrapped PKIX/SPKI DER. Encoding and
/// fingerprint are pure functions of the key material: two values built from
/// the same key bytes produce identical text and identical fingerprints.
///
/// # Invariants
///
/// - `encoded` and `fingerprint` are computed once at construction and never
///   change for the lifetime of the value.
/// - `fingerprint == fingerprint(encoded)` always holds.
#[derive(Debug, Clone)]
pub struct PublicKey {
    key: RsaPublicKey,
    encoded: String,
    fingerprint: [u8; FINGERPRINT_SIZE],
}

impl PublicKey {
    /// Build from raw key material, deriving the canonical encoding.
    pub(crate) fn from_key(key: RsaPublicKey) -> Result<Self, CryptoError> {
        let der = key.to_public_key_der().map_err(|e| CryptoError::Encoding {
            phase: "public key",
            reason: e.to_string(),
        })?;
        let encoded = encoding::encode(der.as_bytes());
        let fingerprint = fingerprint(&encoded);
        Ok(Self { key, encoded, fingerprint })
    }

    /// Parse a base64-wrapped PKIX DER text encoding.
    ///
    /// The input becomes the canonical text of the result.
    ///
    /// # Errors
    ///
    /// - `MalformedKey` if the base64 or DER layer is invalid
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let der = encoding::decode(text)?;
        let key = RsaPublicKey::from_public_key_der(&der)
            .map_err(|e| CryptoError::MalformedKey { reason: e.to_string() })?;
        Ok(Self { key, encoded: text.to_owned(), fingerprint: fingerprint(text) })
    }

    /// Canonical text encoding: base64(PKIX DER).
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Cached fingerprint of the canonical text encoding.
    pub fn fingerprint(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.fingerprint
    }

    /// Raw key material, for in-crate cipher operations.
    pub(crate) fn key(&self) -> &RsaPublicKey {
        &self.key
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for PublicKey {}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}
