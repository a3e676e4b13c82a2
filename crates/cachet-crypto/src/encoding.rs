//! Base64 wrapping for key text and JSON byte fields
//!
//! Key encodings and the byte fields of
//! [`EncryptedMessage`](crate::EncryptedMessage) travel as standard base64
//! strings, matching the wire format of existing peers.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::CryptoError;

/// Encode bytes as standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64, rejecting malformed input.
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::MalformedKey { reason: format!("base64 decoding failed: {e}") })
}

/// Serde adapter serializing `Vec<u8>` as a base64 string.
///
/// Used via `#[serde(with = "...")]` on the byte fields of the wire structs.
pub mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize bytes as a base64 string.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// Deserialize a base64 string into bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let bytes = b"cachet wire bytes";
        assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = decode("not base64!!").unwrap_err();
        assert!(matches!(err, CryptoError::MalformedKey { .. }));
    }
}
