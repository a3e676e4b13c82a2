//! Well-known cleartext bodies exchanged alongside encrypted envelopes

use cachet_crypto::PublicKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name tag for an error response body.
pub const NAME_ERROR: &str = "error";

/// Name tag for a clock-reference body.
pub const NAME_REFERENCES: &str = "references";

/// A user-facing error carried as data.
///
/// Outer layers map known error kinds to this label explicitly; internal
/// crypto errors are never downcast to produce user text. In particular a
/// bad passphrase must not be distinguishable from any other parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable label chosen by the sending peer
    pub label: String,
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl std::error::Error for ErrorBody {}

/// First-contact key exchange body.
///
/// Sent in cleartext JSON: the initial key exchange is explicitly outside
/// the confidentiality scope of the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBody {
    /// The peer's public key text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PublicKey>,
}

/// Clock reference handed to peers, e.g. to diagnose freshness failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencesBody {
    /// The sending peer's current time
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn error_body_displays_its_label() {
        let body = ErrorBody { label: "something went wrong".to_string() };
        assert_eq!(body.to_string(), "something went wrong");
    }

    #[test]
    fn key_body_omits_absent_key() {
        let body = KeyBody { key: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), "{}");

        let back: KeyBody = serde_json::from_str("{}").unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn references_body_roundtrips() {
        let body = ReferencesBody { now: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap() };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"now":"2026-01-15T10:00:00Z"}"#);

        let back: ReferencesBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
