//! Error types for envelope construction and opening

use cachet_crypto::CryptoError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from building or opening an [`Envelope`](crate::Envelope).
///
/// The crypto taxonomy stays closed inside [`CryptoError`]; this layer adds
/// only the envelope-level conditions. All variants are terminal.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Underlying key or cipher failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Creation timestamp falls outside the freshness window around `now`.
    /// Covers both replayed messages and clock-skewed future timestamps.
    #[error("message creation time {created_at} is outside the freshness window around {now}")]
    Stale {
        /// Timestamp recovered from the encrypted body
        created_at: DateTime<Utc>,
        /// Caller-supplied current time
        now: DateTime<Utc>,
    },

    /// Envelope is missing a field required for decryption.
    /// Field omission is valid JSON but not a decryptable message.
    #[error("envelope is missing required field `{field}`")]
    Incomplete {
        /// Name of the absent field
        field: &'static str,
    },

    /// Decrypted payload could not be converted into the requested type
    #[error("payload extraction failed: {reason}")]
    Payload {
        /// Underlying deserializer failure
        reason: String,
    },
}
