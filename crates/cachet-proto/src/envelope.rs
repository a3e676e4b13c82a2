//! Encrypted envelope binding a message to sender identity and freshness

use cachet_crypto::{EncryptedMessage, PrivateKey, PublicKey, hybrid};
use chrono::{DateTime, Duration, Utc};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EnvelopeError;

/// Half-width of the freshness window, in seconds.
///
/// A message is accepted when its embedded creation time lies within
/// `now ± FRESHNESS_WINDOW_SECS`, boundaries inclusive. This mitigates
/// replay of captured envelopes and rejects clock-skewed future timestamps.
pub const FRESHNESS_WINDOW_SECS: i64 = 5;

/// The outer wire body carrying an encrypted message.
///
/// `key` is the sender's public key, sent in clear so the recipient can
/// locate the matching key pair and verify the signature. Both fields are
/// optional in JSON; an envelope missing either cannot be opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Sender's public key text. Not confidential; trusted only for
    /// fingerprint lookup and signature verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PublicKey>,

    /// The hybrid-encrypted message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<EncryptedMessage>,
}

/// Plaintext body handed to the cipher: timestamp, name tag, payload.
#[derive(Serialize)]
struct PlainBody<'a, T: Serialize + ?Sized> {
    created_at: DateTime<Utc>,
    name: &'a str,
    payload: &'a T,
}

/// The decrypted content of an envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Opened {
    /// Creation time embedded by the sender
    pub created_at: DateTime<Utc>,
    /// Application-level message name tag
    pub name: String,
    /// Free-form application payload, extracted via
    /// [`payload_as`](Self::payload_as)
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Opened {
    /// Deserialize the payload into a concrete type.
    ///
    /// # Errors
    ///
    /// - `Payload` if the value does not match `T`
    pub fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| EnvelopeError::Payload { reason: e.to_string() })
    }
}

impl Envelope {
    /// Build an envelope around `payload` from sender to recipient.
    ///
    /// The creation time `now` is sealed inside the encrypted body together
    /// with `name` and the payload; the visible `key` field is set to the
    /// sender's public key. Construction is atomic: it either yields a
    /// complete envelope or fails with no partial state.
    ///
    /// # Errors
    ///
    /// Any [`CryptoError`](cachet_crypto::CryptoError) from the underlying
    /// hybrid encryption.
    pub fn build<T, R>(
        name: &str,
        payload: &T,
        sender_private: &PrivateKey,
        sender_public: &PublicKey,
        recipient_public: &PublicKey,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, EnvelopeError>
    where
        T: Serialize + ?Sized,
        R: CryptoRngCore,
    {
        let body = PlainBody { created_at: now, name, payload };
        let message = hybrid::encrypt(&body, sender_private, recipient_public, rng)?;

        debug!(name, %now, "built encrypted envelope");
        Ok(Self { key: Some(sender_public.clone()), message: Some(message) })
    }

    /// Authenticate, decrypt, and freshness-check this envelope.
    ///
    /// Cryptographic verification runs first; the freshness window is only
    /// enforced on an authenticated, decrypted body. `now` is supplied by
    /// the caller; this crate never reads a clock.
    ///
    /// # Errors
    ///
    /// - `Incomplete` if the message field is absent
    /// - any [`CryptoError`](cachet_crypto::CryptoError) from verification,
    ///   unwrap, decryption, or deserialization
    /// - `Stale` if `created_at` lies outside `now ± 5s`
    pub fn open(
        &self,
        recipient_private: &PrivateKey,
        sender_public: &PublicKey,
        now: DateTime<Utc>,
    ) -> Result<Opened, EnvelopeError> {
        let message =
            self.message.as_ref().ok_or(EnvelopeError::Incomplete { field: "message" })?;

        let opened: Opened = hybrid::decrypt(message, recipient_private, sender_public)?;

        let window = Duration::seconds(FRESHNESS_WINDOW_SECS);
        if opened.created_at > now + window || opened.created_at < now - window {
            return Err(EnvelopeError::Stale { created_at: opened.created_at, now });
        }

        debug!(name = %opened.name, created_at = %opened.created_at, "opened envelope");
        Ok(opened)
    }

    /// The cleartext sender key, when present.
    pub fn sender(&self) -> Option<&PublicKey> {
        self.key.as_ref()
    }
}
