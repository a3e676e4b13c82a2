//! Cachet Envelope Wire Format
//!
//! JSON bodies exchanged between two Cachet peers. The central type is
//! [`Envelope`]: a hybrid-encrypted message bound to the sender's public key
//! and, inside the encrypted payload, a creation timestamp, a name tag, and
//! the application payload.
//!
//! ```text
//! { "key": <sender public key text>, "message": <EncryptedMessage> }
//!                                         │
//!              decrypt ──► { "created_at": RFC3339, "name": ..., "payload": ... }
//! ```
//!
//! # Security
//!
//! Freshness after authenticity:
//! - The creation timestamp travels inside the encrypted content, so the
//!   ±5 s freshness window can only be checked after decryption succeeds.
//!   A tampered message is rejected by signature verification before the
//!   freshness check ever runs.
//!
//! Cleartext sender key:
//! - The envelope's `key` field is not confidential and must not be trusted
//!   beyond fingerprint lookup and signature verification.
//!
//! Time and randomness are supplied by the caller on every operation; this
//! crate never reads a clock or a global random source.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod body;
pub mod envelope;
pub mod error;

pub use body::{ErrorBody, KeyBody, NAME_ERROR, NAME_REFERENCES, ReferencesBody};
pub use envelope::{Envelope, FRESHNESS_WINDOW_SECS, Opened};
pub use error::EnvelopeError;
