//! Cachet Cryptographic Primitives
//!
//! Key management and hybrid encryption for the Cachet messaging protocol.
//! Pure functions with no hidden state. Callers provide the random source,
//! which keeps every operation deterministic under test.
//!
//! # Key Lifecycle
//!
//! A [`PrivateKey`] is either generated fresh or parsed from its canonical
//! text form. Its derived [`PublicKey`] and canonical encoding are fixed at
//! construction and never recomputed, because the passphrase-protected
//! at-rest container is randomized and re-encoding would silently change
//! the serialized value.
//!
//! ```text
//! RSA Key Pair
//!      │
//!      ├─► PublicKey ──► base64(PKIX DER) ──► SHA-1 fingerprint
//!      │
//!      └─► base64(PEM), optionally passphrase-encrypted (PBES2/AES-256)
//! ```
//!
//! # Message Protection
//!
//! [`hybrid`] combines AES-256-CFB bulk encryption with RSA-OAEP/SHA-512 key
//! wrapping and a PKCS#1 v1.5 signature over a SHA-512 ciphertext digest:
//!
//! ```text
//! payload ──JSON──► plaintext ──AES-256-CFB──► ciphertext
//!                                   │
//!          random AES key ──RSA-OAEP(recipient)──► wrapped key
//!                                   │
//!               SHA-512(ciphertext) ──sign(sender)──► signature
//! ```
//!
//! # Security
//!
//! Verify-before-decrypt:
//! - [`hybrid::decrypt`] verifies the sender's signature before any
//!   ciphertext transformation. Unauthenticated data is never decrypted.
//!
//! Passphrase handling:
//! - A failed container decryption is the only signal of a bad passphrase.
//!   [`CryptoError::WrongPassphrase`] carries no detail; callers must not
//!   surface it differently from other parse failures.
//!
//! Key hygiene:
//! - Symmetric keys, decoded PEM bytes, and decrypted plaintext live in
//!   [`zeroize::Zeroizing`] buffers.
//! - `Debug` for [`PrivateKey`] prints the public fingerprint only.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod encoding;
pub mod error;
pub mod hybrid;
pub mod keys;

pub use error::CryptoError;
pub use hybrid::EncryptedMessage;
pub use keys::{FINGERPRINT_SIZE, KEY_BITS, PrivateKey, PublicKey, fingerprint};
