//! Error types for key handling and hybrid encryption

use thiserror::Error;

/// Errors from key management and hybrid encryption operations.
///
/// Every variant is terminal for the operation that raised it; nothing is
/// retried internally and no cryptographic failure is softened. Variants that
/// could act as an oracle ([`WrongPassphrase`](Self::WrongPassphrase),
/// [`SignatureInvalid`](Self::SignatureInvalid),
/// [`KeyUnwrap`](Self::KeyUnwrap)) deliberately carry no detail beyond the
/// phase they name.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// RSA key pair generation failed
    #[error("key generation failed: {reason}")]
    KeyGeneration {
        /// Underlying generation failure
        reason: String,
    },

    /// Encoding key material or payload bytes failed
    #[error("encoding failed during {phase}: {reason}")]
    Encoding {
        /// Operation phase that was encoding when the failure occurred
        phase: &'static str,
        /// Underlying encoder failure
        reason: String,
    },

    /// Input is not a valid key container (base64, PEM, or DER layer)
    #[error("malformed key: {reason}")]
    MalformedKey {
        /// Which layer of the container was rejected
        reason: String,
    },

    /// Encrypted key container could not be decrypted with the passphrase.
    /// The only signal of a bad passphrase; there is no separate check.
    #[error("private key container decryption failed")]
    WrongPassphrase,

    /// Secure random source failed to produce bytes
    #[error("randomness source failed: {reason}")]
    Randomness {
        /// Underlying random source failure
        reason: String,
    },

    /// Asymmetric padding or cipher construction failed during encryption
    #[error("padding operation failed: {reason}")]
    Padding {
        /// Underlying cipher or padding failure
        reason: String,
    },

    /// Signature over the message digest did not verify
    #[error("signature verification failed")]
    SignatureInvalid,

    /// Wrapped symmetric key could not be recovered with the recipient key
    #[error("symmetric key unwrap failed")]
    KeyUnwrap,

    /// Decrypted plaintext could not be deserialized into the requested type
    #[error("payload deserialization failed: {reason}")]
    Deserialization {
        /// Underlying deserializer failure
        reason: String,
    },
}
