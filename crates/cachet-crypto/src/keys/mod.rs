//! RSA identity keys with canonical text encodings
//!
//! Both key types are immutable values: the canonical text (and, for public
//! keys, the fingerprint) is computed exactly once at construction. Parsing
//! caches the original input bytes rather than re-encoding, so
//! `parse(serialize(k))` compares equal to `k` as text even though the
//! passphrase-protected container is randomized.
//!
//! The passphrase is an explicit argument to [`PrivateKey::generate`] and
//! [`PrivateKey::parse`]; it is never stored on the value and never
//! serialized.

mod private;
mod public;

pub use private::{KEY_BITS, PrivateKey};
pub use public::{FINGERPRINT_SIZE, PublicKey, fingerprint};
