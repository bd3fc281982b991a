//! Cryptographic primitives for nostrvault.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening (`encryption`)
//! - PBKDF2-HMAC-SHA256 passphrase key derivation (`kdf`)

pub mod encryption;
pub mod kdf;

pub use encryption::{open, seal, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, generate_salt, DerivedKey, Pbkdf2Params, KEY_LEN, SALT_LEN};
