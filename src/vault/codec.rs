//! Vault blob encoding.
//!
//! Encrypted layout (no length prefixes, ciphertext runs to the end):
//!
//! ```text
//! [ 16-byte salt | 12-byte nonce | ciphertext + 16-byte tag ]
//! ```
//!
//! An empty passphrase selects plaintext mode: the blob is the secret
//! itself with no header.  Nothing in the blob says which mode was used;
//! the reader decides by the passphrase it supplies.

use zeroize::Zeroizing;

use crate::crypto::encryption::{self, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{derive_key, generate_salt, Pbkdf2Params, SALT_LEN};
use crate::errors::{NostrVaultError, Result};

/// Smallest well-formed encrypted blob (empty plaintext).
pub const MIN_ENCRYPTED_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Seals and opens vault blobs with a passphrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCodec {
    params: Pbkdf2Params,
}

impl VaultCodec {
    pub fn new(params: Pbkdf2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Pbkdf2Params {
        &self.params
    }

    /// Encode `plaintext` for storage.
    ///
    /// A fresh salt and nonce are drawn on every call, so encoding the
    /// same input twice never yields the same blob.
    pub fn encode(&self, plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
        if passphrase.is_empty() {
            tracing::debug!(len = plaintext.len(), "encoding vault in plaintext mode");
            return Ok(plaintext.to_vec());
        }

        let salt = generate_salt();
        let key = derive_key(passphrase, &salt, &self.params);
        let sealed = encryption::seal(key.as_bytes(), plaintext)?;

        let mut output = Vec::with_capacity(SALT_LEN + sealed.len());
        output.extend_from_slice(&salt);
        output.extend_from_slice(&sealed);
        tracing::debug!(len = output.len(), "encoded encrypted vault");
        Ok(output)
    }

    /// Decode a blob produced by `encode`.
    ///
    /// Short input, a wrong passphrase and a tampered blob all fail with
    /// the same `DecryptionFailed`.
    pub fn decode(&self, blob: &[u8], passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if passphrase.is_empty() {
            return Ok(Zeroizing::new(blob.to_vec()));
        }

        if blob.len() < MIN_ENCRYPTED_LEN {
            tracing::debug!(len = blob.len(), "vault blob too short to be encrypted");
            return Err(NostrVaultError::DecryptionFailed);
        }

        let (salt, sealed) = blob.split_at(SALT_LEN);
        let key = derive_key(passphrase, salt, &self.params);
        encryption::open(key.as_bytes(), sealed).map(Zeroizing::new)
    }
}
