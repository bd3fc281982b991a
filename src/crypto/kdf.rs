//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is a tunable parameter (loaded from `config.toml`
//! or the default).  It is not stored in the vault file, so a vault must
//! be opened with the same count it was sealed with.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{NostrVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Iteration count used by vaults written with default settings.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Lowest iteration count we accept from configuration.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Validated PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    iterations: u32,
}

impl Pbkdf2Params {
    /// Build params, rejecting dangerously low iteration counts.
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations < MIN_ITERATIONS {
            return Err(NostrVaultError::KeyDerivation(format!(
                "pbkdf2 iterations must be at least {MIN_ITERATIONS} (got {iterations})"
            )));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A 32-byte symmetric key that zeroes its memory when dropped.
///
/// Only ever lives for the duration of one encode or decode call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte key from a passphrase and salt.
///
/// The same passphrase + salt + params always produce the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8], params: &Pbkdf2Params) -> DerivedKey {
    let mut key = DerivedKey {
        bytes: [0u8; KEY_LEN],
    };
    pbkdf2_hmac::<Sha256>(passphrase, salt, params.iterations, &mut key.bytes);
    key
}

/// Generate a fresh random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_pbkdf2_sha256_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", 4096, 32)
        let params = Pbkdf2Params::new(4096).unwrap();
        let key = derive_key(b"password", b"salt", &params);
        assert_eq!(
            hex::encode(key.as_bytes()),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn same_inputs_same_key() {
        let salt = generate_salt();
        let params = Pbkdf2Params::default();
        let k1 = derive_key(b"correct horse", &salt, &params);
        let k2 = derive_key(b"correct horse", &salt, &params);
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_salts_different_keys() {
        let params = Pbkdf2Params::default();
        let k1 = derive_key(b"same", &generate_salt(), &params);
        let k2 = derive_key(b"same", &generate_salt(), &params);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn iteration_count_changes_key() {
        let salt = [7u8; SALT_LEN];
        let k1 = derive_key(b"pw", &salt, &Pbkdf2Params::new(1_000).unwrap());
        let k2 = derive_key(b"pw", &salt, &Pbkdf2Params::new(2_000).unwrap());
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn rejects_low_iteration_count() {
        assert!(Pbkdf2Params::new(999).is_err());
        assert!(Pbkdf2Params::new(0).is_err());
        assert_eq!(Pbkdf2Params::new(1_000).unwrap().iterations(), 1_000);
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn derived_key_is_wiped_in_place() {
        let params = Pbkdf2Params::new(1_000).unwrap();
        let mut key = derive_key(b"pw", &[7u8; SALT_LEN], &params);
        assert_ne!(key.as_bytes(), &[0u8; KEY_LEN]);

        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }
}
