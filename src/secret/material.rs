use std::fmt;

use zeroize::Zeroizing;

use crate::errors::Result;
use crate::identity;

/// A resolved secret: a seed phrase or a private key, held as text and
/// wiped from memory on drop.
pub struct SecretMaterial {
    value: Zeroizing<String>,
}

impl SecretMaterial {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Zeroizing::new(value.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

impl From<Zeroizing<String>> for SecretMaterial {
    fn from(value: Zeroizing<String>) -> Self {
        Self { value }
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretMaterial(<redacted>)")
    }
}

/// What kind of secret a vault holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SecretKind {
    /// A BIP-39 mnemonic seed phrase.
    Seed,
    /// A raw private key (hex or nsec).
    Key,
}

impl SecretKind {
    /// Check that `text` is well-formed for this kind.
    pub fn validate(self, text: &str) -> Result<()> {
        match self {
            SecretKind::Seed => identity::validate_mnemonic(text),
            SecretKind::Key => identity::parse_private_key(text).map(|_| ()),
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretKind::Seed => f.write_str("seed phrase"),
            SecretKind::Key => f.write_str("private key"),
        }
    }
}

/// Where a resolved secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Explicit,
    FileSource,
    Generated,
}

/// Output of a resolution: the secret plus its origin.
#[derive(Debug)]
pub struct Resolved {
    pub material: SecretMaterial,
    pub source: ResolutionSource,
}
