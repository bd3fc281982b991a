//! Decide which secret an operation works with.
//!
//! Precedence is fixed: an explicit value beats a source file, which
//! beats generating something new.  Exactly one branch runs per call.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::errors::{NostrVaultError, Result};
use crate::identity;
use crate::prompt::Prompter;
use crate::vault::{read_vault_file, VaultCodec};

use super::material::{ResolutionSource, Resolved, SecretKind, SecretMaterial};
use super::strip_line_terminator;

/// Produces new secret material when nothing else was supplied.
///
/// Generators receive the prompter so they can ask for what they need
/// (e.g. the passphrase of a seed vault to derive a key from).
pub trait SecretGenerator {
    fn generate(&mut self, prompter: &mut dyn Prompter) -> Result<SecretMaterial>;
}

/// Caller-supplied inputs for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub kind: SecretKind,
    pub explicit: Option<&'a str>,
    pub source: Option<&'a Path>,
}

/// Resolves secrets according to the explicit > file > generated order.
#[derive(Debug, Clone, Copy)]
pub struct SecretResolver<'a> {
    codec: &'a VaultCodec,
}

impl<'a> SecretResolver<'a> {
    pub fn new(codec: &'a VaultCodec) -> Self {
        Self { codec }
    }

    pub fn resolve(
        &self,
        request: &ResolveRequest<'_>,
        prompter: &mut dyn Prompter,
        generator: &mut dyn SecretGenerator,
    ) -> Result<Resolved> {
        // 1. Explicit value, taken verbatim.
        if let Some(value) = request.explicit.filter(|v| !v.is_empty()) {
            tracing::debug!(kind = %request.kind, "using explicit secret");
            return Ok(Resolved {
                material: SecretMaterial::new(value),
                source: ResolutionSource::Explicit,
            });
        }

        // 2. Existing file, possibly encrypted.
        if let Some(path) = request.source {
            let material = self.read_source(request.kind, path, prompter)?;
            return Ok(Resolved {
                material,
                source: ResolutionSource::FileSource,
            });
        }

        // 3. Something new.
        tracing::debug!(kind = %request.kind, "generating new secret");
        Ok(Resolved {
            material: generator.generate(prompter)?,
            source: ResolutionSource::Generated,
        })
    }

    /// Open a source vault and return its trimmed content.
    pub fn read_source(
        &self,
        kind: SecretKind,
        path: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<SecretMaterial> {
        let raw = read_vault_file(path)?;
        let passphrase = prompter.secret(&format!(
            "Enter passphrase for {} (empty if unencrypted)",
            path.display()
        ))?;
        let plaintext = self.codec.decode(&raw, passphrase.as_bytes())?;

        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| NostrVaultError::Validation(format!("{kind} file is not valid UTF-8")))?;
        let text = strip_line_terminator(text);

        if kind == SecretKind::Seed {
            identity::validate_mnemonic(text)?;
        }

        tracing::debug!(path = %path.display(), %kind, "read secret from file");
        Ok(SecretMaterial::new(text))
    }
}

/// Generates a fresh 24-word mnemonic.
#[derive(Debug, Default)]
pub struct MnemonicGenerator;

impl SecretGenerator for MnemonicGenerator {
    fn generate(&mut self, _prompter: &mut dyn Prompter) -> Result<SecretMaterial> {
        identity::generate_mnemonic().map(SecretMaterial::from)
    }
}

/// Generates a random private key, hex encoded.
#[derive(Debug, Default)]
pub struct RandomKeyGenerator;

impl SecretGenerator for RandomKeyGenerator {
    fn generate(&mut self, _prompter: &mut dyn Prompter) -> Result<SecretMaterial> {
        let key = identity::generate_private_key()?;
        Ok(SecretMaterial::from(key.to_hex()))
    }
}

/// Derives a private key from a seed vault (NIP-06).
#[derive(Debug)]
pub struct SeedDerivedKeyGenerator<'a> {
    codec: &'a VaultCodec,
    seed_path: PathBuf,
    account: u32,
}

impl<'a> SeedDerivedKeyGenerator<'a> {
    pub fn new(codec: &'a VaultCodec, seed_path: impl Into<PathBuf>, account: u32) -> Self {
        Self {
            codec,
            seed_path: seed_path.into(),
            account,
        }
    }
}

impl SecretGenerator for SeedDerivedKeyGenerator<'_> {
    fn generate(&mut self, prompter: &mut dyn Prompter) -> Result<SecretMaterial> {
        let seed = SecretResolver::new(self.codec).read_source(
            SecretKind::Seed,
            &self.seed_path,
            prompter,
        )?;
        let key = identity::private_key_from_mnemonic(seed.as_str(), self.account)?;
        Ok(SecretMaterial::from(key.to_hex()))
    }
}

/// Always yields the same value.  Handy for tests and for callers that
/// already hold the material.
pub struct FixedGenerator {
    value: Zeroizing<String>,
}

impl FixedGenerator {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Zeroizing::new(value.into()),
        }
    }
}

impl SecretGenerator for FixedGenerator {
    fn generate(&mut self, _prompter: &mut dyn Prompter) -> Result<SecretMaterial> {
        Ok(SecretMaterial::new(self.value.as_str()))
    }
}
