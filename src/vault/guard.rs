//! Overwrite protection for existing vaults.
//!
//! Before an existing vault can be replaced the caller must (1) confirm
//! the overwrite, defaulting to "no", and (2) prove they can still open
//! it by decoding it with its passphrase.  Any failure leaves the file
//! untouched.

use std::path::Path;

use crate::errors::{NostrVaultError, Result};
use crate::prompt::Prompter;
use crate::secret::{strip_line_terminator, SecretKind};

use super::codec::VaultCodec;
use super::file::read_vault_file;

/// Where the guard is in its protocol for a given target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Nothing on disk at the target.
    Absent,
    /// A vault exists and the user has not yet agreed to replace it.
    PresentUnconfirmed,
    /// The user agreed; knowledge of the passphrase is still unproven.
    PresentConfirmed,
}

/// Terminal state when the guard lets the write go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// No file existed.
    Fresh,
    /// An existing vault was confirmed and successfully opened.
    Overwrite,
}

/// Gatekeeper for destructive writes to a vault path.
#[derive(Debug, Clone, Copy)]
pub struct OverwriteGuard<'a> {
    codec: &'a VaultCodec,
    kind: SecretKind,
}

impl<'a> OverwriteGuard<'a> {
    /// `kind` is what the existing vault is expected to hold; it is
    /// used to sanity-check files opened with an empty passphrase.
    pub fn new(codec: &'a VaultCodec, kind: SecretKind) -> Self {
        Self { codec, kind }
    }

    /// Initial state for `path`.
    pub fn state(path: &Path) -> GuardState {
        if path.exists() {
            GuardState::PresentUnconfirmed
        } else {
            GuardState::Absent
        }
    }

    /// Run the protocol to completion.
    ///
    /// Returns a `Clearance` when the caller may write, `UserAbort` when
    /// the overwrite was declined, and `DecryptionFailed` when the
    /// existing vault could not be opened.
    pub fn check(&self, path: &Path, prompter: &mut dyn Prompter) -> Result<Clearance> {
        let mut state = Self::state(path);
        loop {
            state = match state {
                GuardState::Absent => return Ok(Clearance::Fresh),
                GuardState::PresentUnconfirmed => {
                    let prompt = format!("{} already exists. Overwrite?", path.display());
                    if !prompter.confirm(&prompt, false)? {
                        tracing::debug!(path = %path.display(), "overwrite declined");
                        return Err(NostrVaultError::UserAbort);
                    }
                    GuardState::PresentConfirmed
                }
                GuardState::PresentConfirmed => {
                    self.prove_knowledge(path, prompter)?;
                    tracing::debug!(path = %path.display(), "overwrite authorised");
                    return Ok(Clearance::Overwrite);
                }
            };
        }
    }

    fn prove_knowledge(&self, path: &Path, prompter: &mut dyn Prompter) -> Result<()> {
        let passphrase = prompter.secret(&format!(
            "Enter the current passphrase of {} (empty if unencrypted)",
            path.display()
        ))?;
        let existing = read_vault_file(path)?;
        let plaintext = self.codec.decode(&existing, passphrase.as_bytes())?;

        // With no passphrase the file is taken as plaintext.  It only
        // counts as proof if it actually holds a secret of this kind.
        if passphrase.is_empty() {
            let text =
                std::str::from_utf8(&plaintext).map_err(|_| NostrVaultError::DecryptionFailed)?;
            self.kind
                .validate(strip_line_terminator(text))
                .map_err(|_| NostrVaultError::DecryptionFailed)?;
        }
        Ok(())
    }
}
