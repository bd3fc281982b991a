//! `nostrvault pubkey` — print the public key of a private key vault.

use crate::cli::PubkeyArgs;
use crate::config::Config;
use crate::errors::Result;
use crate::identity;
use crate::prompt::Prompter;
use crate::secret::{SecretKind, SecretResolver};

/// Hex public key and npub for the vault named by `args`.
pub fn public_identity(
    config: &Config,
    args: &PubkeyArgs,
    prompter: &mut dyn Prompter,
) -> Result<(String, String)> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| config.default_key_path());

    let material =
        SecretResolver::new(config.codec()).read_source(SecretKind::Key, &path, prompter)?;
    let key = identity::parse_private_key(material.as_str())?;
    let public = identity::public_key(&key)?;
    Ok((hex::encode(public), identity::encode_npub(&public)?))
}

/// Execute the `pubkey` command.
pub fn execute(config: &Config, args: &PubkeyArgs, prompter: &mut dyn Prompter) -> Result<()> {
    let (public_hex, npub) = public_identity(config, args, prompter)?;
    println!("Public key: {public_hex}");
    println!("npub: {npub}");
    Ok(())
}
