//! `nostrvault key-gen` — store a private key together with its public key.
//!
//! The key comes from `--key`, from `--key-file`, or is generated: derived
//! from a seed vault with `--from-seed`, random otherwise.
//!
//! Files written for `<OUT>`:
//!   <OUT>       private key vault (hex, encrypted unless no passphrase)
//!   <OUT>.pub   hex x-only public key
//!   <OUT>.npub  bech32 public identifier
//!
//! The public files are written only after the private vault; if either
//! fails, every file of the pair is removed again.

use std::path::Path;

use crate::cli::output;
use crate::cli::{choose_target, sibling_path, KeyGenArgs};
use crate::config::Config;
use crate::errors::Result;
use crate::identity;
use crate::prompt::{prompt_new_passphrase, Prompter};
use crate::secret::{
    RandomKeyGenerator, ResolveRequest, SecretGenerator, SecretKind, SecretResolver,
    SeedDerivedKeyGenerator,
};
use crate::vault::{remove_file_if_exists, write_vault_file, OverwriteGuard};

/// Execute the `key-gen` command.
pub fn execute(config: &Config, args: &KeyGenArgs, prompter: &mut dyn Prompter) -> Result<()> {
    let codec = config.codec();

    // 1. Work out which private key we are storing.
    let mut generator: Box<dyn SecretGenerator + '_> = match &args.from_seed {
        Some(seed_path) => Box::new(SeedDerivedKeyGenerator::new(codec, seed_path, args.account)),
        None => Box::new(RandomKeyGenerator),
    };
    let request = ResolveRequest {
        kind: SecretKind::Key,
        explicit: args.key.as_deref(),
        source: args.key_file.as_deref(),
    };
    let resolved = SecretResolver::new(codec).resolve(&request, prompter, generator.as_mut())?;

    // 2. Derive the public half before anything touches the disk.
    let key = identity::parse_private_key(resolved.material.as_str())?;
    let public = identity::public_key(&key)?;
    let public_hex = hex::encode(public);
    let npub = identity::encode_npub(&public)?;

    // 3. Pick the target file and guard any existing vault.
    let target = choose_target(
        prompter,
        args.output.as_deref(),
        &config.default_key_path(),
        "private key",
    )?;
    OverwriteGuard::new(codec, SecretKind::Key).check(&target, prompter)?;

    // 4. Choose the passphrase for the new vault.
    let passphrase = prompt_new_passphrase(prompter)?;
    if passphrase.is_empty() {
        output::warning("No passphrase given — the private key will be stored unencrypted.");
    }

    // 5. Persist the private key, then the public artifacts.
    let blob = codec.encode(key.to_hex().as_bytes(), passphrase.as_bytes())?;
    write_vault_file(&target, &blob)?;
    write_public_artifacts(&target, &public_hex, &npub)?;

    output::success(&format!("Private key saved to {}", target.display()));
    println!("Public key: {public_hex}");
    println!("npub: {npub}");

    Ok(())
}

/// Write `<private>.pub` and `<private>.npub`, rolling the whole pair
/// back if either write fails.
pub fn write_public_artifacts(private_path: &Path, public_hex: &str, npub: &str) -> Result<()> {
    let pub_path = sibling_path(private_path, "pub");
    let npub_path = sibling_path(private_path, "npub");

    let written = write_vault_file(&pub_path, format!("{public_hex}\n").as_bytes())
        .and_then(|()| write_vault_file(&npub_path, format!("{npub}\n").as_bytes()));

    if let Err(e) = written {
        output::warning("Could not write the public key; removing the private key vault.");
        for path in [npub_path.as_path(), pub_path.as_path(), private_path] {
            if let Err(cleanup) = remove_file_if_exists(path) {
                tracing::warn!(path = %path.display(), error = %cleanup, "rollback failed");
            }
        }
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::Settings;
    use crate::prompt::{Answer, ScriptedPrompter};

    const PRIVATE: &str = "7f7ff03d123792d6ac594bfa67bf6d0c0ab55b6b1fdb6249303fe861f1ccba9a";
    const PUBLIC: &str = "17162c921dc4d2518f9a101db33695df1afb56ab82f5ff3e5da6eec3ca5cd917";

    fn config(dir: &TempDir) -> Config {
        let settings = Settings {
            pbkdf2_iterations: 1_000,
            ..Settings::default()
        };
        Config::new(dir.path(), settings).unwrap()
    }

    #[test]
    fn writes_private_vault_and_public_pair() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let target = dir.path().join("key");
        let args = KeyGenArgs {
            key: Some(PRIVATE.into()),
            output: Some(target.clone()),
            ..KeyGenArgs::default()
        };
        let mut p = ScriptedPrompter::new([
            Answer::Secret("pw".into()),
            Answer::Secret("pw".into()),
        ]);

        execute(&cfg, &args, &mut p).unwrap();

        let plain = cfg.codec().decode(&fs::read(&target).unwrap(), b"pw").unwrap();
        assert_eq!(plain.as_slice(), PRIVATE.as_bytes());
        assert_eq!(
            fs::read_to_string(dir.path().join("key.pub")).unwrap().trim(),
            PUBLIC
        );
        assert!(fs::read_to_string(dir.path().join("key.npub"))
            .unwrap()
            .starts_with("npub1"));
    }

    #[test]
    fn malformed_explicit_key_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let target = dir.path().join("key");
        let args = KeyGenArgs {
            key: Some("zz".into()),
            output: Some(target.clone()),
            ..KeyGenArgs::default()
        };
        let mut p = ScriptedPrompter::default();

        assert!(execute(&cfg, &args, &mut p).is_err());
        assert!(!target.exists());
        assert!(p.asked().is_empty());
    }

    #[test]
    fn failed_public_write_rolls_back_private_vault() {
        let dir = TempDir::new().unwrap();
        let private = dir.path().join("key");
        fs::write(&private, "vault").unwrap();
        // A directory where the .pub file should go makes that write fail.
        fs::create_dir(dir.path().join("key.pub")).unwrap();

        let result = write_public_artifacts(&private, PUBLIC, "npub1xyz");

        assert!(result.is_err());
        assert!(!private.exists());
        assert!(!dir.path().join("key.npub").exists());
    }
}
