//! `nostrvault show` — decrypt a vault and print its secret.

use crate::cli::output;
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::errors::Result;
use crate::prompt::Prompter;
use crate::secret::{SecretKind, SecretMaterial, SecretResolver};

/// Open the vault named by `args` and return its validated content.
pub fn reveal(
    config: &Config,
    args: &ShowArgs,
    prompter: &mut dyn Prompter,
) -> Result<SecretMaterial> {
    let path = match &args.path {
        Some(p) => p.clone(),
        None => match args.kind {
            SecretKind::Seed => config.default_seed_path(),
            SecretKind::Key => config.default_key_path(),
        },
    };

    let material = SecretResolver::new(config.codec()).read_source(args.kind, &path, prompter)?;
    args.kind.validate(material.as_str())?;
    Ok(material)
}

/// Execute the `show` command.
pub fn execute(config: &Config, args: &ShowArgs, prompter: &mut dyn Prompter) -> Result<()> {
    let material = reveal(config, args, prompter)?;
    output::warning(&format!(
        "Printing your {} — make sure nobody is watching.",
        args.kind
    ));
    println!("{}", material.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::Settings;
    use crate::errors::NostrVaultError;
    use crate::prompt::{Answer, ScriptedPrompter};

    const PHRASE: &str =
        "leader monkey parrot ring guide accident before fence cannon height naive bean";

    fn config(dir: &TempDir) -> Config {
        let settings = Settings {
            pbkdf2_iterations: 1_000,
            ..Settings::default()
        };
        Config::new(dir.path(), settings).unwrap()
    }

    #[test]
    fn reveals_default_seed_vault() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let blob = cfg.codec().encode(PHRASE.as_bytes(), b"pw").unwrap();
        fs::write(cfg.default_seed_path(), blob).unwrap();

        let args = ShowArgs {
            path: None,
            kind: SecretKind::Seed,
        };
        let mut p = ScriptedPrompter::new([Answer::Secret("pw".into())]);
        assert_eq!(reveal(&cfg, &args, &mut p).unwrap().as_str(), PHRASE);
    }

    #[test]
    fn plaintext_of_wrong_kind_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        fs::write(cfg.default_key_path(), PHRASE).unwrap();

        let args = ShowArgs {
            path: None,
            kind: SecretKind::Key,
        };
        let mut p = ScriptedPrompter::new([Answer::Secret(String::new())]);
        assert!(matches!(
            reveal(&cfg, &args, &mut p),
            Err(NostrVaultError::Validation(_))
        ));
    }

    #[test]
    fn missing_vault_is_reported() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let args = ShowArgs {
            path: Some(dir.path().join("absent")),
            kind: SecretKind::Seed,
        };
        let mut p = ScriptedPrompter::new([Answer::Secret("pw".into())]);
        assert!(matches!(
            reveal(&cfg, &args, &mut p),
            Err(NostrVaultError::VaultNotFound(_))
        ));
    }
}
