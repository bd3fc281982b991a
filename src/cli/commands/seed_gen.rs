//! `nostrvault seed-gen` — store a seed phrase in a vault.
//!
//! The phrase comes from `--seed`, from `--seed-file`, or is freshly
//! generated, in that order of precedence.

use crate::cli::output;
use crate::cli::{choose_target, SeedGenArgs};
use crate::config::Config;
use crate::errors::Result;
use crate::prompt::{prompt_new_passphrase, Prompter};
use crate::secret::{
    MnemonicGenerator, ResolutionSource, ResolveRequest, SecretKind, SecretResolver,
};
use crate::vault::{write_vault_file, OverwriteGuard};

/// Execute the `seed-gen` command.
pub fn execute(config: &Config, args: &SeedGenArgs, prompter: &mut dyn Prompter) -> Result<()> {
    let codec = config.codec();

    // 1. Work out which seed phrase we are storing.
    let request = ResolveRequest {
        kind: SecretKind::Seed,
        explicit: args.seed.as_deref(),
        source: args.seed_file.as_deref(),
    };
    let resolved = SecretResolver::new(codec).resolve(&request, prompter, &mut MnemonicGenerator)?;
    // An explicit `--seed` is taken as given; reject it here so we never
    // store a vault that `show` and `key-gen --from-seed` cannot read.
    SecretKind::Seed.validate(resolved.material.as_str())?;

    // 2. Pick the target file.
    let target = choose_target(
        prompter,
        args.output.as_deref(),
        &config.default_seed_path(),
        "seed phrase",
    )?;

    // 3. Never clobber an existing vault without proof of its passphrase.
    OverwriteGuard::new(codec, SecretKind::Seed).check(&target, prompter)?;

    // 4. Choose the passphrase for the new vault.
    let passphrase = prompt_new_passphrase(prompter)?;
    if passphrase.is_empty() {
        output::warning("No passphrase given — the seed phrase will be stored unencrypted.");
    }

    // 5. Encrypt and persist.
    let blob = codec.encode(resolved.material.as_bytes(), passphrase.as_bytes())?;
    write_vault_file(&target, &blob)?;

    output::success(&format!("Seed phrase saved to {}", target.display()));

    if resolved.source == ResolutionSource::Generated {
        println!("Seed phrase: {}", resolved.material.as_str());
        output::backup_banner(
            "This seed phrase is the key to your nostr identity! Keep it secret and back it up safely!",
        );
    }

    output::tip("Run `nostrvault key-gen --from-seed <file>` to derive your private key.");

    Ok(())
}
