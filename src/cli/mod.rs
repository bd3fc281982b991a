//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::errors::Result;
use crate::prompt::Prompter;
use crate::secret::SecretKind;

/// nostrvault CLI: generate and safely store nostr secrets.
#[derive(Parser)]
#[command(
    name = "nostrvault",
    about = "Generate and safely store nostr seed phrases and private keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding vaults and config.toml (default: ~/.nostr)
    #[arg(long, env = "NOSTRVAULT_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a settings file (default: <data-dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate or import a seed phrase and store it in a vault
    SeedGen(SeedGenArgs),

    /// Generate, import or derive a private key and store it with its public key
    KeyGen(KeyGenArgs),

    /// Decrypt a vault and print the secret it holds
    Show(ShowArgs),

    /// Print the public key of a private key vault
    Pubkey(PubkeyArgs),
}

#[derive(Debug, Default, clap::Args)]
pub struct SeedGenArgs {
    /// Seed phrase to store instead of generating one
    #[arg(short, long, conflicts_with = "seed_file")]
    pub seed: Option<String>,

    /// Read the seed phrase from this (possibly encrypted) file
    #[arg(short = 'f', long)]
    pub seed_file: Option<PathBuf>,

    /// Where to save the seed vault (prompted if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, clap::Args)]
pub struct KeyGenArgs {
    /// Private key (hex or nsec) to store instead of generating one
    #[arg(short, long, conflicts_with = "key_file")]
    pub key: Option<String>,

    /// Read the private key from this (possibly encrypted) file
    #[arg(short = 'f', long)]
    pub key_file: Option<PathBuf>,

    /// Derive the key from this seed vault (NIP-06) instead of at random
    #[arg(long)]
    pub from_seed: Option<PathBuf>,

    /// NIP-06 account index used with --from-seed
    #[arg(long, default_value_t = 0, requires = "from_seed")]
    pub account: u32,

    /// Where to save the private key vault (prompted if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Vault to open (default: the configured vault for --kind)
    pub path: Option<PathBuf>,

    /// What the vault holds
    #[arg(long, value_enum, default_value_t = SecretKind::Seed)]
    pub kind: SecretKind,
}

#[derive(Debug, Default, clap::Args)]
pub struct PubkeyArgs {
    /// Private key vault (default: the configured key vault)
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Pick the file to write: the explicit path if given, otherwise ask,
/// offering `default`.
pub fn choose_target(
    prompter: &mut dyn Prompter,
    explicit: Option<&Path>,
    default: &Path,
    what: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let default_display = default.display().to_string();
    let answer = prompter.input(
        &format!("Enter filename to save {what}"),
        Some(&default_display),
    )?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_path_buf())
    } else {
        Ok(PathBuf::from(answer))
    }
}

/// `<path>.<suffix>`, keeping any existing extension.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};

    #[test]
    fn seed_and_seed_file_conflict() {
        let result = Cli::try_parse_from(["nostrvault", "seed-gen", "-s", "a b c", "-f", "seed"]);
        assert!(result.is_err());
    }

    #[test]
    fn account_requires_from_seed() {
        let result = Cli::try_parse_from(["nostrvault", "key-gen", "--account", "2"]);
        assert!(result.is_err());

        let cli =
            Cli::try_parse_from(["nostrvault", "key-gen", "--from-seed", "seed", "--account", "2"])
                .unwrap();
        match cli.command {
            Commands::KeyGen(args) => assert_eq!(args.account, 2),
            _ => panic!("expected key-gen"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nostrvault",
            "show",
            "--kind",
            "key",
            "--data-dir",
            "/tmp/nostr",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/nostr")));
        match cli.command {
            Commands::Show(args) => assert_eq!(args.kind, SecretKind::Key),
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn choose_target_prefers_explicit_path() {
        let mut p = ScriptedPrompter::default();
        let path = choose_target(&mut p, Some(Path::new("/x/seed")), Path::new("/d"), "seed")
            .unwrap();
        assert_eq!(path, PathBuf::from("/x/seed"));
        assert!(p.asked().is_empty());
    }

    #[test]
    fn choose_target_falls_back_to_default() {
        let mut p = ScriptedPrompter::new([Answer::Text(String::new())]);
        let path = choose_target(&mut p, None, Path::new("/home/u/.nostr/seed"), "seed").unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.nostr/seed"));
    }

    #[test]
    fn sibling_path_appends_suffix() {
        assert_eq!(sibling_path(Path::new("/a/key"), "pub"), PathBuf::from("/a/key.pub"));
        assert_eq!(
            sibling_path(Path::new("/a/main.key"), "npub"),
            PathBuf::from("/a/main.key.npub")
        );
    }
}
