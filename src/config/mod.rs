//! Per-invocation configuration.
//!
//! `Config` is built once from the command line and the settings file,
//! then passed by reference to every command.  Nothing reads global
//! state after that point.

pub mod settings;

use std::path::{Path, PathBuf};

pub use settings::Settings;

use crate::errors::{NostrVaultError, Result};
use crate::vault::VaultCodec;

/// Name of the data directory under the user's home.
pub const DATA_DIR_NAME: &str = ".nostr";

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    settings: Settings,
    codec: VaultCodec,
}

impl Config {
    /// Build a config from an explicit data directory and settings.
    pub fn new(data_dir: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        let codec = VaultCodec::new(settings.pbkdf2_params()?);
        Ok(Self {
            data_dir: data_dir.into(),
            settings,
            codec,
        })
    }

    /// Resolve the data directory and load settings.
    ///
    /// `data_dir` falls back to `~/.nostr`; `config_file` falls back to
    /// `<data_dir>/config.toml`.
    pub fn load(data_dir: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };
        let config_file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join(Settings::FILE_NAME));

        let settings = Settings::load(&config_file)?;
        tracing::debug!(
            data_dir = %data_dir.display(),
            config = %config_file.display(),
            iterations = settings.pbkdf2_iterations,
            "loaded configuration"
        );
        Self::new(data_dir, settings)
    }

    pub fn codec(&self) -> &VaultCodec {
        &self.codec
    }

    pub fn default_seed_path(&self) -> PathBuf {
        self.settings.seed_path(&self.data_dir)
    }

    pub fn default_key_path(&self) -> PathBuf {
        self.settings.key_path(&self.data_dir)
    }
}

/// `<home>/.nostr`
pub fn default_data_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
        .ok_or_else(|| NostrVaultError::Config("could not determine home directory".into()))
}
