use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Pbkdf2Params, DEFAULT_ITERATIONS};
use crate::errors::{NostrVaultError, Result};

/// User-level configuration, loaded from `<data_dir>/config.toml`.
///
/// Every field has a sensible default so nostrvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the seed vault inside the data directory.
    #[serde(default = "default_seed_file")]
    pub seed_file: String,

    /// File name of the private key vault inside the data directory.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// PBKDF2 iteration count.  Vaults must be opened with the count
    /// they were written with.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_seed_file() -> String {
    "seed".to_string()
}

fn default_key_file() -> String {
    "key".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
            key_file: default_key_file(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `path`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            NostrVaultError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(settings)
    }

    /// Default path of the seed vault.
    pub fn seed_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.seed_file)
    }

    /// Default path of the private key vault.
    pub fn key_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.key_file)
    }

    /// Validated KDF parameters.
    pub fn pbkdf2_params(&self) -> Result<Pbkdf2Params> {
        Pbkdf2Params::new(self.pbkdf2_iterations)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.seed_file, "seed");
        assert_eq!(s.key_file, "key");
        assert_eq!(s.pbkdf2_iterations, 10_000);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(&tmp.path().join(Settings::FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Settings::FILE_NAME);
        let config = r#"
seed_file = "main.seed"
key_file = "main.key"
pbkdf2_iterations = 600000
"#;
        fs::write(&path, config).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.seed_file, "main.seed");
        assert_eq!(settings.key_file, "main.key");
        assert_eq!(settings.pbkdf2_iterations, 600_000);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Settings::FILE_NAME);
        fs::write(&path, "key_file = \"alt\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.key_file, "alt");
        assert_eq!(settings.seed_file, "seed");
        assert_eq!(settings.pbkdf2_iterations, 10_000);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Settings::FILE_NAME);
        fs::write(&path, "not valid {{toml").unwrap();

        assert!(matches!(Settings::load(&path), Err(NostrVaultError::Config(_))));
    }

    #[test]
    fn low_iteration_count_is_rejected() {
        let s = Settings {
            pbkdf2_iterations: 10,
            ..Settings::default()
        };
        assert!(s.pbkdf2_params().is_err());
    }

    #[test]
    fn paths_are_built_inside_data_dir() {
        let s = Settings::default();
        let dir = Path::new("/home/user/.nostr");
        assert_eq!(s.seed_path(dir), PathBuf::from("/home/user/.nostr/seed"));
        assert_eq!(s.key_path(dir), PathBuf::from("/home/user/.nostr/key"));
    }
}
