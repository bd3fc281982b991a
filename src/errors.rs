use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in nostrvault.
#[derive(Debug, Error)]
pub enum NostrVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted vault")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    // --- Secret errors ---
    #[error("Invalid secret: {0}")]
    Validation(String),

    #[error("Passphrase mismatch — passphrases do not match")]
    PassphraseMismatch,

    #[error("Identity error: {0}")]
    Identity(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserAbort,
}

/// Convenience type alias for nostrvault results.
pub type Result<T> = std::result::Result<T, NostrVaultError>;
