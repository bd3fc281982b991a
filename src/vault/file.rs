//! Reading and writing vault files on disk.
//!
//! Writes go to a uniquely named temp file in the target's directory that
//! is renamed over the target, so an interrupted write never leaves a
//! half-written vault behind.  On Unix the file is owner read/write only
//! and a freshly created parent directory is owner-only.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::{NostrVaultError, Result};

/// Read the raw bytes of a vault file.
pub fn read_vault_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(NostrVaultError::VaultNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Replace the vault at `path` with `bytes`.
pub fn write_vault_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        create_private_dir(dir)?;
    }

    // Unique name in the target directory; dropped (and removed) on error.
    let mut tmp = NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), len = bytes.len(), "wrote vault file");
    Ok(())
}

/// Delete `path` if it exists.  Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Create `dir` (and any missing ancestors) with owner-only access.
pub fn create_private_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)?;
    Ok(())
}
