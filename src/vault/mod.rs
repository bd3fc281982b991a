//! Vault module — persisted, possibly encrypted secrets.
//!
//! This module provides:
//! - The salt/nonce/ciphertext blob format (`codec`)
//! - Owner-only, atomic file I/O (`file`)
//! - The confirm-then-prove overwrite protocol (`guard`)

pub mod codec;
pub mod file;
pub mod guard;

pub use codec::VaultCodec;
pub use file::{read_vault_file, remove_file_if_exists, write_vault_file};
pub use guard::{Clearance, GuardState, OverwriteGuard};
