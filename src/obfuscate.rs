//! In-place file obfuscation with a password-derived XOR key.
//!
//! Not cryptography: a repeating 32-byte XOR keystream hides content from
//! casual inspection only. The operation is its own inverse, so running it
//! twice with the same password restores the file.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Derive a 32-byte key from a password.
pub fn derive_key(password: &str) -> [u8; 32] {
    let digest = Sha256::digest(password.as_bytes());
    digest.into()
}

/// XOR `data` in place with a repeating key.
pub fn apply_key(data: &mut [u8], key: &[u8]) {
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}

/// Obfuscate (or de-obfuscate) a file in place.
pub fn obfuscate_file(path: &Path, password: &str) -> Result<()> {
    anyhow::ensure!(path.is_file(), "{} is not a file", path.display());

    let key = derive_key(password);
    let mut data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    apply_key(&mut data, &key);
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Rewrote {}", path.display());
    Ok(())
}
