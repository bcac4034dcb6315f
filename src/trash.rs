//! Trash relocation for successfully-converted originals.
//!
//! Files are moved into a trash directory instead of being deleted. On a name
//! collision the incoming file gets an ISO-8601 timestamp appended to its base
//! name, so earlier occupants are never overwritten.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Handle to a trash directory.
///
/// The directory is an explicit value threaded in from configuration, so the
/// relocation logic can be exercised against a temporary directory in tests.
#[derive(Debug, Clone)]
pub struct Trash {
    dir: PathBuf,
}

impl Trash {
    /// Open a trash directory, creating it if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Get the trash directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Move a file into the trash directory and return its new path.
    ///
    /// If a file with the same name is already present, the incoming file is
    /// stored as `<stem> (<timestamp>)<ext>` instead.
    pub fn relocate(&self, file: &Path) -> Result<PathBuf> {
        let name = file
            .file_name()
            .ok_or_else(|| Error::InvalidInput(format!("no file name: {}", file.display())))?;

        let mut target = self.dir.join(name);
        if target.exists() {
            target = self.dir.join(timestamped_name(name));
        }

        move_file(file, &target)?;
        tracing::info!("Moved {} to trash", file.display());
        Ok(target)
    }
}

/// Append an ISO-8601 timestamp to the base name, before the extension.
fn timestamped_name(name: &std::ffi::OsStr) -> String {
    let stamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f");
    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .unwrap_or(name)
        .to_string_lossy()
        .into_owned();
    match as_path.extension() {
        Some(ext) => format!("{stem} ({stamp}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({stamp})"),
    }
}

/// Move a file, falling back to copy+remove when rename crosses filesystems.
pub(crate) fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}
