//! Source file discovery.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect the files under `root` whose extension matches
/// `extension`, case-insensitively.
///
/// Ordering is whatever the filesystem yields. Entries that cannot be read
/// are skipped; a vanished file surfaces later as a worker-level failure, not
/// here. Callers validate that `root` exists beforehand, so a missing root
/// simply yields nothing.
pub fn find_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);

        if matches {
            found.push(entry.into_path());
        }
    }

    found
}
