//! Organize a directory's files into category folders by extension.

use crate::config::OrganizeConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// What an organize pass did.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrganizeSummary {
    /// Files moved into a category folder.
    pub moved: usize,
    /// Files left alone (no matching category, or target name taken).
    pub skipped: usize,
}

/// Move the files directly inside `dir` into category subfolders.
///
/// Only the top level is considered; subdirectories are never entered or
/// moved. A file whose extension matches no category stays where it is, as
/// does a file whose name is already taken inside its category folder.
pub fn organize_dir(dir: &Path, config: &OrganizeConfig) -> Result<OrganizeSummary> {
    anyhow::ensure!(dir.is_dir(), "{} is not a valid directory", dir.display());

    let entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;

    let mut summary = OrganizeSummary::default();

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let Some(category) = extension.as_deref().and_then(|e| config.category_for(e)) else {
            summary.skipped += 1;
            continue;
        };

        let target_dir = dir.join(category);
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;

        let file_name = entry.file_name();
        let target = target_dir.join(&file_name);
        if target.exists() {
            tracing::warn!(
                "Not moving {}: target already exists in {}",
                file_name.to_string_lossy(),
                category
            );
            summary.skipped += 1;
            continue;
        }

        std::fs::rename(&path, &target)
            .with_context(|| format!("Failed to move {}", path.display()))?;
        tracing::info!("Moved: {} -> {}", file_name.to_string_lossy(), category);
        summary.moved += 1;
    }

    Ok(summary)
}
