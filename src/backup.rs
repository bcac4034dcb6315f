//! Directory backups as timestamped tar.gz archives.

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::{Path, PathBuf};

/// Archive `source_dir` into `<backup_dir>/<name>_backup_<timestamp>.tar.gz`.
///
/// Archive entries are stored relative to the source root. The backup
/// directory is created if missing. Returns the path of the written archive.
pub fn backup_directory(source_dir: &Path, backup_dir: &Path) -> Result<PathBuf> {
    anyhow::ensure!(
        source_dir.exists(),
        "source directory {} does not exist",
        source_dir.display()
    );
    anyhow::ensure!(
        source_dir.is_dir(),
        "{} is not a directory",
        source_dir.display()
    );

    std::fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create {}", backup_dir.display()))?;

    let dir_name = source_dir
        .canonicalize()?
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".to_string());

    let timestamp = chrono::Local::now().format("%d-%m-%Y_%H%M%S");
    let archive_path = backup_dir.join(format!("{dir_name}_backup_{timestamp}.tar.gz"));

    let file = std::fs::File::create(&archive_path)
        .with_context(|| format!("Failed to create {}", archive_path.display()))?;
    let gz = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(gz);

    tar.append_dir_all(".", source_dir)
        .with_context(|| format!("Failed to archive {}", source_dir.display()))?;
    tar.into_inner()?.finish()?;

    tracing::info!("Backup completed: {}", archive_path.display());
    Ok(archive_path)
}
