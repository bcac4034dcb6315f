//! Disk usage reporting.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One immediate child of the analyzed directory.
#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// Sizes of a directory's immediate children, largest first.
#[derive(Debug)]
pub struct UsageReport {
    pub root: PathBuf,
    pub entries: Vec<UsageEntry>,
    pub total: u64,
}

/// Size a file, treating inaccessible entries as empty.
fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Recursively sum the file sizes under a directory.
fn folder_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| file_size(e.path()))
        .sum()
}

/// Analyze disk usage for a directory.
///
/// Files are sized directly; subdirectories recursively. Entries that cannot
/// be read count as zero bytes rather than aborting the report.
pub fn analyze(directory: &Path) -> Result<UsageReport> {
    let root = directory
        .canonicalize()
        .with_context(|| format!("Directory not found: {}", directory.display()))?;

    let mut entries = Vec::new();
    let mut total = 0u64;

    let read = std::fs::read_dir(&root)
        .with_context(|| format!("Permission denied: {}", root.display()))?;

    for entry in read.filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_dir = path.is_dir();
        let size = if is_dir {
            folder_size(&path)
        } else {
            file_size(&path)
        };

        total += size;
        entries.push(UsageEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size,
            is_dir,
        });
    }

    entries.sort_by(|a, b| b.size.cmp(&a.size));

    Ok(UsageReport {
        root,
        entries,
        total,
    })
}

/// Render a byte count as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} PB")
}
