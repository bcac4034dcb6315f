//! Conversion worker: transcodes exactly one file.

use super::Direction;
use crate::trash::Trash;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Terminal state of one work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Destination written, original swept into the trash.
    Converted {
        source: PathBuf,
        dest: PathBuf,
        trashed: PathBuf,
    },
    /// Destination already existed; nothing was touched.
    Skipped { source: PathBuf, dest: PathBuf },
    /// Transcoding (or relocation) failed; the original is left in place.
    Failed { source: PathBuf, reason: String },
}

/// Convert a single source file into `output_dir`.
///
/// The destination is claimed with an atomic create-exclusive open before
/// the transcoder runs, so two workers racing on the same output name cannot
/// both proceed: the loser sees the claim and skips. On a non-zero transcoder
/// exit the claimed placeholder is removed again, leaving no destination
/// file behind.
pub fn convert_file(
    transcoder: &Path,
    direction: Direction,
    source: &Path,
    output_dir: &Path,
    trash: &Trash,
) -> Outcome {
    tracing::info!("Converting: {}", source.display());

    let Some(stem) = source.file_stem() else {
        return Outcome::Failed {
            source: source.to_path_buf(),
            reason: "source has no file name".to_string(),
        };
    };
    let dest = output_dir.join(format!(
        "{}.{}",
        stem.to_string_lossy(),
        direction.target_ext()
    ));

    // Claim the destination exclusively; losing the claim is a skip.
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&dest)
    {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::info!("{} already exists, skipping", dest.display());
            return Outcome::Skipped {
                source: source.to_path_buf(),
                dest,
            };
        }
        Err(e) => {
            return Outcome::Failed {
                source: source.to_path_buf(),
                reason: format!("failed to claim destination {}: {}", dest.display(), e),
            };
        }
    }

    let status = Command::new(transcoder)
        .args(direction.transcode_args(source, &dest))
        .status();

    match status {
        Ok(status) if status.success() => match trash.relocate(source) {
            Ok(trashed) => {
                tracing::info!("Converted {} -> {}", source.display(), dest.display());
                Outcome::Converted {
                    source: source.to_path_buf(),
                    dest,
                    trashed,
                }
            }
            Err(e) => {
                // The conversion itself succeeded; keep the destination.
                tracing::warn!("Converted but failed to trash {}: {}", source.display(), e);
                Outcome::Failed {
                    source: source.to_path_buf(),
                    reason: format!("failed to move original to trash: {e}"),
                }
            }
        },
        Ok(status) => {
            let _ = std::fs::remove_file(&dest);
            tracing::error!("Transcoder failed on {}: {}", source.display(), status);
            Outcome::Failed {
                source: source.to_path_buf(),
                reason: format!("transcoder exited with {status}"),
            }
        }
        Err(e) => {
            let _ = std::fs::remove_file(&dest);
            tracing::error!("Failed to run transcoder on {}: {}", source.display(), e);
            Outcome::Failed {
                source: source.to_path_buf(),
                reason: format!("failed to run transcoder: {e}"),
            }
        }
    }
}
