//! Integration tests for the batch conversion pipeline.
//!
//! The external transcoder is replaced by a shell stub so tests exercise the
//! real enumerate -> dispatch -> convert -> trash flow without ffmpeg.

#![cfg(unix)]

use filesweep::config::Config;
use filesweep::convert::{BatchConverter, Direction, Outcome};
use filesweep::Error;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Stub that copies the input (the argument after `-i`) to the last argument.
const COPY_STUB: &str = "#!/bin/sh\nin=\"$2\"\nfor last in \"$@\"; do :; done\ncp \"$in\" \"$last\"\n";

/// Stub that always fails.
const FAIL_STUB: &str = "#!/bin/sh\nexit 1\n";

struct Sandbox {
    _root: TempDir,
    input: PathBuf,
    output: PathBuf,
    trash: PathBuf,
    config: Config,
}

fn sandbox(stub_script: &str) -> Sandbox {
    use std::os::unix::fs::PermissionsExt;

    let root = tempdir().unwrap();
    let input = root.path().join("library");
    let output = root.path().join("converted");
    let trash = root.path().join("trash");
    std::fs::create_dir_all(&input).unwrap();

    let stub = root.path().join("ffmpeg-stub");
    std::fs::write(&stub, stub_script).unwrap();
    std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut config = Config::default();
    config.trash_dir = trash.to_string_lossy().into_owned();
    config.tools.ffmpeg_path = Some(stub);

    Sandbox {
        _root: root,
        input,
        output,
        trash,
        config,
    }
}

fn write_source(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), format!("audio:{name}")).unwrap();
}

fn trash_entries(trash: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(trash)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn end_to_end_batch_conversion() {
    let sb = sandbox(COPY_STUB);
    write_source(&sb.input, "a.flac");
    write_source(&sb.input, "b.flac");
    write_source(&sb.input.join("nested"), "c.flac");

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    let summary = converter.run(&sb.input).await.unwrap();

    assert_eq!(summary.converted, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);

    // Destinations exist, flat in the output directory.
    assert!(sb.output.join("a.wav").exists());
    assert!(sb.output.join("b.wav").exists());
    assert!(sb.output.join("c.wav").exists());

    // Sources are gone from their original paths and live in the trash.
    assert!(!sb.input.join("a.flac").exists());
    assert!(!sb.input.join("b.flac").exists());
    assert!(!sb.input.join("nested/c.flac").exists());
    assert_eq!(trash_entries(&sb.trash).len(), 3);
}

#[tokio::test]
async fn rerun_with_existing_destinations_is_idempotent() {
    let sb = sandbox(COPY_STUB);
    write_source(&sb.input, "a.flac");

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    let first = converter.run(&sb.input).await.unwrap();
    assert_eq!(first.converted, 1);

    // The source reappears (say, restored from elsewhere); the destination
    // is already present, so nothing may be mutated this time.
    write_source(&sb.input, "a.flac");
    let dest_before = std::fs::read(sb.output.join("a.wav")).unwrap();

    let second = converter.run(&sb.input).await.unwrap();
    assert_eq!(second.converted, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.failed, 0);

    assert!(sb.input.join("a.flac").exists());
    assert_eq!(std::fs::read(sb.output.join("a.wav")).unwrap(), dest_before);
    assert_eq!(trash_entries(&sb.trash).len(), 1);
}

#[tokio::test]
async fn failed_conversion_preserves_source() {
    let sb = sandbox(FAIL_STUB);
    write_source(&sb.input, "a.flac");

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    let summary = converter.run(&sb.input).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(matches!(summary.outcomes[0], Outcome::Failed { .. }));

    assert!(sb.input.join("a.flac").exists());
    assert!(!sb.output.join("a.wav").exists());
    assert!(trash_entries(&sb.trash).is_empty());
}

#[tokio::test]
async fn trash_collision_keeps_both_originals() {
    let sb = sandbox(COPY_STUB);
    write_source(&sb.input, "a.flac");

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    converter.run(&sb.input).await.unwrap();

    // Same-named source shows up again; clear its destination so it converts
    // and its original collides with the one already in the trash.
    write_source(&sb.input, "a.flac");
    std::fs::remove_file(sb.output.join("a.wav")).unwrap();

    let summary = converter.run(&sb.input).await.unwrap();
    assert_eq!(summary.converted, 1);

    let entries = trash_entries(&sb.trash);
    assert_eq!(entries.len(), 2, "trash entries: {entries:?}");
    assert!(entries.contains(&"a.flac".to_string()));
    let timestamped = entries.iter().find(|n| n.as_str() != "a.flac").unwrap();
    assert!(timestamped.starts_with("a ("), "unexpected name: {timestamped}");
    assert!(
        timestamped.ends_with(".flac"),
        "unexpected name: {timestamped}"
    );
}

#[tokio::test]
async fn wav_to_flac_direction() {
    let sb = sandbox(COPY_STUB);
    write_source(&sb.input, "take.wav");
    // A flac in the tree must not be picked up in this direction.
    write_source(&sb.input, "other.flac");

    let converter = BatchConverter::new(&sb.config, Direction::WavToFlac, &sb.output).unwrap();
    let summary = converter.run(&sb.input).await.unwrap();

    assert_eq!(summary.converted, 1);
    assert!(sb.output.join("take.flac").exists());
    assert!(sb.input.join("other.flac").exists());
}

#[tokio::test]
async fn missing_input_directory_fails_before_any_work() {
    let sb = sandbox(COPY_STUB);

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    let result = converter.run(&sb.input.join("absent")).await;

    assert!(matches!(result, Err(Error::NotADirectory { .. })));
    assert!(!sb.output.exists());
    assert!(trash_entries(&sb.trash).is_empty());
}

#[tokio::test]
async fn empty_input_tree_yields_empty_summary() {
    let sb = sandbox(COPY_STUB);

    let converter = BatchConverter::new(&sb.config, Direction::FlacToWav, &sb.output).unwrap();
    let summary = converter.run(&sb.input).await.unwrap();

    assert_eq!(summary.total(), 0);
    assert_eq!(summary.converted, 0);
}
