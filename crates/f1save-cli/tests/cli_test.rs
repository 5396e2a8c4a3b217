//! Integration tests for the f1save CLI

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use f1save_formats::SaveFormat;
use f1save_formats::container::{SaveContainer, SegmentKind, SegmentMap};
use f1save_formats::signature::SIGNATURE;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sample_save() -> SaveContainer {
    let mut preamble = b"GVAS header bytes".to_vec();
    preamble.extend_from_slice(&SIGNATURE);
    preamble.extend_from_slice(&[0x10, 0x00, 0x00, 0x00]);

    let mut segments = SegmentMap::new();
    segments.insert(SegmentKind::Main, b"SQLite format 3\0main".repeat(50));
    segments.insert(SegmentKind::Backup1, b"SQLite format 3\0backup".repeat(20));
    SaveContainer::new(preamble, segments)
}

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("career.sav");
    fs::write(&path, sample_save().build().unwrap()).unwrap();
    path
}

fn f1save(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("f1save").unwrap();
    cmd.current_dir(dir)
        .env_remove("F1SAVE_WORK_DIR")
        .env_remove("F1SAVE_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    let temp = TempDir::new().unwrap();
    f1save(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("unpack"))
        .stdout(predicate::str::contains("repack"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_version_command() {
    let temp = TempDir::new().unwrap();
    f1save(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("f1save"));
}

#[test]
fn test_unpack_writes_workspace() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());

    f1save(temp.path())
        .args(["unpack", "--backup"])
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unpacked"));

    let work = temp.path().join("unpacked_save");
    let expected = sample_save();
    assert_eq!(fs::read(work.join("chunk1")).unwrap(), expected.preamble);
    assert_eq!(
        fs::read(work.join("main.db")).unwrap(),
        expected.segment(SegmentKind::Main).unwrap()
    );
    assert_eq!(
        fs::read(work.join("backup1.db")).unwrap(),
        expected.segment(SegmentKind::Backup1).unwrap()
    );
    assert!(!work.join("backup2.db").exists());
    assert!(temp.path().join("career.sav.bak").exists());
}

#[test]
fn test_unpack_then_repack_round_trip() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());

    f1save(temp.path()).arg("unpack").arg(&save).assert().success();

    // Edit the main database in place
    let work = temp.path().join("unpacked_save");
    fs::write(work.join("main.db"), b"edited database").unwrap();

    f1save(temp.path())
        .arg("repack")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("career.repacked.sav"));

    let repacked = fs::read(temp.path().join("career.repacked.sav")).unwrap();
    let parsed = SaveContainer::parse(&repacked).unwrap();
    assert_eq!(parsed.preamble, sample_save().preamble);
    assert_eq!(
        parsed.segment(SegmentKind::Main),
        Some(&b"edited database"[..])
    );
    assert_eq!(
        parsed.segment(SegmentKind::Backup1),
        sample_save().segment(SegmentKind::Backup1)
    );
}

#[test]
fn test_repack_custom_work_dir_and_output() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());
    let work = temp.path().join("parts");
    let output = temp.path().join("out.sav");

    f1save(temp.path())
        .arg("--work-dir")
        .arg(&work)
        .arg("unpack")
        .arg(&save)
        .assert()
        .success();

    f1save(temp.path())
        .env("F1SAVE_WORK_DIR", &work)
        .arg("repack")
        .arg(&save)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read(&output).unwrap(), fs::read(&save).unwrap());
}

#[test]
fn test_repack_missing_workspace() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());

    f1save(temp.path())
        .arg("repack")
        .arg(&save)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot find unpacked save"));
}

#[test]
fn test_repack_missing_main() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());
    f1save(temp.path()).arg("unpack").arg(&save).assert().success();
    fs::remove_file(temp.path().join("unpacked_save/main.db")).unwrap();

    f1save(temp.path())
        .arg("repack")
        .arg(&save)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required part: main"));
}

#[test]
fn test_unpack_rejects_non_save() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, b"just some text").unwrap();

    f1save(temp.path())
        .arg("unpack")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("signature not found"));
    assert!(!temp.path().join("unpacked_save").exists());
}

#[test]
fn test_info_and_verify() {
    let temp = TempDir::new().unwrap();
    let save = write_sample(temp.path());

    f1save(temp.path())
        .arg("info")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("main:"))
        .stdout(predicate::str::contains("1000 bytes"))
        .stdout(predicate::str::contains("absent"));

    f1save(temp.path())
        .arg("verify")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}
