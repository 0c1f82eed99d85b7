use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

#[test]
fn prints_chunks_as_json() {
    let output = Command::cargo_bin("lingochunk")
        .unwrap()
        .arg(fixture("lesson.json"))
        .args(["--min-chunk-ms", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let chunks: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(chunks.len(), 5);
    assert_eq!(chunks[0]["orderIndex"], 0);
    assert_eq!(chunks[0]["displayText"], "Good morning, everyone.");
    assert_eq!(chunks[4]["endMs"], 8300);
}

#[test]
fn reads_options_file_and_stdin() {
    let mut options = tempfile::NamedTempFile::new().unwrap();
    write!(options, r#"{{"minChunkMs": 2000, "strategy": "two-pointer"}}"#).unwrap();
    let transcript = std::fs::read_to_string(fixture("lesson.json")).unwrap();

    Command::cargo_bin("lingochunk")
        .unwrap()
        .arg("-")
        .arg("--options-file")
        .arg(options.path())
        .write_stdin(transcript)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"orderIndex\":1"))
        .stdout(predicate::str::contains("\"orderIndex\":2").not());
}

#[test]
fn rejects_missing_transcript() {
    Command::cargo_bin("lingochunk")
        .unwrap()
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn rejects_invalid_timestamps() {
    let mut transcript = tempfile::NamedTempFile::new().unwrap();
    write!(
        transcript,
        r#"{{"segments": [{{"start": 2.0, "end": 1.0, "text": "Backwards."}}], "words": []}}"#
    )
    .unwrap();

    Command::cargo_bin("lingochunk")
        .unwrap()
        .arg(transcript.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}
