use assert_cmd::Command;
use predicates::prelude::*;

fn phonochart() -> Command {
    Command::cargo_bin("phonochart").unwrap()
}

#[test]
fn list_prints_builtin_catalog() {
    phonochart()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("vowels:"))
        .stdout(predicate::str::contains("/a/  sounds/sound_a.mp3"))
        .stdout(predicate::str::contains("/h/  sounds/sound_h.mp3"));
}

#[test]
fn list_reads_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"{"vowels": [{"symbol": "ə", "audio": "sounds/schwa.mp3"}], "consonants": []}"#,
    )
    .unwrap();

    phonochart()
        .arg("list")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("/ə/  sounds/schwa.mp3"))
        .stdout(predicate::str::contains("/a/").not());
}

#[test]
fn play_rejects_unknown_symbols() {
    phonochart()
        .args(["play", "a", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown symbol /zz/"));
}

#[test]
fn play_reports_missing_clips_and_keeps_going() {
    let assets = tempfile::tempdir().unwrap();
    phonochart()
        .arg("play")
        .arg("--assets-path")
        .arg(assets.path())
        .args(["--pause-ms", "0", "a", "b"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Played 0 of 2 clips"))
        .stderr(predicate::str::contains("2 clip(s) failed to play"));
}
