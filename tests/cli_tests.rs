//! End-to-end CLI tests for the `note` binary.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ===========================================
// new / ls
// ===========================================

#[test]
fn new_then_ls_shows_the_note() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Shopping List\nmilk eggs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"));

    let output = env.cmd().dir(env.notes_dir()).args(["ls"]).output_success();
    assert!(output.contains("Shopping List"));
}

#[test]
fn new_without_content_uses_fallback_title() {
    let env = TestEnv::new();

    env.cmd().dir(env.notes_dir()).args(["new"]).assert().success();

    let output = env.cmd().dir(env.notes_dir()).args(["ls"]).output_success();
    assert!(output.contains("Untitled Note"));
}

#[test]
fn new_with_content_renames_file_to_title() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Travel plans\npack bags"])
        .assert()
        .success();

    assert!(env.notes_dir().join("Travel plans.md").exists());
}

#[test]
fn ls_json_emits_note_fields() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Json note\none two three"])
        .assert()
        .success();

    let value = env
        .cmd()
        .dir(env.notes_dir())
        .args(["ls", "--format", "json"])
        .output_json();

    let items = value.as_array().expect("ls --format json is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Json note");
    assert_eq!(items[0]["word_count"], 5);
    assert_eq!(items[0]["is_pinned"], false);
    assert!(items[0]["id"].is_string());
}

#[test]
fn ls_on_empty_directory_prints_nothing() {
    let env = TestEnv::new();

    let output = env.cmd().dir(env.notes_dir()).args(["ls"]).output_success();
    assert!(output.is_empty());
}

// ===========================================
// pin / rm / write / retitle
// ===========================================

#[test]
fn pin_toggles_and_shows_in_listing() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Pin target"])
        .assert()
        .success();

    env.cmd()
        .dir(env.notes_dir())
        .args(["pin", "Pin target"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pinned:"));

    let value = env
        .cmd()
        .dir(env.notes_dir())
        .args(["ls", "--format", "json"])
        .output_json();
    assert_eq!(value[0]["is_pinned"], true);

    env.cmd()
        .dir(env.notes_dir())
        .args(["pin", "Pin target"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unpinned:"));
}

#[test]
fn rm_deletes_the_note() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Doomed note"])
        .assert()
        .success();

    env.cmd()
        .dir(env.notes_dir())
        .args(["rm", "Doomed note"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted:"));

    let output = env.cmd().dir(env.notes_dir()).args(["ls"]).output_success();
    assert!(output.is_empty());
}

#[test]
fn rm_of_unknown_note_fails_with_message() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["rm", "no such note"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found"));
}

#[test]
fn write_with_empty_content_deletes_the_note() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Ephemeral"])
        .assert()
        .success();

    env.cmd()
        .dir(env.notes_dir())
        .args(["write", "Ephemeral", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted emptied note"));

    let output = env.cmd().dir(env.notes_dir()).args(["ls"]).output_success();
    assert!(output.is_empty());
}

#[test]
fn retitle_moves_file_to_match_new_first_line() {
    let env = TestEnv::new();

    env.cmd()
        .dir(env.notes_dir())
        .args(["new", "Old name"])
        .assert()
        .success();

    env.cmd()
        .dir(env.notes_dir())
        .args(["write", "Old name", "New name\nbody"])
        .assert()
        .success();

    env.cmd()
        .dir(env.notes_dir())
        .args(["retitle", "New name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed:"));

    assert!(env.notes_dir().join("New name.md").exists());
    assert!(!env.notes_dir().join("Old name.md").exists());
}

// ===========================================
// storage location commands
// ===========================================

#[test]
fn dir_prints_the_override_directory() {
    let env = TestEnv::new();

    let output = env.cmd().dir(env.notes_dir()).args(["dir"]).output_success();
    assert_eq!(output.trim(), env.notes_dir().to_string_lossy());
}

#[test]
fn set_dir_then_migrate_moves_note_files() {
    let env = TestEnv::new();
    let chosen = env.path("chosen");
    let target = env.path("target");
    std::fs::create_dir_all(&chosen).unwrap();

    // Persist a custom directory, create a note there, then migrate it.
    env.cmd()
        .args(["set-dir", chosen.to_str().unwrap()])
        .assert()
        .success();

    env.cmd()
        .args(["new", "Movable\ncontents"])
        .assert()
        .success();
    assert!(chosen.join("Movable.md").exists());

    env.cmd()
        .args(["migrate", target.to_str().unwrap()])
        .assert()
        .success();

    assert!(target.join("Movable.md").exists());
    let output = env.cmd().args(["dir"]).output_success();
    assert_eq!(output.trim(), target.to_string_lossy());
}

#[test]
fn set_dir_rejects_missing_directory() {
    let env = TestEnv::new();

    env.cmd()
        .args(["set-dir", env.path("not-there").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to set notes directory"));
}
