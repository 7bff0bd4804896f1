//! Test harness for integration tests.
//!
//! Provides isolated environments (temp notes + config directories), a
//! repository constructor wired like the composition root, and a fluent
//! CLI wrapper using `assert_cmd`.

#![allow(dead_code)]

use assert_cmd::Command;
use driftnote::store::{LocationResolver, NoteRepository, PinStore, SettingsStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment.
///
/// The notes directory doubles as the resolver's default location, so the
/// full resolution chain (scoped → legacy → default) runs against temp
/// space and nothing touches the real user directories.
pub struct TestEnv {
    _temp_dir: TempDir,
    notes_dir: PathBuf,
    config_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        let config_dir = temp_dir.path().join("config");
        std::fs::create_dir_all(&notes_dir).expect("failed to create notes dir");
        std::fs::create_dir_all(&config_dir).expect("failed to create config dir");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_dir,
        }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns a fresh path inside the environment (not created).
    pub fn path(&self, name: &str) -> PathBuf {
        self._temp_dir.path().join(name)
    }

    /// Builds a repository the way the composition root does, with this
    /// environment's directories substituted in.
    pub fn repo(&self) -> NoteRepository {
        let resolver = LocationResolver::new(
            SettingsStore::new(&self.config_dir),
            self.notes_dir.clone(),
        );
        NoteRepository::new(resolver, PinStore::new(&self.config_dir))
    }

    /// Drops a raw note file into the notes directory, bypassing the
    /// repository — simulates an external editor.
    pub fn write_raw_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        std::fs::write(&path, content).expect("failed to write raw note");
        path
    }

    /// Creates a CLI command scoped to this environment's config dir.
    pub fn cmd(&self) -> NoteCommand {
        NoteCommand::new().config_dir(&self.config_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent wrapper around `assert_cmd::Command` for the `note` binary.
pub struct NoteCommand {
    args: Vec<String>,
}

impl NoteCommand {
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--config-dir` option.
    pub fn config_dir(mut self, path: &Path) -> Self {
        self.args.push("--config-dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--dir` option to override the notes directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("note").expect("failed to find note binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json(self) -> serde_json::Value {
        let output = self.output_success();
        serde_json::from_str(&output).expect("failed to parse output as JSON")
    }
}

impl Default for NoteCommand {
    fn default() -> Self {
        Self::new()
    }
}
