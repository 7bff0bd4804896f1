//! driftnote - floating desktop notes with file-backed identity
//!
//! Each note is a plain Markdown file whose name follows its first-line
//! title; a JSON index keyed by UUID keeps identity stable across renames.
//! This crate is the persistence engine behind the note windows: the UI
//! layers call [`store::NoteRepository`] and render what it returns.

pub mod cli;
pub mod domain;
pub mod infra;
pub mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    handlers::{
        handle_completions, handle_dir, handle_list, handle_migrate, handle_new, handle_pin,
        handle_reset_dir, handle_retitle, handle_rm, handle_set_dir, handle_write,
    },
};
use store::{
    LocationResolver, NoteRepository, PinStore, SettingsStore, default_config_dir,
    default_notes_dir,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    let resolver = LocationResolver::new(SettingsStore::new(&config_dir), default_notes_dir())
        .with_override(cli.dir.clone());
    let pins = PinStore::new(&config_dir);
    let mut repo = NoteRepository::new(resolver, pins);

    match &cli.command {
        Command::New(args) => handle_new(args, &mut repo),
        Command::List(args) => handle_list(args, &mut repo),
        Command::Write(args) => handle_write(args, &mut repo),
        Command::Retitle(args) => handle_retitle(args, &mut repo),
        Command::Pin(args) => handle_pin(args, &mut repo),
        Command::Rm(args) => handle_rm(args, &mut repo),
        Command::Dir => handle_dir(&mut repo),
        Command::SetDir(args) => handle_set_dir(args, &mut repo),
        Command::Migrate(args) => handle_migrate(args, &mut repo),
        Command::ResetDir => handle_reset_dir(&mut repo),
        Command::Completions(args) => handle_completions(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Diagnostics go to stderr so JSON output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
