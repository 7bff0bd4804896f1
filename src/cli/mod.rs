//! CLI command definitions and handlers

pub mod handlers;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// note - floating-note persistence engine
#[derive(Parser, Debug)]
#[command(name = "note", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides the persisted storage location)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Config directory holding settings and the pinned set
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes
    #[command(name = "ls")]
    List(ListArgs),

    /// Overwrite a note's content (empty content deletes the note)
    Write(WriteArgs),

    /// Rename a note's file to match its current title
    Retitle(RetitleArgs),

    /// Toggle a note's pinned state
    Pin(PinArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Print the active notes directory
    Dir,

    /// Persist a custom notes directory
    SetDir(SetDirArgs),

    /// Copy all notes to a new directory and switch to it
    Migrate(MigrateArgs),

    /// Return to the default storage location
    ResetDir,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for listing commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Human,
    /// JSON array
    Json,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Initial note content; the first line becomes the title
    pub content: Option<String>,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `write` command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Note id (full or prefix) or exact title
    pub note: String,

    /// New content for the note
    pub content: String,
}

/// Arguments for the `retitle` command
#[derive(Parser, Debug)]
pub struct RetitleArgs {
    /// Note id (full or prefix) or exact title
    pub note: String,
}

/// Arguments for the `pin` command
#[derive(Parser, Debug)]
pub struct PinArgs {
    /// Note id (full or prefix) or exact title
    pub note: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note id (full or prefix) or exact title
    pub note: String,
}

/// Arguments for the `set-dir` command
#[derive(Parser, Debug)]
pub struct SetDirArgs {
    /// Existing, writable directory to store notes in
    pub path: PathBuf,
}

/// Arguments for the `migrate` command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Directory to copy notes into (created if absent)
    pub path: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
