//! Handlers behind each CLI subcommand.

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use std::io;

use crate::cli::{
    Cli, CompletionsArgs, ListArgs, MigrateArgs, NewArgs, OutputFormat, PinArgs, RetitleArgs,
    RmArgs, SetDirArgs, WriteArgs,
};
use crate::domain::{NoteHandle, NoteItem};
use crate::store::NoteRepository;

pub fn handle_new(args: &NewArgs, repo: &mut NoteRepository) -> Result<()> {
    let content = args.content.as_deref().unwrap_or("");

    let mut handle = repo
        .create_note(content)
        .context("failed to create note")?;

    // With initial content the title line is already settled, so the
    // filename can follow it immediately.
    if !content.trim().is_empty() {
        repo.sync_filename_to_title(&mut handle)
            .context("failed to sync filename")?;
    }

    println!("Created: {} [{}]", handle.path().display(), handle.id());
    Ok(())
}

pub fn handle_list(args: &ListArgs, repo: &mut NoteRepository) -> Result<()> {
    let mut items = repo.list_notes().context("failed to list notes")?;

    // Presentation-layer ordering: pinned first, then most recent.
    items.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then(b.last_modified.cmp(&a.last_modified))
    });

    match args.format {
        OutputFormat::Human => {
            for item in &items {
                let marker = if item.is_pinned { "*" } else { " " };
                println!(
                    "{} {}  [{}]  {}  {} words",
                    marker,
                    item.title,
                    short_id(item),
                    item.last_modified.format("%Y-%m-%d %H:%M"),
                    item.word_count
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}

pub fn handle_write(args: &WriteArgs, repo: &mut NoteRepository) -> Result<()> {
    let item = resolve_note(repo, &args.note)?;
    let handle = NoteHandle::new(item.id.clone(), item.path.clone());

    repo.save_content(&handle, &args.content)
        .context("failed to save content")?;

    if args.content.trim().is_empty() {
        println!("Deleted emptied note: {}", item.title);
    } else {
        println!("Saved: {}", item.title);
    }
    Ok(())
}

pub fn handle_retitle(args: &RetitleArgs, repo: &mut NoteRepository) -> Result<()> {
    let item = resolve_note(repo, &args.note)?;
    let mut handle = NoteHandle::new(item.id.clone(), item.path.clone());

    repo.sync_filename_to_title(&mut handle)
        .context("failed to sync filename")?;

    if handle.path() == item.path {
        println!("Filename already matches title");
    } else {
        println!(
            "Renamed: {} -> {}",
            item.path.display(),
            handle.path().display()
        );
    }
    Ok(())
}

pub fn handle_pin(args: &PinArgs, repo: &mut NoteRepository) -> Result<()> {
    let item = resolve_note(repo, &args.note)?;
    let pinned = repo
        .toggle_pin(&item.id)
        .context("failed to toggle pin")?;

    if pinned {
        println!("Pinned: {}", item.title);
    } else {
        println!("Unpinned: {}", item.title);
    }
    Ok(())
}

pub fn handle_rm(args: &RmArgs, repo: &mut NoteRepository) -> Result<()> {
    let item = resolve_note(repo, &args.note)?;
    repo.delete_note(&item.id).context("failed to delete note")?;
    println!("Deleted: {}", item.title);
    Ok(())
}

pub fn handle_dir(repo: &mut NoteRepository) -> Result<()> {
    let dir = repo
        .active_directory()
        .context("failed to resolve notes directory")?;
    println!("{}", dir.display());
    Ok(())
}

pub fn handle_set_dir(args: &SetDirArgs, repo: &mut NoteRepository) -> Result<()> {
    repo.set_custom_directory(&args.path)
        .with_context(|| format!("failed to set notes directory to {}", args.path.display()))?;
    println!("Notes directory set: {}", args.path.display());
    Ok(())
}

pub fn handle_migrate(args: &MigrateArgs, repo: &mut NoteRepository) -> Result<()> {
    repo.migrate(&args.path)
        .with_context(|| format!("failed to migrate notes to {}", args.path.display()))?;
    println!("Notes migrated to: {}", args.path.display());
    Ok(())
}

pub fn handle_reset_dir(repo: &mut NoteRepository) -> Result<()> {
    repo.reset_to_default()
        .context("failed to reset storage location")?;
    let dir = repo.active_directory()?;
    println!("Notes directory reset: {}", dir.display());
    Ok(())
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "note", &mut io::stdout());
    Ok(())
}

/// Resolves a note query — a full id, an id prefix, or an exact
/// (case-insensitive) title — against the current listing.
fn resolve_note(repo: &mut NoteRepository, query: &str) -> Result<NoteItem> {
    let items = repo.list_notes().context("failed to list notes")?;
    let lowered = query.to_lowercase();

    let matches: Vec<&NoteItem> = items
        .iter()
        .filter(|item| {
            let id = item.id.to_string();
            id == lowered || id.starts_with(&lowered) || item.title.to_lowercase() == lowered
        })
        .collect();

    match matches.as_slice() {
        [item] => Ok((*item).clone()),
        [] => bail!("note not found: '{query}'"),
        many => {
            let listing: Vec<String> = many
                .iter()
                .map(|item| format!("  {} [{}]", item.title, short_id(item)))
                .collect();
            bail!(
                "ambiguous note '{query}', matches:\n{}",
                listing.join("\n")
            );
        }
    }
}

fn short_id(item: &NoteItem) -> String {
    item.id.to_string().chars().take(8).collect()
}
