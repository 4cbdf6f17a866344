//! Import command
//!
//! Load an assignment JSON document (typically a bundle backup) into the store.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use am_core::assignment::{parse_import, Assignment, ConflictPolicy};
use am_core::types::now_millis;

use super::AppContext;

/// What to do when the imported id is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Prompt for a choice
    Ask,
    /// Replace the stored assignment
    Overwrite,
    /// Keep both, saving the import under a new id
    Copy,
}

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file to import
    pub file: PathBuf,

    /// Handling of an existing assignment with the same id
    #[arg(long, value_enum, default_value = "ask")]
    pub on_conflict: OnConflict,
}

/// Execute the import command
pub fn execute(ctx: &AppContext, args: ImportArgs) -> Result<()> {
    let json = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let manager = ctx.manager()?;

    // Settle the conflict choice before anything is written
    let incoming = parse_import(&json, now_millis())
        .with_context(|| format!("Failed to import {}", args.file.display()))?;
    let policy = match manager.get(incoming.id.as_str())? {
        Some(existing) => match args.on_conflict {
            OnConflict::Overwrite => ConflictPolicy::Overwrite,
            OnConflict::Copy => ConflictPolicy::Copy,
            OnConflict::Ask => ask_policy(&existing)?,
        },
        None => ConflictPolicy::Copy,
    };

    let outcome = manager
        .import(&json, |_| policy)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;

    let how = match outcome.conflict {
        Some(ConflictPolicy::Overwrite) => " (replaced existing)",
        Some(ConflictPolicy::Copy) => " (saved as copy)",
        None => "",
    };
    println!(
        "{} Imported '{}'{} as {}",
        "✓".green(),
        outcome.assignment.title,
        how,
        outcome.assignment.id.to_string().cyan()
    );
    Ok(())
}

fn ask_policy(existing: &Assignment) -> Result<ConflictPolicy> {
    use dialoguer::Select;

    let choice = Select::new()
        .with_prompt(format!(
            "An assignment with id '{}' already exists",
            existing.id
        ))
        .items(&["Overwrite it", "Keep both (import as copy)"])
        .default(1)
        .interact()?;

    Ok(if choice == 0 {
        ConflictPolicy::Overwrite
    } else {
        ConflictPolicy::Copy
    })
}
