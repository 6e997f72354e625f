// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::NoteId;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the notes API (overrides config)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print the screen as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load and show the quote and all notes
    Show,

    /// Fetch a fresh quote
    Quote,

    /// Add a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,
    },

    /// Edit a note; omitted fields keep their current value
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a note (no confirmation)
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
    },
}
