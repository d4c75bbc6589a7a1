//! CLI argument definitions for Vilo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Id;

/// Vilo - a single-user kanban board with checklist tracking.
///
/// Boards hold sections, sections hold tasks, tasks hold a checklist.
/// Start with `vilo show` to see the board list.
#[derive(Parser, Debug)]
#[command(name = "vilo")]
#[command(author, version, about = "A single-user kanban board with checklist tracking", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Directory holding boards.json and the action log.
    /// Defaults to the platform data directory (e.g. ~/.local/share/vilo).
    #[arg(short = 'D', long = "data-dir", global = true, env = "VILO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board list, or one board's sections and tasks
    Show {
        /// Board id to open; omit for the board list
        board: Option<Id>,
    },

    /// Board management commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },

    /// Section (column) management commands
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Checklist commands for one task
    Check {
        #[command(subcommand)]
        command: CheckCommands,
    },
}

/// Board subcommands
#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Create a new board
    Create {
        /// Board name (empty creates nothing)
        name: String,
    },

    /// Rename a board
    Rename {
        id: Id,
        name: String,
    },

    /// Delete a board and everything on it
    Delete {
        id: Id,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// Section subcommands
#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// Create a new section on a board
    Create {
        /// Board the section belongs to
        board: Id,
        /// Section name (empty creates nothing)
        name: String,
    },

    /// Rename a section
    Rename {
        id: Id,
        name: String,
    },

    /// Delete a section and all its tasks
    Delete {
        id: Id,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Move a section to a new position within its board
    Move {
        /// Board the section belongs to
        board: Id,
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task in a section
    Create {
        /// Section the task belongs to
        section: Id,
        /// Task name (empty creates nothing)
        name: String,
    },

    /// Show one task with its checklist
    Show {
        id: Id,
    },

    /// Update a task's name and/or description
    Update {
        id: Id,

        /// New task name
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// New task description
        #[arg(short = 'd', long = "description")]
        description: Option<String>,
    },

    /// Delete a task from a section
    Delete {
        /// Section the task belongs to
        section: Id,
        id: Id,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Move a task within or across sections
    Move {
        /// Section the task is in now
        from_section: Id,
        /// Current position in that section (0-based)
        from_index: usize,
        /// Target section (may equal the source section)
        to_section: Id,
        /// Target position, counted after the task is removed (0-based)
        to_index: usize,
    },
}

/// Checklist subcommands
#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Append a checklist item to a task
    Add {
        /// Task the item belongs to
        task: Id,
        /// Item text (may be empty, to be filled in later)
        #[arg(default_value = "")]
        text: String,
    },

    /// Replace a checklist item's text
    Edit {
        task: Id,
        /// Item position (0-based)
        index: usize,
        text: String,
    },

    /// Toggle a checklist item checked/unchecked
    Toggle {
        task: Id,
        /// Item position (0-based)
        index: usize,
    },

    /// Remove a checklist item
    Rm {
        task: Id,
        /// Item position (0-based)
        index: usize,
    },

    /// Move a checklist item to a new position
    Move {
        task: Id,
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },
}
