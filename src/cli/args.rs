//! Command line argument parsing
//!
//! Subcommands map one-to-one onto the engine operations plus the two
//! completion toggles the engine itself does not own:
//! - `add` / `sub`: create a root task or a subtask
//! - `tree`: render the forest depth-first with indentation
//! - `stats`: subtree progress and time statistics
//! - `done` / `reopen`: completion toggle, then bottom-up propagation
//! - `move` / `reorder` / `rm`: structural mutations

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "focusdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal productivity tracker: hierarchical tasks, progress statistics and time accounting")]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Path to the task file
    #[arg(short = 'f', long = "file", default_value = "tasks.json", global = true)]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a root task
    Add {
        title: String,
        /// Task type, e.g. "brain" or "body"
        #[arg(long = "type")]
        kind: Option<String>,
        /// Day period, e.g. "morning"
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Estimated minutes of work
        #[arg(long)]
        estimate: Option<u32>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        scheduled: Option<NaiveDate>,
    },
    /// Add a subtask under an existing task
    Sub {
        /// Parent task id
        parent: Uuid,
        title: String,
        /// Override the inherited task type
        #[arg(long = "type")]
        kind: Option<String>,
        /// Override the inherited day period
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Estimated minutes of work
        #[arg(long)]
        estimate: Option<u32>,
        /// Override the inherited due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Override the inherited scheduled date (YYYY-MM-DD)
        #[arg(long)]
        scheduled: Option<NaiveDate>,
    },
    /// Render the task forest
    Tree,
    /// Show subtree progress and time statistics for a task
    Stats {
        /// Task id
        task: Uuid,
    },
    /// Mark a task completed and propagate upward
    Done {
        /// Task id
        task: Uuid,
    },
    /// Reopen a completed task and propagate upward
    Reopen {
        /// Task id
        task: Uuid,
    },
    /// Move a subtask under a new parent
    Move {
        /// Task id to move
        task: Uuid,
        /// New parent task id
        new_parent: Uuid,
    },
    /// Reorder the children of a task
    Reorder {
        /// Parent task id
        parent: Uuid,
        /// Child ids in their new order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<Uuid>,
    },
    /// Delete a task together with all of its descendants
    Rm {
        /// Task id
        task: Uuid,
    },
}
