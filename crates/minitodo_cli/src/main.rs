//! Command-line presentation layer for the minitodo core.
//!
//! # Responsibility
//! - Exercise every core operation against a local database file.
//! - Own the presentation-side duties the core refuses to: input
//!   validation UX and confirmation of destructive actions.
//!
//! The mobile UI is the real presentation layer; this binary fills the
//! same contract for local smoke verification and scripting.

use clap::{Parser, Subcommand};
use minitodo_core::db::open_db;
use minitodo_core::{
    default_log_level, init_logging, SqliteSnapshotRepository, TaskId, TaskStore,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "minitodo.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "minitodo", version, about = "Minimal todo list on a local snapshot store")]
struct Cli {
    /// Database file to use instead of the default data-directory one.
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Add a new task
    Add { text: String },

    /// List all tasks
    #[command(visible_alias = "ls")]
    List,

    /// Toggle a task's completion flag
    Done { id: TaskId },

    /// Replace a task's text
    Edit { id: TaskId, text: String },

    /// Delete a task
    Rm {
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Remove all completed tasks
    Clear,

    /// Show task counters
    Stats,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("minitodo: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let data_dir = data_dir()?;
    // Logging is best-effort for a local tool; a read-only home directory
    // should not prevent task operations.
    if let Err(err) = init_logging(
        default_log_level(),
        &data_dir.join("logs").to_string_lossy(),
    ) {
        eprintln!("minitodo: logging disabled: {err}");
    }

    let db_path = cli.db.clone().unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
    let repo = SqliteSnapshotRepository::new(open_db(&db_path)?);
    let mut store = TaskStore::open(Box::new(repo));

    handle_command(&cli.cmd, &mut store)?;

    store.close();
    Ok(())
}

fn handle_command(cmd: &Cmd, store: &mut TaskStore) -> Result<(), Box<dyn Error>> {
    match cmd {
        Cmd::Add { text } => {
            // The core silently ignores blank input; reject it here so the
            // user gets feedback, the way the app disables its add button.
            if text.trim().is_empty() {
                return Err("cannot add an empty task".into());
            }
            store.add(text);
            if let Some(task) = store.tasks().last() {
                println!("added {} {}", task.id, task.text);
            }
        }
        Cmd::List => {
            for task in store.tasks() {
                let mark = if task.completed { "x" } else { " " };
                println!("[{mark}] {} {}", task.id, task.text);
            }
        }
        Cmd::Done { id } => {
            require_known_id(store, *id)?;
            store.toggle(*id);
        }
        Cmd::Edit { id, text } => {
            require_known_id(store, *id)?;
            if text.trim().is_empty() {
                return Err("replacement text cannot be empty".into());
            }
            store.edit(*id, text);
        }
        Cmd::Rm { id, yes } => {
            require_known_id(store, *id)?;
            if !yes && !confirm(&format!("delete task {id}?"))? {
                println!("aborted");
                return Ok(());
            }
            store.delete(*id);
        }
        Cmd::Clear => {
            let before = store.stats().total;
            store.clear_completed();
            println!("removed {}", before - store.stats().total);
        }
        Cmd::Stats => {
            let stats = store.stats();
            println!(
                "total {} completed {} pending {}",
                stats.total, stats.completed, stats.pending
            );
        }
    }
    Ok(())
}

fn require_known_id(store: &TaskStore, id: TaskId) -> Result<(), Box<dyn Error>> {
    if store.tasks().iter().any(|task| task.id == id) {
        Ok(())
    } else {
        Err(format!("no task with id {id}").into())
    }
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn data_dir() -> Result<PathBuf, Box<dyn Error>> {
    let base = dirs::data_dir().ok_or("could not determine a data directory")?;
    Ok(base.join("minitodo"))
}
