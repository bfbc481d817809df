//! Command-line interface for tasks
//!
//! This module defines the CLI structure using clap derive macros.
//! One-shot commands live in `task`; the interactive menu in `shell`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;

pub mod shell;
mod task;

/// tasks - a small task list kept in a JSON file
///
/// Run without a subcommand to open the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "tasks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task file (overrides the config file)
    #[arg(long, global = true, env = "TASKS_FILE")]
    pub file: Option<PathBuf>,

    /// Path to a config file (defaults to ./.tasks.toml when present)
    #[arg(long, global = true, env = "TASKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all tasks
    List,

    /// Add a task
    Add {
        /// Task description (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Mark a task as completed
    Done {
        /// Task number (1-based, as shown by `tasks list`)
        index: usize,
    },

    /// Delete a task
    Rm {
        /// Task number (1-based, as shown by `tasks list`)
        index: usize,
    },

    /// Interactive menu (default)
    Shell,
}

/// Resolve configuration from `--config`, `./.tasks.toml`, and `--file`
pub fn resolve_config(config_path: Option<&Path>, file: Option<PathBuf>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(&std::env::current_dir()?),
    };
    if let Some(file) = file {
        config.file = file;
    }
    Ok(config)
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = resolve_config(self.config.as_deref(), self.file)?;
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command.unwrap_or(Commands::Shell) {
            Commands::List => task::run_list(task::ListOptions { config, output }),
            Commands::Add { description } => task::run_add(task::AddOptions {
                description: description.join(" "),
                config,
                output,
            }),
            Commands::Done { index } => task::run_done(task::DoneOptions {
                index,
                config,
                output,
            }),
            Commands::Rm { index } => task::run_rm(task::RmOptions {
                index,
                config,
                output,
            }),
            Commands::Shell => shell::run(&config),
        }
    }
}
