//! tasks - Task List Library
//!
//! Core functionality for the `tasks` CLI: an ordered task list kept in a
//! single JSON document.
//!
//! # Module Organization
//!
//! - `task`: Task records and pure list operations (no I/O)
//! - `storage`: Loading and saving the JSON task document
//! - `session`: Owned list + store; saves after each change
//! - `cli`: Command-line interface using clap, and the interactive menu
//! - `config`: Configuration loading from `.tasks.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output formatting

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
