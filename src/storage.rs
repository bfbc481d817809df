//! Storage layer for tasks
//!
//! The whole task list lives in one JSON document:
//!
//! ```text
//! [
//!   { "description": "Buy milk", "completed": false },
//!   { "description": "Write report", "completed": true }
//! ]
//! ```
//!
//! `TaskStore::load` and `TaskStore::save` never return errors: a missing or
//! corrupt document loads as an empty list, and a failed write is reported
//! as `false`. The `try_*` forms expose the underlying `Result`.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::task::Task;

/// Default name of the task document
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Suffix appended to a corrupt document's file name for its backup copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// What happened when the task document was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Document parsed; holds the number of tasks
    Loaded(usize),
    /// No document yet
    Missing,
    /// Document exists but could not be read
    Unreadable { reason: String },
    /// Document is not a valid task list; `backup` is set if a copy was kept
    Corrupt {
        reason: String,
        backup: Option<PathBuf>,
    },
}

/// File-backed store for a task list
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    backup_corrupt: bool,
}

/// Outcome of reading the document before any fallback is applied
enum ReadOutcome {
    Missing,
    Parsed(Vec<Task>),
    Invalid { bytes: Vec<u8>, reason: String },
}

impl TaskStore {
    /// Create a store for the document at `path`, backing up corrupt documents
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_corrupt: true,
        }
    }

    /// Enable or disable the `.bak` copy of corrupt documents
    pub fn with_backup(mut self, backup_corrupt: bool) -> Self {
        self.backup_corrupt = backup_corrupt;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path that receives a copy of a corrupt document
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the task list, falling back to an empty list on any failure
    pub fn load(&self) -> Vec<Task> {
        self.load_report().0
    }

    /// Load the task list and report how the load went
    pub fn load_report(&self) -> (Vec<Task>, LoadReport) {
        match self.read() {
            Ok(ReadOutcome::Missing) => {
                debug!(path = %self.path.display(), "no task file yet");
                (Vec::new(), LoadReport::Missing)
            }
            Ok(ReadOutcome::Parsed(tasks)) => {
                debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                let count = tasks.len();
                (tasks, LoadReport::Loaded(count))
            }
            Ok(ReadOutcome::Invalid { bytes, reason }) => {
                warn!(path = %self.path.display(), %reason, "task file is corrupt; starting empty");
                let backup = if self.backup_corrupt {
                    self.write_backup(&bytes)
                } else {
                    None
                };
                (Vec::new(), LoadReport::Corrupt { reason, backup })
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "task file unreadable; starting empty");
                (
                    Vec::new(),
                    LoadReport::Unreadable {
                        reason: err.to_string(),
                    },
                )
            }
        }
    }

    /// Load the task list, returning an error for anything but a valid document.
    ///
    /// A missing file is not an error and yields an empty list.
    pub fn try_load(&self) -> Result<Vec<Task>> {
        match self.read()? {
            ReadOutcome::Missing => Ok(Vec::new()),
            ReadOutcome::Parsed(tasks) => Ok(tasks),
            ReadOutcome::Invalid { reason, .. } => Err(Error::CorruptTaskFile {
                path: self.path.clone(),
                reason,
            }),
        }
    }

    fn read(&self) -> Result<ReadOutcome> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
            Err(err) => return Err(Error::Io(err)),
        };

        Ok(match parse_tasks(&bytes) {
            Ok(tasks) => ReadOutcome::Parsed(tasks),
            Err(reason) => ReadOutcome::Invalid { bytes, reason },
        })
    }

    fn write_backup(&self, bytes: &[u8]) -> Option<PathBuf> {
        let backup = self.backup_path();
        match fs::write(&backup, bytes) {
            Ok(()) => {
                debug!(backup = %backup.display(), "saved copy of corrupt task file");
                Some(backup)
            }
            Err(err) => {
                warn!(backup = %backup.display(), error = %err, "could not back up corrupt task file");
                None
            }
        }
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Save the task list, returning false if the write failed
    pub fn save(&self, tasks: &[Task]) -> bool {
        match self.try_save(tasks) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to save tasks");
                false
            }
        }
    }

    /// Save the task list as pretty-printed JSON, replacing the file in full
    pub fn try_save(&self, tasks: &[Task]) -> Result<()> {
        let mut json = serde_json::to_string_pretty(tasks)?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes())?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn parse_tasks(bytes: &[u8]) -> std::result::Result<Vec<Task>, String> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|err| format!("invalid JSON: {err}"))?;
    if !value.is_array() {
        return Err("root value is not a JSON array".to_string());
    }
    serde_json::from_value(value).map_err(|err| format!("invalid task record: {err}"))
}

/// Write data atomically using a temp file in the same directory + rename
///
/// The destination is either fully replaced or left untouched. An existing
/// file keeps its permissions; a new one gets the usual umask-derived mode.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = new_temp_file(parent)?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;

    Ok(())
}

#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    tempfile::NamedTempFile::new_in(dir)
}
