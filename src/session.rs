//! Task session: the loaded list plus the store it is saved to.
//!
//! Every mutation goes through the pure functions in [`crate::task`] and is
//! saved immediately. If the save fails the in-memory list is put back the
//! way it was, so it always matches the last successful save.
//!
//! A document that exists but could not be read is never overwritten: the
//! session starts empty and refuses every mutation.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{LoadReport, TaskStore};
use crate::task::{self, Task};

#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    tasks: Vec<Task>,
    max_description_len: usize,
    load_report: LoadReport,
}

impl Session {
    /// Load the task list from `store`
    pub fn open(store: TaskStore, max_description_len: usize) -> Self {
        let (tasks, load_report) = store.load_report();
        Self {
            store,
            tasks,
            max_description_len,
            load_report,
        }
    }

    /// Open the task document named by `config`
    pub fn from_config(config: &Config) -> Self {
        let store = TaskStore::new(&config.file).with_backup(config.backup_corrupt);
        Self::open(store, config.max_description_len)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Display lines for the current list
    pub fn lines(&self) -> Vec<String> {
        task::render_lines(&self.tasks)
    }

    /// Check that `index` names an existing task
    pub fn check_index(&self, index: usize) -> Result<()> {
        match task::get_by_index(&self.tasks, index) {
            Some(_) => Ok(()),
            None => Err(self.not_found(index)),
        }
    }

    /// Check a description against the blank and length rules
    pub fn check_description(&self, text: &str) -> Result<()> {
        if !task::validate_description(text) {
            return Err(Error::InvalidDescription);
        }
        if !task::check_length(text, self.max_description_len) {
            return Err(Error::DescriptionTooLong {
                len: text.trim().chars().count(),
                max: self.max_description_len,
            });
        }
        Ok(())
    }

    /// Fail if saving would replace a document that was never read
    pub fn check_writable(&self) -> Result<()> {
        match &self.load_report {
            LoadReport::Unreadable { reason } => Err(Error::UnreadableTaskFile {
                path: self.store.path().to_path_buf(),
                reason: reason.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub fn add(&mut self, text: &str) -> Result<&Task> {
        self.check_writable()?;
        self.check_description(text)?;
        if !task::add(&mut self.tasks, text) {
            return Err(Error::InvalidDescription);
        }

        if !self.store.save(&self.tasks) {
            self.tasks.pop();
            return Err(self.save_failed());
        }

        debug!(count = self.tasks.len(), "task added");
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn complete(&mut self, index: usize) -> Result<&Task> {
        self.check_writable()?;
        let was_completed = task::get_by_index(&self.tasks, index)
            .map(|task| task.completed)
            .ok_or_else(|| self.not_found(index))?;
        task::mark_complete(&mut self.tasks, index);

        if !self.store.save(&self.tasks) {
            self.tasks[index - 1].completed = was_completed;
            return Err(self.save_failed());
        }

        debug!(index, "task completed");
        Ok(&self.tasks[index - 1])
    }

    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_writable()?;
        let len = self.tasks.len();
        let removed =
            task::take(&mut self.tasks, index).ok_or(Error::TaskNotFound { index, len })?;

        if !self.store.save(&self.tasks) {
            self.tasks.insert(index - 1, removed);
            return Err(self.save_failed());
        }

        debug!(index, "task deleted");
        Ok(removed)
    }

    fn not_found(&self, index: usize) -> Error {
        Error::TaskNotFound {
            index,
            len: self.tasks.len(),
        }
    }

    fn save_failed(&self) -> Error {
        warn!(path = %self.store.path().display(), "save failed; keeping last saved tasks");
        Error::SaveFailed(self.store.path().to_path_buf())
    }
}
