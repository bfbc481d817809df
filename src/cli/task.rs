//! One-shot task commands: list, add, done, rm.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::Session;
use crate::storage::LoadReport;
use crate::task::Task;

pub struct ListOptions {
    pub config: Config,
    pub output: OutputOptions,
}

pub struct AddOptions {
    pub description: String,
    pub config: Config,
    pub output: OutputOptions,
}

pub struct DoneOptions {
    pub index: usize,
    pub config: Config,
    pub output: OutputOptions,
}

pub struct RmOptions {
    pub index: usize,
    pub config: Config,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct TaskListOutput<'a> {
    file: PathBuf,
    total: usize,
    tasks: &'a [Task],
}

#[derive(serde::Serialize)]
struct TaskChangedOutput {
    index: usize,
    task: Task,
    total: usize,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let session = Session::from_config(&options.config);

    let output = TaskListOutput {
        file: session.store().path().to_path_buf(),
        total: session.len(),
        tasks: session.tasks(),
    };

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", session.len().to_string());
    push_load_warning(&mut human, session.load_report());
    for line in session.lines() {
        human.push_detail(line);
    }
    if session.is_empty() {
        human.push_next_step("tasks add \"<description>\"");
    }

    emit_success(options.output, "list", &output, Some(&human))
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut session = Session::from_config(&options.config);
    let mut human = HumanOutput::new("Task added");
    push_load_warning(&mut human, session.load_report());

    let task = session.add(&options.description)?.clone();
    let output = TaskChangedOutput {
        index: session.len(),
        task,
        total: session.len(),
    };

    human.push_summary("Number", output.index.to_string());
    human.push_summary("Description", output.task.description.clone());
    human.push_next_step(format!("tasks done {}", output.index));

    emit_success(options.output, "add", &output, Some(&human))
}

pub fn run_done(options: DoneOptions) -> Result<()> {
    let mut session = Session::from_config(&options.config);
    let mut human = HumanOutput::new("Task completed");
    push_load_warning(&mut human, session.load_report());

    let task = session.complete(options.index)?.clone();
    let output = TaskChangedOutput {
        index: options.index,
        task,
        total: session.len(),
    };

    human.push_summary("Number", options.index.to_string());
    human.push_summary("Description", output.task.description.clone());

    emit_success(options.output, "done", &output, Some(&human))
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut session = Session::from_config(&options.config);
    let mut human = HumanOutput::new("Task deleted");
    push_load_warning(&mut human, session.load_report());

    let task = session.delete(options.index)?;
    let output = TaskChangedOutput {
        index: options.index,
        task,
        total: session.len(),
    };

    human.push_summary("Removed", output.task.description.clone());
    human.push_summary("Remaining", output.total.to_string());

    emit_success(options.output, "rm", &output, Some(&human))
}

fn push_load_warning(human: &mut HumanOutput, report: &LoadReport) {
    if let Some(warning) = load_warning(report) {
        human.push_warning(warning);
    }
}

/// Human-readable warning for a load that did not go cleanly
pub(crate) fn load_warning(report: &LoadReport) -> Option<String> {
    match report {
        LoadReport::Loaded(_) | LoadReport::Missing => None,
        LoadReport::Unreadable { reason } => {
            Some(format!(
                "task file could not be read ({reason}); changes will not be saved"
            ))
        }
        LoadReport::Corrupt {
            reason,
            backup: Some(backup),
        } => Some(format!(
            "task file is corrupt ({reason}); old contents saved to {}",
            backup.display()
        )),
        LoadReport::Corrupt {
            reason,
            backup: None,
        } => Some(format!("task file is corrupt ({reason}); starting empty")),
    }
}
