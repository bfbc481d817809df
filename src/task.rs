//! Task records and the pure operations over a task list.
//!
//! Nothing in this module touches the filesystem or the terminal. Invalid
//! input (a blank description, an out-of-range task number) is reported
//! through `bool`/`Option` returns; none of these functions panic.
//!
//! Task numbers are 1-based: number `n` refers to `tasks[n - 1]`.

use serde::{Deserialize, Serialize};

/// Line rendered for an empty task list.
pub const EMPTY_LIST_LINE: &str = "No tasks yet.";

const DONE_MARKER: char = '✓';
const OPEN_MARKER: char = ' ';

/// A single task: a description plus a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub description: String,
    pub completed: bool,
}

/// On-disk shape of a task, checked before it becomes a `Task`.
#[derive(Deserialize)]
struct TaskRecord {
    description: String,
    completed: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> std::result::Result<Self, Self::Error> {
        if !validate_description(&record.description) {
            return Err("task description cannot be blank".to_string());
        }
        Ok(Task {
            description: record.description,
            completed: record.completed,
        })
    }
}

impl Task {
    /// Create an open task with a trimmed description
    pub fn new(description: &str) -> Self {
        make_task(description)
    }
}

/// True if the description is non-empty after trimming whitespace.
pub fn validate_description(text: &str) -> bool {
    !text.trim().is_empty()
}

/// True if the trimmed description is at most `max` characters long.
pub fn check_length(text: &str, max: usize) -> bool {
    text.trim().chars().count() <= max
}

/// Build an open task from `text`. Does not validate.
pub fn make_task(text: &str) -> Task {
    Task {
        description: text.trim().to_string(),
        completed: false,
    }
}

/// Append a task if `text` is a valid description.
pub fn add(tasks: &mut Vec<Task>, text: &str) -> bool {
    if !validate_description(text) {
        return false;
    }
    tasks.push(make_task(text));
    true
}

pub fn get_by_index(tasks: &[Task], index: usize) -> Option<&Task> {
    index.checked_sub(1).and_then(|pos| tasks.get(pos))
}

fn get_by_index_mut(tasks: &mut [Task], index: usize) -> Option<&mut Task> {
    index.checked_sub(1).and_then(|pos| tasks.get_mut(pos))
}

/// Mark task `index` as completed. Returns false if there is no such task.
pub fn mark_complete(tasks: &mut [Task], index: usize) -> bool {
    match get_by_index_mut(tasks, index) {
        Some(task) => {
            task.completed = true;
            true
        }
        None => false,
    }
}

/// Remove task `index`, shifting later tasks down by one.
pub fn remove(tasks: &mut Vec<Task>, index: usize) -> bool {
    take(tasks, index).is_some()
}

/// Remove task `index` and return it.
pub fn take(tasks: &mut Vec<Task>, index: usize) -> Option<Task> {
    if index == 0 || index > tasks.len() {
        return None;
    }
    Some(tasks.remove(index - 1))
}

/// Display lines: `"{n}. [{marker}] {description}"`, or a single
/// `EMPTY_LIST_LINE` when there are no tasks.
pub fn render_lines(tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec![EMPTY_LIST_LINE.to_string()];
    }

    tasks
        .iter()
        .enumerate()
        .map(|(pos, task)| {
            let marker = if task.completed {
                DONE_MARKER
            } else {
                OPEN_MARKER
            };
            format!("{}. [{}] {}", pos + 1, marker, task.description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str, completed: bool) -> Task {
        Task {
            description: description.to_string(),
            completed,
        }
    }

    #[test]
    fn validate_accepts_text_with_content() {
        assert!(validate_description("Buy milk"));
        assert!(validate_description("   Task with spaces   "));
        assert!(validate_description("A"));
    }

    #[test]
    fn validate_rejects_blank_text() {
        assert!(!validate_description(""));
        assert!(!validate_description("   "));
        assert!(!validate_description("\t\n"));
    }

    #[test]
    fn make_task_trims_and_starts_open() {
        let created = make_task("   Buy milk   ");
        assert_eq!(created, task("Buy milk", false));
        assert_eq!(Task::new(" x "), task("x", false));
    }

    #[test]
    fn add_appends_valid_tasks_in_order() {
        let mut tasks = Vec::new();
        assert!(add(&mut tasks, "Task 1"));
        assert!(add(&mut tasks, "  Task 2 "));
        assert!(add(&mut tasks, "Task 1"));

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1], task("Task 2", false));
        assert_eq!(tasks[2].description, "Task 1");
    }

    #[test]
    fn add_rejects_blank_without_mutation() {
        let mut tasks = vec![task("keep", true)];
        assert!(!add(&mut tasks, ""));
        assert!(!add(&mut tasks, "    "));
        assert_eq!(tasks, vec![task("keep", true)]);
    }

    #[test]
    fn get_by_index_is_one_based() {
        let tasks = vec![task("Task 1", false), task("Task 2", false)];
        assert_eq!(get_by_index(&tasks, 1).unwrap().description, "Task 1");
        assert_eq!(get_by_index(&tasks, 2).unwrap().description, "Task 2");
        assert!(get_by_index(&tasks, 0).is_none());
        assert!(get_by_index(&tasks, 3).is_none());
        assert!(get_by_index(&[], 1).is_none());
        assert!(get_by_index(&tasks, usize::MAX).is_none());
    }

    #[test]
    fn mark_complete_only_touches_target() {
        let mut tasks = vec![task("Task 1", false), task("Task 2", false)];
        assert!(mark_complete(&mut tasks, 1));
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);

        // Completing twice is fine.
        assert!(mark_complete(&mut tasks, 1));
        assert!(tasks[0].completed);
    }

    #[test]
    fn mark_complete_invalid_index_is_noop() {
        let mut tasks = vec![task("Task 1", false)];
        assert!(!mark_complete(&mut tasks, 0));
        assert!(!mark_complete(&mut tasks, 2));
        assert_eq!(tasks, vec![task("Task 1", false)]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut tasks = vec![task("A", false), task("B", true), task("C", false)];
        assert!(remove(&mut tasks, 2));
        assert_eq!(tasks, vec![task("A", false), task("C", false)]);
    }

    #[test]
    fn remove_invalid_index_is_noop() {
        let mut tasks = vec![task("A", false)];
        assert!(!remove(&mut tasks, 0));
        assert!(!remove(&mut tasks, 2));
        assert_eq!(tasks.len(), 1);

        let mut empty: Vec<Task> = Vec::new();
        assert!(!remove(&mut empty, 1));
    }

    #[test]
    fn take_returns_removed_task() {
        let mut tasks = vec![task("A", false), task("B", true)];
        assert_eq!(take(&mut tasks, 2), Some(task("B", true)));
        assert_eq!(take(&mut tasks, 2), None);
        assert_eq!(tasks, vec![task("A", false)]);
    }

    #[test]
    fn render_empty_list_is_single_line() {
        assert_eq!(render_lines(&[]), vec![EMPTY_LIST_LINE.to_string()]);
    }

    #[test]
    fn render_numbers_and_marks_tasks() {
        let lines = render_lines(&[task("Task 1", false), task("Task 2", true)]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1."));
        assert!(lines[0].contains("Task 1"));
        assert!(lines[0].contains("[ ]"));
        assert!(lines[1].starts_with("2."));
        assert!(lines[1].contains("Task 2"));
        assert!(lines[1].contains("[✓]"));
    }

    #[test]
    fn check_length_counts_characters() {
        assert!(check_length("abc", 3));
        assert!(check_length("  abc  ", 3));
        assert!(!check_length("abcd", 3));
        assert!(check_length("ééé", 3));
    }

    #[test]
    fn buy_milk_scenario() {
        let mut tasks = Vec::new();
        assert!(add(&mut tasks, "Buy milk"));
        assert_eq!(tasks, vec![task("Buy milk", false)]);
        assert!(mark_complete(&mut tasks, 1));
        assert_eq!(tasks, vec![task("Buy milk", true)]);
        assert!(remove(&mut tasks, 1));
        assert!(tasks.is_empty());
    }

    #[test]
    fn deserialize_rejects_blank_or_incomplete_records() {
        let ok: Task =
            serde_json::from_str(r#"{"description":"x","completed":true,"extra":1}"#).unwrap();
        assert_eq!(ok, task("x", true));

        assert!(serde_json::from_str::<Task>(r#"{"description":"  ","completed":false}"#).is_err());
        assert!(serde_json::from_str::<Task>(r#"{"description":"x"}"#).is_err());
        assert!(serde_json::from_str::<Task>(r#"{"description":"x","completed":"no"}"#).is_err());
    }
}
