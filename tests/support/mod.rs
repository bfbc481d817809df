#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tasks::task::Task;
use tempfile::TempDir;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".tasks.toml", contents)
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        self.read_tasks_at(&self.tasks_file())
    }

    pub fn read_tasks_at(&self, path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// `tasks` binary running in `dir` with a clean environment
pub fn tasks_cmd(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("tasks").expect("binary");
    cmd.current_dir(dir.path())
        .env_remove("TASKS_FILE")
        .env_remove("TASKS_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
