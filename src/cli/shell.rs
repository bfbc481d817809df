//! Interactive task menu.
//!
//! The loop is generic over its input and output so it can be driven from
//! in-memory buffers in tests. Invalid task numbers re-prompt; a blank answer
//! cancels back to the menu; end of input quits.

use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::LoadReport;

const RULE: &str = "========================================";

/// Run the menu on stdin/stdout
pub fn run(config: &Config) -> Result<()> {
    let session = Session::from_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(session, stdin.lock(), stdout.lock());
    shell.run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

enum Answer<T> {
    Value(T),
    Cancel,
    Eof,
}

pub struct Shell<R, W> {
    session: Session,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "TASK LIST MANAGER")?;
        writeln!(self.out, "{RULE}")?;
        self.greet()?;

        loop {
            self.menu()?;
            let choice = match self.prompt("\nChoose an option (1-5): ")? {
                Some(choice) => choice,
                None => break,
            };
            let flow = match choice.trim() {
                "1" => self.view().map(|_| Flow::Continue)?,
                "2" => self.add()?,
                "3" => self.complete()?,
                "4" => self.delete()?,
                "5" => Flow::Quit,
                _ => {
                    writeln!(self.out, "\nInvalid choice. Please choose 1-5.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.out, "\nGoodbye!")?;
        Ok(())
    }

    fn greet(&mut self) -> Result<()> {
        let report = self.session.load_report().clone();
        match report {
            LoadReport::Loaded(count) => writeln!(self.out, "Loaded {count} task(s).")?,
            LoadReport::Missing => writeln!(self.out, "No saved tasks found. Starting fresh.")?,
            other => {
                if let Some(warning) = super::task::load_warning(&other) {
                    writeln!(self.out, "Warning: {warning}")?;
                }
            }
        }
        Ok(())
    }

    fn menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "1. View tasks")?;
        writeln!(self.out, "2. Add task")?;
        writeln!(self.out, "3. Complete task")?;
        writeln!(self.out, "4. Delete task")?;
        writeln!(self.out, "5. Quit")?;
        writeln!(self.out, "{RULE}")?;
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        writeln!(self.out, "\nYour tasks:")?;
        for line in self.session.lines() {
            writeln!(self.out, "  {line}")?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        let description = match self.prompt("\nTask description: ")? {
            Some(description) => description,
            None => return Ok(Flow::Quit),
        };

        match self.session.add(&description) {
            Ok(_) => writeln!(self.out, "✓ Task added!")?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn complete(&mut self) -> Result<Flow> {
        self.view()?;
        if self.session.is_empty() {
            return Ok(Flow::Continue);
        }

        let index = match self.ask_task_number("complete")? {
            Answer::Value(index) => index,
            Answer::Cancel => return Ok(Flow::Continue),
            Answer::Eof => return Ok(Flow::Quit),
        };

        match self.session.complete(index) {
            Ok(_) => writeln!(self.out, "✓ Task marked as completed!")?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        self.view()?;
        if self.session.is_empty() {
            return Ok(Flow::Continue);
        }

        let index = match self.ask_task_number("delete")? {
            Answer::Value(index) => index,
            Answer::Cancel => return Ok(Flow::Continue),
            Answer::Eof => return Ok(Flow::Quit),
        };

        match self.session.delete(index) {
            Ok(removed) => writeln!(self.out, "✓ Deleted: {}", removed.description)?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn report_failure(&mut self, err: &Error) -> Result<()> {
        match err {
            Error::SaveFailed(path) => writeln!(
                self.out,
                "✗ Could not save to {}; the change was not applied.",
                path.display()
            )?,
            other => writeln!(self.out, "✗ {other}.")?,
        }
        Ok(())
    }

    fn ask_task_number(&mut self, action: &str) -> Result<Answer<usize>> {
        let prompt = format!("\nTask number to {action} (blank to cancel): ");
        loop {
            let raw = match self.prompt(&prompt)? {
                Some(raw) => raw,
                None => return Ok(Answer::Eof),
            };
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(Answer::Cancel);
            }

            match raw.parse::<usize>() {
                Ok(index) if self.session.check_index(index).is_ok() => {
                    return Ok(Answer::Value(index));
                }
                Ok(_) => writeln!(
                    self.out,
                    "Please enter a number between 1 and {}.",
                    self.session.len()
                )?,
                Err(_) => writeln!(self.out, "Please enter a valid number.")?,
            }
        }
    }

    /// Print `text` and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
