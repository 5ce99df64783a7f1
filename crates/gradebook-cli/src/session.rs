//! The interactive gradebook session.
//!
//! Reads one command per line, runs it to completion, and writes results to
//! the output. Only I/O failures on the session's own streams end the loop
//! early; every other error is printed and the session carries on.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use gradebook_core::config::GradebookConfig;
use gradebook_core::intake::{normalize_id, StudentForm};
use gradebook_core::statistics::summarize;
use gradebook_core::{GradebookError, StudentManager};
use gradebook_report::html::{generate_html, write_html_report};
use gradebook_report::text::{render_text, write_text_report};
use gradebook_report::ReportCard;

use crate::tokenize::split_line;
use crate::views;

/// One session command line.
#[derive(Parser)]
#[command(
    name = "gradebook>",
    no_binary_name = true,
    disable_version_flag = true
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Record a new student
    Add {
        /// Student ID (case-insensitive, stored upper-case)
        #[arg(long, default_value = "")]
        id: String,

        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        /// Cohort year, e.g. "Year 1"
        #[arg(long, default_value = "")]
        year: String,

        /// Four marks in module order, comma-separated
        #[arg(long, value_delimiter = ',')]
        marks: Vec<String>,
    },

    /// Load a student into the form for editing
    Edit {
        /// Student ID
        id: String,
    },

    /// Save the student being edited, replacing the old record
    Save {
        /// New name (default: keep)
        #[arg(long)]
        name: Option<String>,

        /// New cohort year (default: keep)
        #[arg(long)]
        year: Option<String>,

        /// New marks in module order (default: keep)
        #[arg(long, value_delimiter = ',')]
        marks: Option<Vec<String>>,
    },

    /// Leave editing mode without saving
    Cancel,

    /// List students, optionally filtered by ID or name
    List {
        /// Case-insensitive substring of ID or name
        search: Option<String>,
    },

    /// Show a student's report card
    View {
        /// Student ID
        id: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Write the card to this file instead of the terminal
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete a student
    Delete {
        /// Student ID
        id: String,
    },

    /// List cohort years and their modules
    Years,

    /// Class summary
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    Html,
}

/// Whether the loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Session state: the repository plus the record currently being edited.
pub struct Session {
    config: GradebookConfig,
    manager: StudentManager,
    editing: Option<String>,
}

impl Session {
    pub fn new(config: GradebookConfig) -> Self {
        Self {
            config,
            manager: StudentManager::new(),
            editing: None,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: bool,
    ) -> Result<()> {
        info!(years = self.config.years.years().len(), "session started");
        if prompt {
            writeln!(out, "gradebook — type `help` for commands, `quit` to leave.")?;
        }

        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "{}", self.prompt())?;
                out.flush()?;
            }
            let line = match lines.next() {
                None => break,
                // The undecodable line has already been consumed.
                Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %e, "skipped unreadable line");
                    writeln!(out, "Error: line is not valid UTF-8, ignored")?;
                    continue;
                }
                Some(line) => line?,
            };

            match self.execute_line(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    if is_input_error(&e) {
                        debug!(error = %e, "input rejected");
                    } else {
                        warn!(error = %e, "command failed");
                    }
                    writeln!(out, "Error: {e:#}")?;
                }
            }
        }

        info!(students = self.manager.len(), "session ended");
        Ok(())
    }

    fn prompt(&self) -> String {
        match &self.editing {
            Some(id) => format!("gradebook [editing {id}]> "),
            None => "gradebook> ".to_string(),
        }
    }

    fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = split_line(line)?;
        if words.is_empty() || words[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                let message = e.render().to_string();
                bail!("{}", message.trim_start_matches("error: ").trim_end());
            }
        };

        self.dispatch(parsed.command, out)
    }

    fn dispatch<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::Add {
                id,
                name,
                year,
                marks,
            } => self.add(StudentForm { id, name, year, marks }, out)?,
            SessionCommand::Edit { id } => self.edit(&id, out)?,
            SessionCommand::Save { name, year, marks } => self.save(name, year, marks, out)?,
            SessionCommand::Cancel => match self.editing.take() {
                Some(id) => writeln!(out, "Stopped editing {id}.")?,
                None => writeln!(out, "Not editing any student.")?,
            },
            SessionCommand::List { search } => self.list(search.as_deref(), out)?,
            SessionCommand::View { id, format, output } => self.view(&id, format, output, out)?,
            SessionCommand::Delete { id } => self.delete(&id, out)?,
            SessionCommand::Years => writeln!(out, "{}", views::years_table(&self.config.years))?,
            SessionCommand::Stats { json } => {
                let summary = summarize(&self.manager);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
                } else {
                    for line in views::summary_lines(&summary) {
                        writeln!(out, "{line}")?;
                    }
                }
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, form: StudentForm, out: &mut W) -> Result<()> {
        if let Some(id) = &self.editing {
            bail!("finish editing {id} first (`save` or `cancel`)");
        }

        let input = form.collect(&self.config.years)?;
        if self.manager.contains(&input.id) {
            return Err(GradebookError::DuplicateId(input.id).into());
        }

        self.manager
            .store(&input.id, &input.name, &input.year, input.modules);
        writeln!(out, "Student {} saved successfully!", input.name)?;
        Ok(())
    }

    fn edit<W: Write>(&mut self, id: &str, out: &mut W) -> Result<()> {
        let id = normalize_id(id);
        let Some(student) = self.manager.get(&id) else {
            bail!("no student with ID '{id}'");
        };

        let form = StudentForm::from_student(student);
        writeln!(out, "Editing {}:", form.id)?;
        writeln!(out, "  Name: {}", form.name)?;
        writeln!(out, "  Year: {}", form.year)?;
        for (module, mark) in student.modules().modules().zip(&form.marks) {
            writeln!(out, "  {module}: {mark}")?;
        }
        writeln!(out, "Use `save [--name ..] [--year ..] [--marks ..]` to replace the record.")?;

        self.editing = Some(id);
        Ok(())
    }

    fn save<W: Write>(
        &mut self,
        name: Option<String>,
        year: Option<String>,
        marks: Option<Vec<String>>,
        out: &mut W,
    ) -> Result<()> {
        let Some(id) = self.editing.clone() else {
            bail!("not editing any student; use `edit <ID>` first");
        };
        let Some(current) = self.manager.get(&id) else {
            self.editing = None;
            bail!("student {id} no longer exists");
        };

        let mut form = StudentForm::from_student(current);
        if let Some(name) = name {
            form.name = name;
        }
        if let Some(year) = year {
            form.year = year;
        }
        if let Some(marks) = marks {
            form.marks = marks;
        }

        let input = form.collect(&self.config.years)?;
        self.manager
            .modify(&input.id, &input.name, &input.year, input.modules);
        self.editing = None;
        writeln!(out, "Student {}'s record updated successfully!", input.name)?;
        Ok(())
    }

    fn list<W: Write>(&self, search: Option<&str>, out: &mut W) -> Result<()> {
        let term = search.unwrap_or("").trim();
        let students = self.manager.search(term);
        if students.is_empty() {
            if term.is_empty() {
                writeln!(out, "No students recorded.")?;
            } else {
                writeln!(out, "No students match '{term}'.")?;
            }
            return Ok(());
        }
        writeln!(out, "{}", views::student_table(&students))?;
        Ok(())
    }

    fn view<W: Write>(
        &self,
        id: &str,
        format: ReportFormat,
        output: Option<PathBuf>,
        out: &mut W,
    ) -> Result<()> {
        let id = normalize_id(id);
        let Some(student) = self.manager.get(&id) else {
            writeln!(out, "No student with ID '{id}'.")?;
            return Ok(());
        };
        let card = ReportCard::build_today(student, &self.config)?;

        match (format, output) {
            (ReportFormat::Text, None) => write!(out, "{}", render_text(&card))?,
            (ReportFormat::Json, None) => writeln!(out, "{}", card.to_json()?)?,
            (ReportFormat::Html, None) => writeln!(out, "{}", generate_html(&card))?,
            (format, Some(path)) => {
                match format {
                    ReportFormat::Text => write_text_report(&card, &path)?,
                    ReportFormat::Json => card.save_json(&path)?,
                    ReportFormat::Html => write_html_report(&card, &path)?,
                }
                info!(id = %card.student_id, path = %path.display(), "report card written");
                writeln!(out, "Report card saved to {}", path.display())?;
            }
        }
        Ok(())
    }

    fn delete<W: Write>(&mut self, id: &str, out: &mut W) -> Result<()> {
        let id = normalize_id(id);
        if self.editing.as_deref() == Some(id.as_str()) {
            self.editing = None;
        }
        match self.manager.remove(&id) {
            Some(student) => writeln!(out, "Deleted {} ({}).", student.id(), student.name())?,
            None => writeln!(out, "No student with ID '{id}'; nothing deleted.")?,
        }
        Ok(())
    }
}

/// Bad user input is routine in a session and only worth a debug line.
fn is_input_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<GradebookError>()
        .is_some_and(GradebookError::is_input_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> String {
        let mut session = Session::new(GradebookConfig::default());
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    const ADD_ALICE: &str =
        "add --id s1 --name Alice --year \"Year 1\" --marks 60,70,80,90\n";

    #[test]
    fn add_then_list() {
        let out = run(&format!("{ADD_ALICE}list\n"));
        assert!(out.contains("Student Alice saved successfully!"));
        assert!(out.contains("S1"));
        assert!(out.contains("75.00"));
    }

    #[test]
    fn duplicate_id_rejected_and_original_kept() {
        let script = format!(
            "{ADD_ALICE}add --id S1 --name Mallory --year \"Year 2\" --marks 1,2,3,4\nlist\n"
        );
        let out = run(&script);
        assert!(out.contains("Error: student ID 'S1' already exists"));
        assert!(out.contains("Alice"));
        assert!(!out.contains("Mallory"));
    }

    #[test]
    fn invalid_marks_reported() {
        let out = run("add --id S1 --name Alice --year \"Year 1\" --marks 60,70,80,101\nlist\n");
        assert!(out.contains("Error: invalid input"));
        assert!(out.contains("No students recorded."));
    }

    #[test]
    fn missing_fields_reported() {
        let out = run("add --marks 1,2,3,4\n");
        assert!(out.contains("missing student ID, name, year"));
    }

    #[test]
    fn edit_and_save_replaces_record() {
        let mut session = Session::new(GradebookConfig::default());
        let mut out = Vec::new();
        let script = format!(
            "{ADD_ALICE}edit s1\nsave --name \"Alice Smith\" --marks 30,70,80,90\n"
        );
        session.run(script.as_bytes(), &mut out, false).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Editing S1:"));
        assert!(out.contains("  Networking: 60"));
        assert!(out.contains("Student Alice Smith's record updated successfully!"));

        assert_eq!(session.manager.len(), 1);
        let s = session.manager.get("S1").unwrap();
        assert_eq!(s.name(), "Alice Smith");
        assert_eq!(s.modules().get("Networking"), Some(30.0));
        // One mark under 40 fails the student.
        assert_eq!(s.grade().unwrap(), gradebook_core::Grade::F);
    }

    #[test]
    fn save_keeps_prefilled_values() {
        let mut session = Session::new(GradebookConfig::default());
        let mut out = Vec::new();
        let script = format!("{ADD_ALICE}edit S1\nsave --year \"Year 3\"\n");
        session.run(script.as_bytes(), &mut out, false).unwrap();

        let s = session.manager.get("S1").unwrap();
        assert_eq!(s.name(), "Alice");
        assert_eq!(s.year(), "Year 3");
        assert_eq!(s.modules().get("IoT"), Some(70.0));
        assert_eq!(s.modules().get("Networking"), None);
        assert!(session.editing.is_none());
    }

    #[test]
    fn editing_state_guards() {
        let out = run(&format!("save\n{ADD_ALICE}edit S1\n{ADD_ALICE}cancel\ncancel\nedit S9\n"));
        assert!(out.contains("Error: not editing any student"));
        assert!(out.contains("Error: finish editing S1 first"));
        assert!(out.contains("Stopped editing S1."));
        assert!(out.contains("Not editing any student."));
        assert!(out.contains("Error: no student with ID 'S9'"));
    }

    #[test]
    fn delete_is_a_noop_when_absent() {
        let out = run(&format!("{ADD_ALICE}delete s1\ndelete s1\nlist\n"));
        assert!(out.contains("Deleted S1 (Alice)."));
        assert!(out.contains("No student with ID 'S1'; nothing deleted."));
        assert!(out.contains("No students recorded."));
    }

    #[test]
    fn deleting_edited_record_clears_selection() {
        let mut session = Session::new(GradebookConfig::default());
        let mut out = Vec::new();
        let script = format!("{ADD_ALICE}edit S1\ndelete S1\n");
        session.run(script.as_bytes(), &mut out, false).unwrap();
        assert!(session.editing.is_none());
    }

    #[test]
    fn search_filters_list() {
        let script = format!(
            "{ADD_ALICE}add --id S2 --name Bob --year \"Year 1\" --marks 50,50,50,50\nlist ALI\nlist zed\n"
        );
        let out = run(&script);
        let filtered = out.split("Student Bob saved successfully!").nth(1).unwrap();
        assert!(filtered.contains("Alice"));
        assert!(!filtered.contains("Bob"));
        assert!(out.contains("No students match 'zed'."));
    }

    #[test]
    fn view_prints_report_card() {
        let out = run(&format!("{ADD_ALICE}view s1\nview S7\n"));
        assert!(out.contains("Report Card"));
        assert!(out.contains("Final Average: 75.00"));
        assert!(out.contains("Final Grade: A"));
        assert!(out.contains("Remark: Excellent"));
        assert!(out.contains("No student with ID 'S7'."));
    }

    #[test]
    fn view_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s1.json");
        let script = format!(
            "{ADD_ALICE}view S1 --format json --output '{}'\n",
            path.display()
        );
        let out = run(&script);
        assert!(out.contains("Report card saved to"));
        let card = ReportCard::load_json(&path).unwrap();
        assert_eq!(card.student_id, "S1");
        assert_eq!(card.remark, "Excellent");
    }

    #[test]
    fn view_writes_text_file_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards").join("s1.txt");
        let script = format!(
            "{ADD_ALICE}view S1 --format text --output '{}'\n",
            path.display()
        );
        let out = run(&script);
        assert!(out.contains("Report card saved to"));
        assert!(!out.contains("Error:"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Final Grade: A"));
        assert!(text.contains("Remark: Excellent"));
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut script = ADD_ALICE.as_bytes().to_vec();
        script.extend_from_slice(b"add --id s2 --name Jos\xe9 --year \"Year 1\" --marks 1,2,3,4\n");
        script.extend_from_slice(b"add --id s3 --name Cara --year \"Year 2\" --marks 50,50,50,50\n");

        let mut session = Session::new(GradebookConfig::default());
        let mut out = Vec::new();
        session.run(&script[..], &mut out, false).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error: line is not valid UTF-8, ignored"));
        assert!(out.contains("Student Cara saved successfully!"));
        assert!(session.manager.contains("S1"));
        assert!(!session.manager.contains("S2"));
        assert!(session.manager.contains("S3"));
    }

    #[test]
    fn form_errors_are_input_errors() {
        let err: anyhow::Error = GradebookError::UnknownYear("Year 9".into()).into();
        assert!(is_input_error(&err));
        let err: anyhow::Error = GradebookError::DuplicateId("S1".into()).into();
        assert!(!is_input_error(&err));
        assert!(!is_input_error(&anyhow::anyhow!("no student with ID 'S1'")));
    }

    #[test]
    fn unknown_commands_and_bad_quotes_do_not_end_session() {
        let out = run(&format!("frobnicate\nadd --name \"Ada\n{ADD_ALICE}"));
        assert!(out.contains("Error: unrecognized subcommand 'frobnicate'"));
        assert!(out.contains("unterminated \" quote"));
        assert!(out.contains("Student Alice saved successfully!"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = run(&format!("quit\n{ADD_ALICE}"));
        assert!(out.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let out = run("# setup\n\n   \nstats\n");
        assert!(out.starts_with("Students graded: 0"));
    }

    #[test]
    fn help_is_printed_not_an_error() {
        let out = run("help\n");
        assert!(out.contains("Record a new student"));
        assert!(!out.contains("Error:"));
    }
}
