//! Report card model with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gradebook_core::config::GradebookConfig;
use gradebook_core::{Grade, GradebookError, Student};

/// A printable report card for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    /// Institution name for the letterhead.
    pub institution: String,
    /// Institution address for the letterhead.
    pub address: String,
    /// Date the card was issued.
    pub issued_on: NaiveDate,
    pub student_id: String,
    pub name: String,
    pub year: String,
    /// One line per module, in module order.
    pub modules: Vec<ModuleLine>,
    /// Final average over all modules.
    pub average: f64,
    /// Final letter grade.
    pub grade: Grade,
    /// Remark for the final grade.
    pub remark: String,
}

/// A single row of the module table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleLine {
    pub module: String,
    pub mark: f64,
    /// Letter the mark alone earns under the average thresholds.
    ///
    /// Informational only. The final grade also fails the whole card when any
    /// module is below 40, so a row can read `A` on a card graded `F`.
    pub grade: Grade,
}

impl ReportCard {
    /// Build a card for `student`, issued on `issued_on`.
    ///
    /// Fails with `EmptyMarks` when the student has no modules.
    pub fn build(
        student: &Student,
        config: &GradebookConfig,
        issued_on: NaiveDate,
    ) -> Result<Self, GradebookError> {
        let average = student.average()?;
        let grade = student.grade()?;

        let modules = student
            .modules()
            .iter()
            .map(|m| ModuleLine {
                module: m.module.clone(),
                mark: m.mark,
                grade: Grade::from_average(m.mark),
            })
            .collect();

        Ok(Self {
            institution: config.institution.clone(),
            address: config.address.clone(),
            issued_on,
            student_id: student.id().to_string(),
            name: student.name().to_string(),
            year: student.year().to_string(),
            modules,
            average,
            grade,
            remark: grade.remark().to_string(),
        })
    }

    /// Build a card dated today (local time).
    pub fn build_today(
        student: &Student,
        config: &GradebookConfig,
    ) -> Result<Self, GradebookError> {
        Self::build(student, config, chrono::Local::now().date_naive())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report card")
    }

    /// Save the card as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report card to {}", path.display()))?;
        Ok(())
    }

    /// Load a card from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report card from {}", path.display()))?;
        let card: ReportCard =
            serde_json::from_str(&content).context("failed to parse report card JSON")?;
        Ok(card)
    }
}
