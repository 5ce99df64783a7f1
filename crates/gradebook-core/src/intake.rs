//! Form intake: raw entry-form fields in, a validated record out.
//!
//! The repository trusts its callers, so everything it relies on is checked
//! here: required fields, a known year, one mark per module slot, and every
//! mark a number in `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::catalog::{YearCatalog, MODULES_PER_YEAR};
use crate::error::GradebookError;
use crate::model::{ModuleMarks, Student};

/// Lowest accepted mark.
pub const MIN_MARK: f64 = 0.0;
/// Highest accepted mark.
pub const MAX_MARK: f64 = 100.0;

/// Canonical form of a student id: trimmed and upper-cased.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parse one mark field.
fn parse_mark(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("mark '{raw}' is not a number"))?;
    if !(MIN_MARK..=MAX_MARK).contains(&value) {
        return Err(format!("mark {raw} is outside {MIN_MARK}..={MAX_MARK}"));
    }
    Ok(value)
}

/// The entry form exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub year: String,
    /// One entry per module slot, in the year's module order.
    pub marks: Vec<String>,
}

/// A validated, normalized submission ready for the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentInput {
    pub id: String,
    pub name: String,
    /// Canonical year label from the catalog.
    pub year: String,
    pub modules: ModuleMarks,
}

impl StudentForm {
    /// Pre-fill the form from an existing record, as the edit view does.
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name().to_string(),
            year: student.year().to_string(),
            marks: student.modules().marks().map(format_mark).collect(),
        }
    }

    /// Validate and normalize the form against the year catalog.
    pub fn collect(&self, catalog: &YearCatalog) -> Result<StudentInput, GradebookError> {
        let id = normalize_id(&self.id);
        let name = self.name.trim().to_string();
        let year = self.year.trim();

        let mut missing = Vec::new();
        if id.is_empty() {
            missing.push("student ID");
        }
        if name.is_empty() {
            missing.push("name");
        }
        if year.is_empty() {
            missing.push("year");
        }
        if !missing.is_empty() {
            return Err(GradebookError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        let group = catalog
            .find(year)
            .ok_or_else(|| GradebookError::UnknownYear(year.to_string()))?;

        if self.marks.len() != MODULES_PER_YEAR {
            return Err(GradebookError::Validation(format!(
                "expected {MODULES_PER_YEAR} marks, got {}",
                self.marks.len()
            )));
        }

        let mut modules = ModuleMarks::new();
        for (module, raw) in group.modules.iter().zip(&self.marks) {
            let mark = parse_mark(raw)
                .map_err(|e| GradebookError::Validation(format!("{module}: {e}")))?;
            modules.insert(module.as_str(), mark);
        }

        Ok(StudentInput {
            id,
            name,
            year: group.label.clone(),
            modules,
        })
    }
}

/// Render a mark the way it is shown back in the form: no trailing `.0` for
/// whole numbers.
pub fn format_mark(mark: f64) -> String {
    if mark.fract() == 0.0 {
        format!("{mark:.0}")
    } else {
        mark.to_string()
    }
}
