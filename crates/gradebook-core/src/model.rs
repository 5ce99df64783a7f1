//! Core data model types for gradebook.
//!
//! A [`Student`] is replaced wholesale on edit and never mutated in place,
//! so it exposes accessors only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradebookError;
use crate::grading::Grade;

/// One module and the mark earned in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleMark {
    /// Module name, drawn from the student's year.
    pub module: String,
    /// Numeric mark, 0 to 100 when entered through the form.
    pub mark: f64,
}

/// Ordered mapping from module name to mark.
///
/// Keys are unique and keep insertion order, which follows the fixed module
/// list of the student's year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ModuleMark>", into = "Vec<ModuleMark>")]
pub struct ModuleMarks(Vec<ModuleMark>);

impl ModuleMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mark for a module. An existing module keeps its position and
    /// has its mark replaced.
    pub fn insert(&mut self, module: impl Into<String>, mark: f64) {
        let module = module.into();
        match self.0.iter_mut().find(|m| m.module == module) {
            Some(existing) => existing.mark = mark,
            None => self.0.push(ModuleMark { module, mark }),
        }
    }

    pub fn get(&self, module: &str) -> Option<f64> {
        self.0.iter().find(|m| m.module == module).map(|m| m.mark)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleMark> {
        self.0.iter()
    }

    /// Marks in module order.
    pub fn marks(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|m| m.mark)
    }

    /// Module names in order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|m| m.module.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ModuleMarks {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut marks = ModuleMarks::new();
        for (module, mark) in iter {
            marks.insert(module, mark);
        }
        marks
    }
}

impl TryFrom<Vec<ModuleMark>> for ModuleMarks {
    type Error = String;

    fn try_from(entries: Vec<ModuleMark>) -> Result<Self, Self::Error> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.module == entry.module) {
                return Err(format!("duplicate module: {}", entry.module));
            }
        }
        Ok(ModuleMarks(entries))
    }
}

impl From<ModuleMarks> for Vec<ModuleMark> {
    fn from(marks: ModuleMarks) -> Self {
        marks.0
    }
}

impl<'a> IntoIterator for &'a ModuleMarks {
    type Item = &'a ModuleMark;
    type IntoIter = std::slice::Iter<'a, ModuleMark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One student's identity, cohort year and per-module marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: String,
    name: String,
    year: String,
    modules: ModuleMarks,
}

impl Student {
    /// Build a record from already-normalized values. Nothing is validated
    /// here; see [`crate::intake`] for the checked path.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        year: impl Into<String>,
        modules: ModuleMarks,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: year.into(),
            modules,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn modules(&self) -> &ModuleMarks {
        &self.modules
    }

    /// Arithmetic mean of all module marks.
    pub fn average(&self) -> Result<f64, GradebookError> {
        if self.modules.is_empty() {
            return Err(GradebookError::EmptyMarks {
                id: self.id.clone(),
            });
        }
        let sum: f64 = self.modules.marks().sum();
        Ok(sum / self.modules.len() as f64)
    }

    /// Letter grade, recomputed from the marks on every call.
    pub fn grade(&self) -> Result<Grade, GradebookError> {
        Grade::from_marks(self.modules.marks()).ok_or_else(|| GradebookError::EmptyMarks {
            id: self.id.clone(),
        })
    }

    /// Case-insensitive substring match on id or name. An empty term
    /// matches everyone.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term) || self.name.to_lowercase().contains(&term)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.grade() {
            Ok(grade) => write!(f, "{} | {} | {} | {}", self.id, self.name, self.year, grade),
            Err(_) => write!(f, "{} | {} | {} | ?", self.id, self.name, self.year),
        }
    }
}
