//! The closed set of cohort years and the four modules each one takes.

use serde::{Deserialize, Serialize};

use crate::error::GradebookError;

/// Number of module slots on the entry form.
pub const MODULES_PER_YEAR: usize = 4;

/// One cohort label and its fixed module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGroup {
    pub label: String,
    pub modules: Vec<String>,
}

impl YearGroup {
    fn new(label: &str, modules: [&str; MODULES_PER_YEAR]) -> Self {
        Self {
            label: label.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// All year groups, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearCatalog {
    years: Vec<YearGroup>,
}

impl Default for YearCatalog {
    fn default() -> Self {
        Self {
            years: vec![
                YearGroup::new(
                    "Year 1",
                    [
                        "Networking",
                        "Operating System",
                        "Information Security",
                        "Problem Solving & Programming",
                    ],
                ),
                YearGroup::new(
                    "Year 2",
                    [
                        "Cryptography",
                        "Algorithms & Data Structure",
                        "Computer Forensics",
                        "Communication & Collaboration",
                    ],
                ),
                YearGroup::new(
                    "Year 3",
                    ["Secure Programming", "IoT", "Contemporary Issues", "Project"],
                ),
            ],
        }
    }
}

impl YearCatalog {
    /// Build a catalog, rejecting duplicate labels and years that do not
    /// list exactly [`MODULES_PER_YEAR`] distinct modules.
    pub fn new(years: Vec<YearGroup>) -> Result<Self, GradebookError> {
        let catalog = Self { years };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), GradebookError> {
        if self.years.is_empty() {
            return Err(GradebookError::Validation(
                "year catalog must list at least one year".into(),
            ));
        }
        for (i, year) in self.years.iter().enumerate() {
            if year.label.trim().is_empty() {
                return Err(GradebookError::Validation("year label is empty".into()));
            }
            if self.years[..i]
                .iter()
                .any(|y| y.label.eq_ignore_ascii_case(&year.label))
            {
                return Err(GradebookError::Validation(format!(
                    "duplicate year label: {}",
                    year.label
                )));
            }
            if year.modules.len() != MODULES_PER_YEAR {
                return Err(GradebookError::Validation(format!(
                    "{} lists {} modules, expected {MODULES_PER_YEAR}",
                    year.label,
                    year.modules.len()
                )));
            }
            for (j, module) in year.modules.iter().enumerate() {
                if year.modules[..j].contains(module) {
                    return Err(GradebookError::Validation(format!(
                        "{} lists module '{module}' twice",
                        year.label
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn years(&self) -> &[YearGroup] {
        &self.years
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(|y| y.label.as_str())
    }

    /// Look up a year by label, ignoring ASCII case and surrounding space.
    pub fn find(&self, label: &str) -> Option<&YearGroup> {
        let label = label.trim();
        self.years
            .iter()
            .find(|y| y.label.eq_ignore_ascii_case(label))
    }
}
