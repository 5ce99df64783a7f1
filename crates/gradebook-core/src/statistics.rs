//! Class-wide summary statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grading::Grade;
use crate::manager::StudentManager;

/// Aggregate view over every graded student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Students with at least one mark.
    pub graded: usize,
    /// Students skipped because they have no marks.
    pub ungraded: usize,
    /// Mean of the per-student averages, if anyone was graded.
    pub mean_average: Option<f64>,
    /// Highest per-student average.
    pub best_average: Option<f64>,
    /// Lowest per-student average.
    pub worst_average: Option<f64>,
    /// Number of students per letter grade. Every grade is present.
    pub grade_distribution: BTreeMap<Grade, usize>,
}

impl ClassSummary {
    /// Share of graded students who did not fail, in `[0, 1]`.
    pub fn pass_rate(&self) -> f64 {
        if self.graded == 0 {
            return 0.0;
        }
        let failed = self.grade_distribution.get(&Grade::F).copied().unwrap_or(0);
        (self.graded - failed) as f64 / self.graded as f64
    }
}

/// Summarize every record in the repository.
pub fn summarize(manager: &StudentManager) -> ClassSummary {
    let mut grade_distribution: BTreeMap<Grade, usize> =
        Grade::ALL.iter().map(|g| (*g, 0)).collect();
    let mut averages = Vec::with_capacity(manager.len());
    let mut ungraded = 0;

    for student in manager.all().values() {
        match (student.average(), student.grade()) {
            (Ok(avg), Ok(grade)) => {
                averages.push(avg);
                *grade_distribution.entry(grade).or_default() += 1;
            }
            _ => ungraded += 1,
        }
    }

    let mean_average = if averages.is_empty() {
        None
    } else {
        Some(averages.iter().sum::<f64>() / averages.len() as f64)
    };

    ClassSummary {
        graded: averages.len(),
        ungraded,
        mean_average,
        best_average: averages.iter().copied().reduce(f64::max),
        worst_average: averages.iter().copied().reduce(f64::min),
        grade_distribution,
    }
}
