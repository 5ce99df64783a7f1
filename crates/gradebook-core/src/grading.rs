//! Letter grades, the threshold table, and remarks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Any single mark below this fails the student outright.
pub const FAIL_FLOOR: f64 = 40.0;

/// Minimum average for each passing grade, highest first.
const THRESHOLDS: [(f64, Grade); 4] = [
    (70.0, Grade::A),
    (60.0, Grade::B),
    (50.0, Grade::C),
    (40.0, Grade::D),
];

/// A letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Grade for an average, ignoring the per-mark floor.
    pub fn from_average(average: f64) -> Grade {
        THRESHOLDS
            .iter()
            .find(|(min, _)| average >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// Grade for a set of marks: any mark under [`FAIL_FLOOR`] is an `F`,
    /// otherwise the average decides.
    ///
    /// Returns `None` when there are no marks.
    pub fn from_marks<I>(marks: I) -> Option<Grade>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut below_floor = false;
        for mark in marks {
            count += 1;
            sum += mark;
            below_floor |= mark < FAIL_FLOOR;
        }
        if count == 0 {
            return None;
        }
        if below_floor {
            return Some(Grade::F);
        }
        Some(Grade::from_average(sum / count as f64))
    }

    /// The fixed remark printed on report cards.
    pub fn remark(self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Satisfactory",
            Grade::D => "Needs Improvement",
            Grade::F => "Fail",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Remark lookup keyed by the grade's letter.
///
/// Unknown letters yield an empty string rather than an error.
pub fn remark(grade: &str) -> &'static str {
    match grade {
        "A" => Grade::A.remark(),
        "B" => Grade::B.remark(),
        "C" => Grade::C.remark(),
        "D" => Grade::D.remark(),
        "F" => Grade::F.remark(),
        _ => "",
    }
}
