//! Table views printed by the session.

use comfy_table::{Cell, Table};

use gradebook_core::catalog::YearCatalog;
use gradebook_core::statistics::ClassSummary;
use gradebook_core::Student;

/// The records table: one row per student, no remark column.
pub fn student_table(students: &[&Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Year", "Average", "Grade"]);

    for student in students {
        let average = student
            .average()
            .map(|avg| format!("{avg:.2}"))
            .unwrap_or_else(|_| "-".to_string());
        let grade = student
            .grade()
            .map(|g| g.to_string())
            .unwrap_or_else(|_| "?".to_string());
        table.add_row(vec![
            Cell::new(student.id()),
            Cell::new(student.name()),
            Cell::new(student.year()),
            Cell::new(average),
            Cell::new(grade),
        ]);
    }

    table
}

pub fn years_table(catalog: &YearCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Year", "Modules"]);
    for year in catalog.years() {
        table.add_row(vec![Cell::new(&year.label), Cell::new(year.modules.join(", "))]);
    }
    table
}

pub fn summary_lines(summary: &ClassSummary) -> Vec<String> {
    let fmt_avg = |v: Option<f64>| v.map(|a| format!("{a:.2}")).unwrap_or_else(|| "-".into());

    let mut lines = vec![
        format!("Students graded: {}", summary.graded),
        format!("Class average: {}", fmt_avg(summary.mean_average)),
        format!("Best average: {}", fmt_avg(summary.best_average)),
        format!("Lowest average: {}", fmt_avg(summary.worst_average)),
        format!("Pass rate: {:.1}%", summary.pass_rate() * 100.0),
    ];
    if summary.ungraded > 0 {
        lines.push(format!("Students without marks: {}", summary.ungraded));
    }

    let distribution: Vec<String> = summary
        .grade_distribution
        .iter()
        .map(|(grade, count)| format!("{grade}={count}"))
        .collect();
    lines.push(format!("Grades: {}", distribution.join(" ")));
    lines
}
