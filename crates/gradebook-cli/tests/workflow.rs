//! End-to-end workflow across the crates: form intake, the repository, and
//! report card rendering, without going through the binary.

use chrono::NaiveDate;

use gradebook_core::catalog::YearCatalog;
use gradebook_core::config::GradebookConfig;
use gradebook_core::intake::StudentForm;
use gradebook_core::statistics::summarize;
use gradebook_core::{Grade, GradebookError, StudentManager};
use gradebook_report::text::render_text;
use gradebook_report::ReportCard;

fn form(id: &str, name: &str, year: &str, marks: [&str; 4]) -> StudentForm {
    StudentForm {
        id: id.into(),
        name: name.into(),
        year: year.into(),
        marks: marks.iter().map(|m| m.to_string()).collect(),
    }
}

/// Store a form the way the session does: validate, refuse duplicates, store.
fn submit(
    manager: &mut StudentManager,
    catalog: &YearCatalog,
    form: StudentForm,
) -> Result<(), GradebookError> {
    let input = form.collect(catalog)?;
    if manager.contains(&input.id) {
        return Err(GradebookError::DuplicateId(input.id));
    }
    manager.store(&input.id, &input.name, &input.year, input.modules);
    Ok(())
}

#[test]
fn class_of_three() {
    let config = GradebookConfig::default();
    let mut manager = StudentManager::new();

    for f in [
        form("s1", "Alice", "Year 1", ["60", "70", "80", "90"]),
        form("s2", "Bob", "Year 2", ["100", "100", "100", "39"]),
        form(" s3 ", "Cara", "year 3", ["50", "52", "49", "51"]),
    ] {
        submit(&mut manager, &config.years, f).unwrap();
    }

    let dup = form("S1", "Dup", "Year 1", ["1", "1", "1", "1"]);
    let err = submit(&mut manager, &config.years, dup).unwrap_err();
    assert_eq!(err, GradebookError::DuplicateId("S1".into()));

    let ids: Vec<&str> = manager.sorted().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["S1", "S2", "S3"]);

    assert_eq!(manager.get("S1").unwrap().grade().unwrap(), Grade::A);
    assert_eq!(manager.get("S2").unwrap().grade().unwrap(), Grade::F);
    assert_eq!(manager.get("S3").unwrap().grade().unwrap(), Grade::C);
    assert_eq!(manager.get("S3").unwrap().year(), "Year 3");

    let summary = summarize(&manager);
    assert_eq!(summary.graded, 3);
    assert_eq!(summary.grade_distribution[&Grade::F], 1);
}

#[test]
fn edit_replaces_then_report_reflects_new_marks() {
    let config = GradebookConfig::default();
    let mut manager = StudentManager::new();
    let first = form("S1", "Alice", "Year 1", ["45", "45", "45", "45"]);
    submit(&mut manager, &config.years, first).unwrap();

    let mut edited = StudentForm::from_student(manager.get("S1").unwrap());
    edited.marks = vec!["62".into(), "64".into(), "60".into(), "58".into()];
    let input = edited.collect(&config.years).unwrap();
    manager.modify(&input.id, &input.name, &input.year, input.modules);

    assert_eq!(manager.len(), 1);
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let card = ReportCard::build(manager.get("S1").unwrap(), &config, date).unwrap();
    assert_eq!(card.grade, Grade::B);
    assert_eq!(card.remark, "Good");

    let text = render_text(&card);
    assert!(text.contains("Date: 2026-10-18"));
    assert!(text.contains("Final Average: 61.00"));
}
