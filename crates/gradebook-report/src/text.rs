//! Plain-text report card for the terminal.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use crate::card::ReportCard;

/// Render a report card as text.
pub fn render_text(card: &ReportCard) -> String {
    let mut out = String::new();

    out.push_str(&card.institution);
    out.push('\n');
    out.push_str(&card.address);
    out.push_str("\n\nReport Card\n\n");

    for (label, value) in [
        ("Student ID", card.student_id.as_str()),
        ("Name", card.name.as_str()),
        ("Year", card.year.as_str()),
    ] {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out.push_str(&format!("Date: {}\n\n", card.issued_on.format("%Y-%m-%d")));

    let mut table = Table::new();
    table.set_header(vec!["Module", "Marks", "Grade"]);
    for line in &card.modules {
        table.add_row(vec![
            Cell::new(&line.module),
            Cell::new(format!("{:.2}", line.mark)),
            Cell::new(line.grade),
        ]);
    }
    out.push_str(&table.to_string());
    out.push_str("\n\n");

    out.push_str(&format!("Final Average: {:.2}\n", card.average));
    out.push_str(&format!("Final Grade: {}\n", card.grade));
    out.push_str(&format!("Remark: {}\n", card.remark));
    out
}

/// Write a text report card to a file, creating parent directories.
pub fn write_text_report(card: &ReportCard, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, render_text(card))
        .with_context(|| format!("failed to write report card to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::tests::sample_card;

    #[test]
    fn text_card_has_all_sections() {
        let text = render_text(&sample_card());
        assert!(text.starts_with("University of Cybersecurity, London\n"));
        assert!(text.contains("Report Card"));
        assert!(text.contains("Student ID: S42"));
        assert!(text.contains("Date: 2026-06-30"));
        assert!(text.contains("38.50"));
        assert!(text.contains("Final Average: 66.38"));
        assert!(text.contains("Final Grade: F"));
        assert!(text.contains("Remark: Fail"));
    }

    #[test]
    fn text_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards").join("2026").join("s42.txt");

        write_text_report(&sample_card(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, render_text(&sample_card()));
    }

    #[test]
    fn text_report_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_text_report(&sample_card(), &blocker.join("s42.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("taken"));
    }
}
