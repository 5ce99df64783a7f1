//! HTML report card generator.
//!
//! Produces a self-contained, printable HTML file with the CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use gradebook_core::Grade;

use crate::card::ReportCard;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn grade_class(grade: Grade) -> &'static str {
    match grade {
        Grade::F => "fail",
        _ => "pass",
    }
}

/// Generate an HTML report card.
pub fn generate_html(card: &ReportCard) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Report Card — {} ({})</title>\n",
        html_escape(&card.name),
        html_escape(&card.student_id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Letterhead
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&card.institution)));
    html.push_str(&format!(
        "<p class=\"address\">{}</p>\n",
        html_escape(&card.address)
    ));
    html.push_str("<h2>Report Card</h2>\n");
    html.push_str("</header>\n");

    html.push_str("<section class=\"student\">\n<dl>\n");
    for (label, value) in [
        ("Student ID", card.student_id.clone()),
        ("Name", card.name.clone()),
        ("Year", card.year.clone()),
        ("Date", card.issued_on.format("%Y-%m-%d").to_string()),
    ] {
        html.push_str(&format!(
            "<dt>{label}</dt><dd>{}</dd>\n",
            html_escape(&value)
        ));
    }
    html.push_str("</dl>\n</section>\n");

    // Module table
    html.push_str("<table class=\"modules\">\n");
    html.push_str("<thead><tr><th>Module</th><th>Marks</th><th>Grade</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for line in &card.modules {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td><td class=\"{}\">{}</td></tr>\n",
            html_escape(&line.module),
            line.mark,
            grade_class(line.grade),
            line.grade
        ));
    }
    html.push_str("</tbody></table>\n");

    html.push_str("<section class=\"result\">\n");
    html.push_str(&format!(
        "<p>Final Average: <strong>{:.2}</strong></p>\n",
        card.average
    ));
    html.push_str(&format!(
        "<p>Final Grade: <strong class=\"{}\">{}</strong></p>\n",
        grade_class(card.grade),
        card.grade
    ));
    html.push_str(&format!(
        "<p>Remark: <strong>{}</strong></p>\n",
        html_escape(&card.remark)
    ));
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report card to a file.
pub fn write_html_report(card: &ReportCard, path: &Path) -> Result<()> {
    let html = generate_html(card);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report card to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #9ca3af; --head: #e0f2ff; --pass: #dcfce7; --fail: #fde2e2; }
body { font-family: Arial, sans-serif; margin: 0 auto; padding: 2rem; max-width: 700px; background: var(--bg); color: var(--fg); }
header { text-align: center; }
h1 { margin-bottom: 0.25rem; }
.address { margin-top: 0; }
dl { display: grid; grid-template-columns: max-content auto; gap: 0.25rem 1rem; }
dt { font-weight: bold; }
dd { margin: 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.4rem 1rem; text-align: left; }
th { background: var(--head); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.result { text-align: center; }
@media print { body { padding: 0; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::tests::sample_card;

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&sample_card());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("University of Cybersecurity, London"));
        assert!(html.contains("S42"));
        assert!(html.contains("<td>38.50</td>"));
        assert!(html.contains("Remark: <strong>Fail</strong>"));
    }

    #[test]
    fn html_escapes_student_text() {
        let html = generate_html(&sample_card());
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(!html.contains("<Lovelace>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("card.html");

        write_html_report(&sample_card(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
