//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml with your institution and modules");
    println!("  2. Run: gradebook years");
    println!("  3. Run: gradebook");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

institution = "University of Cybersecurity, London"
address = "123 University St, London, UK"

# Every year lists exactly four modules, in form order.
[[years]]
label = "Year 1"
modules = ["Networking", "Operating System", "Information Security", "Problem Solving & Programming"]

[[years]]
label = "Year 2"
modules = ["Cryptography", "Algorithms & Data Structure", "Computer Forensics", "Communication & Collaboration"]

[[years]]
label = "Year 3"
modules = ["Secure Programming", "IoT", "Contemporary Issues", "Project"]
"#;
