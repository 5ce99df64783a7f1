//! The `gradebook years` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::config::load_config_from;

use crate::views::years_table;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    println!("{}", years_table(&config.years));
    Ok(())
}
