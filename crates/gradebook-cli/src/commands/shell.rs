//! The `gradebook shell` command.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::config::load_config_from;

use crate::session::Session;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();

    Session::new(config).run(stdin.lock(), &mut stdout, interactive)
}
