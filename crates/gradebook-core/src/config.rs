//! Gradebook configuration: institution details and the year catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::YearCatalog;

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Institution name printed at the top of report cards.
    #[serde(default = "default_institution")]
    pub institution: String,
    /// Postal address printed under the institution name.
    #[serde(default = "default_address")]
    pub address: String,
    /// Cohort years and their modules.
    #[serde(default)]
    pub years: YearCatalog,
}

fn default_institution() -> String {
    "University of Cybersecurity, London".to_string()
}
fn default_address() -> String {
    "123 University St, London, UK".to_string()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            address: default_address(),
            years: YearCatalog::default(),
        }
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_INSTITUTION`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(name) = std::env::var("GRADEBOOK_INSTITUTION") {
        config.institution = name;
    }

    Ok(config)
}

/// Parse and validate a TOML config document.
pub fn parse_config(content: &str) -> Result<GradebookConfig> {
    let config: GradebookConfig = toml::from_str(content)?;
    config.years.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
