//! Optional RON settings file supplying defaults for the command line.
//!
//! ```ron
//! (
//!     lower: true,
//!     vocab_size: Some(30000),
//!     progress: Some(true),
//!     count_lines: Some(false),
//! )
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use corpusprep_core::{vocab_cap_from_signed, DEFAULT_VOCAB_CAP};
use corpusprep_engine::RunPlan;
use corpusprep_logging::{prep_debug, prep_info};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub lower: bool,
    /// Signed so a negative value is reported as such rather than as a parse error.
    pub vocab_size: Option<i64>,
    pub progress: Option<bool>,
    /// Pre-count input lines so the progress bar has a total.
    pub count_lines: Option<bool>,
}

/// A validated plan plus the presentation choices that sit outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub plan: RunPlan,
    pub show_progress: bool,
}

pub fn load(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {path:?}"))?;
    let settings: Settings = ron::from_str(&content)
        .with_context(|| format!("failed to parse settings file {path:?}"))?;
    prep_info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Combine command-line flags with file settings. Flags win over the file,
/// the file wins over built-in defaults.
pub fn resolve(cli: &Cli, settings: &Settings) -> Result<Resolved> {
    if cli.vocab_size.is_some() && cli.vocab_file.is_none() {
        bail!("--vocab-size requires --vocab-file");
    }
    let file_cap = settings
        .vocab_size
        .map(vocab_cap_from_signed)
        .transpose()
        .context("invalid vocab_size in settings file")?;
    let show_progress = !cli.no_progress && settings.progress.unwrap_or(true);
    let count_lines =
        show_progress && !cli.no_line_count && settings.count_lines.unwrap_or(true);

    let mut plan = RunPlan::new(&cli.input, &cli.output)
        .lowercase(cli.lower || settings.lower)
        .count_lines(count_lines);
    if let Some(vocab_file) = &cli.vocab_file {
        let cap = cli.vocab_size.or(file_cap).unwrap_or(DEFAULT_VOCAB_CAP);
        plan = plan.with_vocabulary(vocab_file, cap);
    }
    plan.validate()?;
    prep_debug!("Resolved run plan: {:?} (progress={})", plan, show_progress);
    Ok(Resolved {
        plan,
        show_progress,
    })
}
