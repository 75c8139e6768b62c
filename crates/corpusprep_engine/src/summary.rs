use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::pipeline::{RunOutcome, RunPlan};

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("summary path {0:?} has no file name")]
    NoFileName(PathBuf),
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub vocab_file: Option<PathBuf>,
    pub lowercase: bool,
    pub vocab_cap: Option<usize>,
    pub line_count: u64,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    pub vocabulary_size: Option<usize>,
    pub malformed_sequences: u64,
    pub processed_utc: String,
}

impl RunSummary {
    pub fn new(plan: &RunPlan, outcome: &RunOutcome, processed_utc: impl Into<String>) -> Self {
        Self {
            input: plan.input.clone(),
            output: outcome.output_path.clone(),
            vocab_file: outcome.vocab_path.clone(),
            lowercase: plan.config.lowercase,
            vocab_cap: plan.config.vocab_cap,
            line_count: outcome.line_count,
            total_tokens: outcome.total_tokens,
            distinct_tokens: outcome.distinct_tokens,
            vocabulary_size: outcome.vocabulary_size,
            malformed_sequences: outcome.malformed_sequences,
            processed_utc: processed_utc.into(),
        }
    }
}

/// Write `summary` as pretty JSON to `path`, atomically.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<PathBuf, SummaryError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SummaryError::NoFileName(path.to_path_buf()))?;
    let mut content = serde_json::to_string_pretty(summary)?;
    content.push('\n');
    let writer = AtomicFileWriter::for_path(path);
    Ok(writer.write(filename, &content)?)
}
