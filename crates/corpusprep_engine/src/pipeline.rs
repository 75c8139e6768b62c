use std::path::{Path, PathBuf};

use corpusprep_core::{process, PreprocessConfig, ProcessError};
use corpusprep_logging::{prep_debug, prep_info};

use crate::persist::{PersistError, StagedFile};
use crate::source::{count_lines, LineSource, SourceError};

/// Receives progress while a corpus is streamed.
pub trait ProgressSink {
    /// Called once before the first line. `total_lines` is `None` when the
    /// input was not pre-counted.
    fn start(&self, total_lines: Option<u64>);
    fn advance(&self, lines: u64);
    fn finish(&self);
}

/// Progress sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self, _total_lines: Option<u64>) {}
    fn advance(&self, _lines: u64) {}
    fn finish(&self) {}
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("invalid run configuration: {0}")]
    InvalidPlan(String),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Everything one run needs: where to read, where to write, how to tokenize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub vocab_file: Option<PathBuf>,
    pub config: PreprocessConfig,
    /// Pre-count input lines so progress can show a total.
    pub count_lines: bool,
}

impl RunPlan {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            vocab_file: None,
            config: PreprocessConfig::default(),
            count_lines: false,
        }
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.config.lowercase = lowercase;
        self
    }

    pub fn with_vocabulary(mut self, path: impl Into<PathBuf>, cap: usize) -> Self {
        self.vocab_file = Some(path.into());
        self.config = self.config.with_vocabulary(cap);
        self
    }

    pub fn count_lines(mut self, count_lines: bool) -> Self {
        self.count_lines = count_lines;
        self
    }

    /// Reject plans that would clobber their own input or mix up outputs.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.vocab_file.is_some() != self.config.build_vocabulary() {
            return Err(RunError::InvalidPlan(
                "a vocabulary file and a vocabulary size must be given together".into(),
            ));
        }
        if same_path(&self.input, &self.output) {
            return Err(RunError::InvalidPlan(format!(
                "output {:?} would overwrite the input",
                self.output
            )));
        }
        if let Some(vocab) = &self.vocab_file {
            if same_path(vocab, &self.input) || same_path(vocab, &self.output) {
                return Err(RunError::InvalidPlan(format!(
                    "vocabulary file {vocab:?} collides with the input or output"
                )));
            }
        }
        Ok(())
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub line_count: u64,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    /// Number of tokens written to the vocabulary file, if one was written.
    pub vocabulary_size: Option<usize>,
    pub malformed_sequences: u64,
    pub output_path: PathBuf,
    pub vocab_path: Option<PathBuf>,
}

/// Tokenize `plan.input` into `plan.output` and, if requested, rank a
/// vocabulary into `plan.vocab_file`.
///
/// Both files are staged and only renamed into place after the whole pass
/// succeeded. Any error aborts the run.
pub fn run(plan: &RunPlan, progress: &dyn ProgressSink) -> Result<RunOutcome, RunError> {
    plan.validate()?;

    let mut source = LineSource::open(&plan.input)?;
    let total_lines = if plan.count_lines {
        Some(count_lines(&plan.input)?)
    } else {
        None
    };
    prep_info!(
        "Processing {:?} -> {:?} (lowercase={}, vocab_cap={:?}, lines={:?})",
        plan.input,
        plan.output,
        plan.config.lowercase,
        plan.config.vocab_cap,
        total_lines
    );

    let mut output = StagedFile::create(&plan.output)?;
    progress.start(total_lines);
    let report = process(
        source.by_ref().map(|line| line.map_err(RunError::from)),
        plan.config,
        |line: &str| -> Result<(), RunError> {
            output.write_line(line)?;
            progress.advance(1);
            Ok(())
        },
    )?;
    progress.finish();

    let staged_vocab = match (&plan.vocab_file, &report.vocabulary) {
        (Some(path), Some(vocabulary)) => {
            let mut staged = StagedFile::create(path)?;
            for token in vocabulary {
                staged.write_line(token)?;
            }
            Some(staged)
        }
        _ => None,
    };

    let output_path = output.commit()?;
    let vocab_path = staged_vocab.map(StagedFile::commit).transpose()?;

    let outcome = RunOutcome {
        line_count: report.line_count,
        total_tokens: report.total_tokens,
        distinct_tokens: report.distinct_tokens,
        vocabulary_size: report.vocabulary.as_ref().map(Vec::len),
        malformed_sequences: source.malformed_sequences(),
        output_path,
        vocab_path,
    };
    prep_debug!("Run outcome: {:?}", outcome);
    prep_info!(
        "Wrote {} lines ({} tokens) to {:?}",
        outcome.line_count,
        outcome.total_tokens,
        outcome.output_path
    );
    Ok(outcome)
}
