use corpusprep_logging::prep_debug;

use crate::config::PreprocessConfig;
use crate::frequency::FrequencyTable;
use crate::tokenize::{PunctuationTokenizer, Tokenizer};
use crate::vocab::select;

/// Processor lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Streaming,
    Finalizing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub line_count: u64,
    pub total_tokens: u64,
    /// Distinct tokens seen; zero when no vocabulary was requested.
    pub distinct_tokens: usize,
    pub vocabulary: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("corpus processor already finished")]
    AlreadyFinished,
}

/// Single-pass line processor: tokenizes, counts and finally ranks.
#[derive(Debug)]
pub struct CorpusProcessor<T = PunctuationTokenizer> {
    tokenizer: T,
    vocab_cap: Option<usize>,
    counts: Option<FrequencyTable>,
    line_count: u64,
    total_tokens: u64,
    phase: Phase,
}

impl CorpusProcessor<PunctuationTokenizer> {
    pub fn new(config: PreprocessConfig) -> Self {
        Self::with_tokenizer(PunctuationTokenizer::new(config.lowercase), config.vocab_cap)
    }
}

impl<T: Tokenizer> CorpusProcessor<T> {
    pub fn with_tokenizer(tokenizer: T, vocab_cap: Option<usize>) -> Self {
        Self {
            tokenizer,
            vocab_cap,
            counts: vocab_cap.map(|_| FrequencyTable::new()),
            line_count: 0,
            total_tokens: 0,
            phase: Phase::Streaming,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Tokenize one input line and return the normalized output line
    /// (without a trailing newline).
    pub fn feed(&mut self, line: &str) -> Result<String, ProcessError> {
        if self.phase != Phase::Streaming {
            return Err(ProcessError::AlreadyFinished);
        }
        let tokens = self.tokenizer.tokenize(line);
        if let Some(counts) = self.counts.as_mut() {
            counts.accumulate(&tokens);
        }
        self.line_count += 1;
        self.total_tokens += tokens.len() as u64;
        Ok(tokens.join(" "))
    }

    /// Stop accepting lines. The processor stays in `Finalizing` until
    /// [`finish`](Self::finish) ranks the vocabulary.
    pub fn end_stream(&mut self) -> Result<(), ProcessError> {
        if self.phase != Phase::Streaming {
            return Err(ProcessError::AlreadyFinished);
        }
        self.phase = Phase::Finalizing;
        Ok(())
    }

    /// End the pass if still streaming and rank the vocabulary if one was
    /// requested.
    pub fn finish(&mut self) -> Result<ProcessReport, ProcessError> {
        match self.phase {
            Phase::Streaming => self.end_stream()?,
            Phase::Finalizing => {}
            Phase::Done => return Err(ProcessError::AlreadyFinished),
        }

        let counts = self.counts.take();
        let distinct_tokens = counts.as_ref().map_or(0, FrequencyTable::len);
        let vocabulary = match (counts, self.vocab_cap) {
            (Some(counts), Some(cap)) => Some(select(&counts, cap)),
            _ => None,
        };
        prep_debug!(
            "Finished pass: lines={} tokens={} distinct={} vocabulary={:?}",
            self.line_count,
            self.total_tokens,
            distinct_tokens,
            vocabulary.as_ref().map(Vec::len)
        );

        self.phase = Phase::Done;
        Ok(ProcessReport {
            line_count: self.line_count,
            total_tokens: self.total_tokens,
            distinct_tokens,
            vocabulary,
        })
    }
}

/// Drive a whole pass: read each line, hand its output line to `sink`,
/// then finalize.
///
/// The first source or sink error aborts the pass and is returned as is.
pub fn process<I, F, E>(lines: I, config: PreprocessConfig, sink: F) -> Result<ProcessReport, E>
where
    I: IntoIterator<Item = Result<String, E>>,
    F: FnMut(&str) -> Result<(), E>,
    E: From<ProcessError>,
{
    process_with(CorpusProcessor::new(config), lines, sink)
}

/// Like [`process`] but with a caller-supplied processor.
pub fn process_with<T, I, F, E>(
    mut processor: CorpusProcessor<T>,
    lines: I,
    mut sink: F,
) -> Result<ProcessReport, E>
where
    T: Tokenizer,
    I: IntoIterator<Item = Result<String, E>>,
    F: FnMut(&str) -> Result<(), E>,
    E: From<ProcessError>,
{
    for line in lines {
        let output = processor.feed(&line?)?;
        sink(&output)?;
    }
    Ok(processor.finish()?)
}
