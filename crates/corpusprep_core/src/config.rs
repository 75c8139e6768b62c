/// Vocabulary size used when none is configured.
pub const DEFAULT_VOCAB_CAP: usize = 40_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("vocabulary size must not be negative (got {0})")]
    NegativeVocabCap(i64),
    #[error("vocabulary size is not a number: {0:?}")]
    InvalidVocabCap(String),
}

/// Options the processor consumes for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreprocessConfig {
    pub lowercase: bool,
    /// `Some(cap)` turns on vocabulary building.
    pub vocab_cap: Option<usize>,
}

impl PreprocessConfig {
    pub fn new(lowercase: bool) -> Self {
        Self {
            lowercase,
            vocab_cap: None,
        }
    }

    pub fn with_vocabulary(mut self, cap: usize) -> Self {
        self.vocab_cap = Some(cap);
        self
    }

    pub fn build_vocabulary(&self) -> bool {
        self.vocab_cap.is_some()
    }
}

/// Parse a user-supplied vocabulary size, rejecting negative values up front.
pub fn parse_vocab_cap(raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidVocabCap(raw.to_owned()))
        .and_then(vocab_cap_from_signed)
}

pub fn vocab_cap_from_signed(value: i64) -> Result<usize, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeVocabCap(value));
    }
    usize::try_from(value).map_err(|_| ConfigError::InvalidVocabCap(value.to_string()))
}
