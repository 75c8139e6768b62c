//! Corpusprep core: tokenization, frequency counting and vocabulary ranking.
//!
//! Everything here is pure and single-threaded; file handling lives in
//! `corpusprep_engine`.
mod config;
mod frequency;
mod processor;
mod tokenize;
mod vocab;

pub use config::{
    parse_vocab_cap, vocab_cap_from_signed, ConfigError, PreprocessConfig, DEFAULT_VOCAB_CAP,
};
pub use frequency::{accumulate, FrequencyTable};
pub use processor::{process, process_with, CorpusProcessor, Phase, ProcessError, ProcessReport};
pub use tokenize::{
    is_split_punctuation, is_word_separator, tokenize, PunctuationTokenizer, Tokenizer,
};
pub use vocab::select;
