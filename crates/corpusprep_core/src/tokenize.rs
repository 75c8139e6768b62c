use std::sync::LazyLock;

use regex::Regex;

/// Unicode decimal digits (`\p{Nd}`), not only ASCII.
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("digit pattern"));

const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

pub trait Tokenizer {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Whitespace split followed by a capturing split on a fixed punctuation set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PunctuationTokenizer {
    pub lowercase: bool,
}

impl PunctuationTokenizer {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }
}

impl Tokenizer for PunctuationTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        tokenize(line, self.lowercase)
    }
}

/// Characters that always form a token of their own.
pub fn is_split_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | '"' | '\'' | ':' | ';' | ')' | '(')
}

/// Normalize one line and split it into tokens.
///
/// Normalization runs before splitting: optional lowercasing, then U+2019 to
/// `'`, then every decimal digit to `0`. Words are then split at each
/// punctuation character from [`is_split_punctuation`], keeping the
/// punctuation as a token. Never yields empty tokens.
pub fn tokenize(line: &str, lowercase: bool) -> Vec<String> {
    let normalized = normalize(line, lowercase);
    let mut tokens = Vec::new();
    for word in normalized.split(is_word_separator).filter(|w| !w.is_empty()) {
        split_word(word, &mut tokens);
    }
    tokens
}

/// Unicode whitespace plus the ASCII information separators U+001C..U+001F,
/// which plain-text corpora treat as field and record breaks.
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

fn normalize(line: &str, lowercase: bool) -> String {
    let cased = if lowercase {
        line.to_lowercase()
    } else {
        line.to_owned()
    };
    let quoted = cased.replace(RIGHT_SINGLE_QUOTE, "'");
    DIGIT.replace_all(&quoted, "0").into_owned()
}

fn split_word(word: &str, out: &mut Vec<String>) {
    let mut run_start = 0;
    for (idx, c) in word.char_indices() {
        if !is_split_punctuation(c) {
            continue;
        }
        if run_start < idx {
            out.push(word[run_start..idx].to_owned());
        }
        let end = idx + c.len_utf8();
        out.push(word[idx..end].to_owned());
        run_start = end;
    }
    if run_start < word.len() {
        out.push(word[run_start..].to_owned());
    }
}
