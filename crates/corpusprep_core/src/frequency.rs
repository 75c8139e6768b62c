use rustc_hash::FxHashMap;

/// Token occurrence counts that remember the order tokens were first seen.
///
/// Entries live in a `Vec` in first-seen order; the hash map only indexes
/// into it. Iteration order is therefore stable and reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of every token in `tokens`.
    pub fn accumulate<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            self.increment(token.as_ref());
        }
    }

    pub fn increment(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.to_owned(), self.entries.len());
                self.entries.push((token.to_owned(), 1));
            }
        }
    }

    pub fn count(&self, token: &str) -> u64 {
        self.index
            .get(token)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Position of `token` in first-seen order.
    pub fn first_seen(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }
}

/// Free-function form of [`FrequencyTable::accumulate`].
pub fn accumulate<S: AsRef<str>>(tokens: &[S], counts: &mut FrequencyTable) {
    counts.accumulate(tokens);
}
