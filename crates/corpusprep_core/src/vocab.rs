use crate::frequency::FrequencyTable;

/// Select the `cap` most frequent tokens, most frequent first.
///
/// Equal counts keep first-seen order: the sort is stable over entries that
/// are already in first-seen order.
pub fn select(counts: &FrequencyTable, cap: usize) -> Vec<String> {
    if cap == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(&str, u64)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(cap)
        .map(|(token, _)| token.to_owned())
        .collect()
}
