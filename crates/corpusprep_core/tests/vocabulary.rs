use corpusprep_core::{accumulate, select, FrequencyTable};
use pretty_assertions::assert_eq;

fn table_from(tokens: &[&str]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    accumulate(tokens, &mut table);
    table
}

#[test]
fn accumulate_counts_each_occurrence() {
    let table = table_from(&["a", "b", "a", "c", "a"]);
    assert_eq!(table.count("a"), 3);
    assert_eq!(table.count("b"), 1);
    assert_eq!(table.count("missing"), 0);
    assert_eq!(table.len(), 3);
    assert_eq!(table.total(), 5);
}

#[test]
fn first_seen_order_is_recorded() {
    let table = table_from(&["z", "y", "z", "x"]);
    let order: Vec<_> = table.iter().map(|(token, _)| token).collect();
    assert_eq!(order, vec!["z", "y", "x"]);
    assert_eq!(table.first_seen("y"), Some(1));
    assert_eq!(table.first_seen("w"), None);
}

#[test]
fn ties_are_broken_by_first_seen_order() {
    // a:5 b:3 c:3 d:1, with b seen before c
    let table = table_from(&["a", "b", "a", "c", "d", "a", "b", "c", "a", "b", "c", "a"]);
    assert_eq!(select(&table, 2), vec!["a", "b"]);

    // same counts, c seen before b
    let table = table_from(&["a", "c", "a", "b", "d", "a", "b", "c", "a", "b", "c", "a"]);
    assert_eq!(select(&table, 2), vec!["a", "c"]);
}

#[test]
fn cap_larger_than_table_returns_everything_ranked() {
    let table = table_from(&["low", "high", "mid", "high", "mid", "high"]);
    assert_eq!(select(&table, 100), vec!["high", "mid", "low"]);
}

#[test]
fn zero_cap_returns_nothing() {
    let table = table_from(&["a", "b"]);
    assert!(select(&table, 0).is_empty());
}

#[test]
fn empty_table_selects_nothing() {
    assert!(select(&FrequencyTable::new(), 10).is_empty());
}

#[test]
fn selection_is_deterministic() {
    let tokens: Vec<String> = (0..500).map(|i| format!("t{}", i % 37)).collect();
    let mut table = FrequencyTable::new();
    table.accumulate(&tokens);
    assert_eq!(select(&table, 20), select(&table, 20));
}
