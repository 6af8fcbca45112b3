//! First-occurrence collapse of duplicated viewport features.
//!
//! Viewport queries against the map engine return one feature per rendered
//! tile, so the same airport shows up multiple times near tile boundaries.
//! Downstream listing and filter logic requires one canonical record per
//! key.

use std::collections::HashSet;
use std::hash::Hash;

/// Retain the first record seen for each distinct key, preserving the order
/// of first appearance. Empty input yields empty output.
pub fn dedupe_by_key<T, K, F>(records: Vec<T>, key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(key_fn(&record)) {
            unique.push(record);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AirportRecord;

    fn airport(name: &str, code: &str) -> AirportRecord {
        AirportRecord {
            name: name.into(),
            code: code.into(),
            lon: 0.0,
            lat: 0.0,
            reference: None,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = dedupe_by_key(Vec::<AirportRecord>::new(), |r| r.code.clone());
        assert!(out.is_empty());
    }

    #[test]
    fn first_occurrence_wins_and_order_is_preserved() {
        let records = vec![
            airport("John F. Kennedy Intl", "JFK"),
            airport("Lagos Murtala Muhammed", "LOS"),
            airport("Kennedy (tile copy)", "JFK"),
            airport("Cairo Intl", "CAI"),
            airport("Lagos (tile copy)", "LOS"),
        ];
        let unique = dedupe_by_key(records, |r| r.code.clone());
        let codes: Vec<_> = unique.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["JFK", "LOS", "CAI"]);
        assert_eq!(unique[0].name, "John F. Kennedy Intl");
    }

    #[test]
    fn output_never_repeats_a_key() {
        let records = vec![
            airport("a", "AAA"),
            airport("b", "BBB"),
            airport("c", "AAA"),
            airport("d", "AAA"),
            airport("e", "BBB"),
        ];
        let unique = dedupe_by_key(records, |r| r.code.clone());
        let mut codes: Vec<_> = unique.iter().map(|r| r.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), unique.len());
    }
}
