//! Normalization, substring narrowing, and the filter-sync reducer.

use serde_json::Value;

use crate::expression;
use crate::record::AirportRecord;

/// Trim surrounding whitespace and lowercase. Applied identically to query
/// text and record fields so matching stays symmetric.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether a record's normalized name or code contains `query` as a
/// substring. `query` must already be normalized.
pub fn matches_query(record: &AirportRecord, query: &str) -> bool {
    normalize(&record.name).contains(query) || normalize(&record.code).contains(query)
}

/// Records whose name or code matches `query`, order preserved.
pub fn narrow(records: &[AirportRecord], query: &str) -> Vec<AirportRecord> {
    records
        .iter()
        .filter(|record| matches_query(record, query))
        .cloned()
        .collect()
}

/// Result of applying a query to the active set: the narrowed records plus
/// the visual filter the map layer must adopt to stay consistent with them.
#[derive(Clone, Debug)]
pub struct FilterOutcome {
    pub narrowed: Vec<AirportRecord>,
    pub expression: Value,
}

/// Reduce `(active set, raw query)` to the narrowed set and its matching
/// visual filter.
///
/// An empty query (after normalization) means "no filter": the full active
/// set passes through and the layer reverts to the unfiltered baseline. A
/// non-empty query that matches nothing yields the match-none predicate so
/// the map never keeps markers the listing dropped.
pub fn sync_filter(active: &[AirportRecord], raw_query: &str, key_property: &str) -> FilterOutcome {
    let query = normalize(raw_query);
    if query.is_empty() {
        return FilterOutcome {
            narrowed: active.to_vec(),
            expression: expression::baseline(key_property),
        };
    }

    let narrowed = narrow(active, &query);
    let expression = if narrowed.is_empty() {
        expression::match_none(key_property)
    } else {
        let codes: Vec<String> = narrowed.iter().map(|record| record.code.clone()).collect();
        expression::include_codes(key_property, &codes)
    };
    FilterOutcome {
        narrowed,
        expression,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn airport(name: &str, code: &str) -> AirportRecord {
        AirportRecord {
            name: name.into(),
            code: code.into(),
            lon: 0.0,
            lat: 0.0,
            reference: None,
        }
    }

    fn active() -> Vec<AirportRecord> {
        vec![airport("Cairo", "CAI"), airport("Lagos", "LOS")]
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  ABC  "), "abc");
        assert_eq!(normalize("\tCairo Intl\n"), "cairo intl");
    }

    #[test]
    fn narrowing_matches_name_substring() {
        let narrowed = narrow(&active(), "air");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].code, "CAI");
    }

    #[test]
    fn narrowing_matches_code_substring() {
        let narrowed = narrow(&active(), "los");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].name, "Lagos");
    }

    #[test]
    fn narrowing_is_idempotent_under_renormalization() {
        let raw = "  CAI ";
        let once = narrow(&active(), &normalize(raw));
        let twice = narrow(&active(), &normalize(&normalize(raw)));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_query_passes_the_full_set_with_baseline_filter() {
        let outcome = sync_filter(&active(), "   ", "iata_code");
        assert_eq!(outcome.narrowed.len(), 2);
        assert_eq!(outcome.expression, json!(["has", "iata_code"]));
    }

    #[test]
    fn matching_query_yields_inclusion_over_narrowed_codes() {
        let outcome = sync_filter(&active(), "air", "iata_code");
        assert_eq!(outcome.narrowed.len(), 1);
        assert_eq!(
            outcome.expression,
            json!(["match", ["get", "iata_code"], ["CAI"], true, false])
        );
    }

    #[test]
    fn unmatched_query_hides_every_marker() {
        let outcome = sync_filter(&active(), "zzz", "iata_code");
        assert!(outcome.narrowed.is_empty());
        assert_eq!(
            outcome.expression,
            json!(["in", ["get", "iata_code"], ["literal", []]])
        );
    }
}
