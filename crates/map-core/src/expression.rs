//! Declarative visual filter predicates for the airport symbol layer.
//!
//! The map engine evaluates these as style expressions; the console only
//! constructs them. Three shapes cover every state the session can reach.

use serde_json::{Value, json};

/// Unfiltered baseline: draw every feature carrying the key property.
pub fn baseline(key_property: &str) -> Value {
    json!(["has", key_property])
}

/// Inclusion predicate matching exactly the given codes.
pub fn include_codes(key_property: &str, codes: &[String]) -> Value {
    json!(["match", ["get", key_property], codes, true, false])
}

/// Predicate matching no feature at all. Used when a non-empty query has
/// zero matches so the map never shows markers the listing dropped.
pub fn match_none(key_property: &str) -> Value {
    json!(["in", ["get", key_property], ["literal", []]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn baseline_tests_for_key_presence() {
        assert_eq!(baseline("iata_code"), json!(["has", "iata_code"]));
    }

    #[test]
    fn inclusion_lists_exact_codes() {
        let codes = vec!["CAI".to_string(), "LOS".to_string()];
        assert_eq!(
            include_codes("iata_code", &codes),
            json!(["match", ["get", "iata_code"], ["CAI", "LOS"], true, false])
        );
    }

    #[test]
    fn match_none_uses_empty_membership() {
        assert_eq!(
            match_none("iata_code"),
            json!(["in", ["get", "iata_code"], ["literal", []]])
        );
    }
}
