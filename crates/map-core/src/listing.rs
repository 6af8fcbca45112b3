//! Listing state classification and the sidebar view payload.
//!
//! The page renders the view verbatim, so classification stays a pure
//! function of `(records, query)` and no DOM state can drift from the
//! session snapshot.

use serde::Serialize;

use crate::filter::normalize;
use crate::record::AirportRecord;

/// Prompt shown before the first viewport settle.
pub const PROMPT_NO_INTERACTION: &str = "Drag the map to populate results";
/// Notice shown when a non-empty query matches nothing.
pub const NOTICE_NO_MATCH: &str = "No results found";

#[derive(Clone, Debug, PartialEq)]
/// Classification of the listing region.
pub enum ListingState {
    /// One entry per record, filter input revealed.
    Populated(Vec<AirportRecord>),
    /// Non-empty query matched nothing.
    EmptyNoMatch,
    /// Nothing in view and no query typed yet.
    EmptyNoInteraction,
}

/// Classify `(records, query)` into the three observable listing outcomes.
pub fn classify(records: &[AirportRecord], raw_query: &str) -> ListingState {
    if !records.is_empty() {
        ListingState::Populated(records.to_vec())
    } else if !normalize(raw_query).is_empty() {
        ListingState::EmptyNoMatch
    } else {
        ListingState::EmptyNoInteraction
    }
}

impl ListingState {
    /// Wire tag for the state, shared by the listing view and snapshots.
    pub fn tag(&self) -> &'static str {
        match self {
            ListingState::Populated(_) => "populated",
            ListingState::EmptyNoMatch => "empty_no_match",
            ListingState::EmptyNoInteraction => "empty_no_interaction",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// One sidebar row.
pub struct ListingEntry {
    pub label: String,
    pub code: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
/// Full sidebar payload the page renders by replacement.
pub struct ListingView {
    /// State tag: `populated`, `empty_no_match`, or `empty_no_interaction`.
    pub state: &'static str,
    pub entries: Vec<ListingEntry>,
    /// Whether the filter input control is revealed.
    pub show_filter: bool,
    /// Prompt or no-results text for the empty states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl ListingView {
    pub fn from_state(state: &ListingState) -> Self {
        let (entries, show_filter, notice) = match state {
            ListingState::Populated(records) => {
                let entries = records
                    .iter()
                    .map(|record| ListingEntry {
                        label: record.label(),
                        code: record.code.clone(),
                        lon: record.lon,
                        lat: record.lat,
                        reference: record.reference_url().map(str::to_string),
                    })
                    .collect();
                (entries, true, None)
            }
            ListingState::EmptyNoMatch => (Vec::new(), true, Some(NOTICE_NO_MATCH)),
            ListingState::EmptyNoInteraction => (Vec::new(), false, Some(PROMPT_NO_INTERACTION)),
        };
        ListingView {
            state: state.tag(),
            entries,
            show_filter,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(name: &str, code: &str, reference: Option<&str>) -> AirportRecord {
        AirportRecord {
            name: name.into(),
            code: code.into(),
            lon: 31.4,
            lat: 30.1,
            reference: reference.map(str::to_string),
        }
    }

    #[test]
    fn records_present_classify_as_populated() {
        let records = vec![airport("Cairo", "CAI", None)];
        assert_eq!(
            classify(&records, ""),
            ListingState::Populated(records.clone())
        );
        // A stale query cannot empty a populated listing.
        assert_eq!(
            classify(&records, "cai"),
            ListingState::Populated(records)
        );
    }

    #[test]
    fn empty_with_query_is_no_match() {
        assert_eq!(classify(&[], "zzz"), ListingState::EmptyNoMatch);
    }

    #[test]
    fn empty_without_query_is_no_interaction() {
        assert_eq!(classify(&[], ""), ListingState::EmptyNoInteraction);
        // Whitespace-only input counts as no query.
        assert_eq!(classify(&[], "   "), ListingState::EmptyNoInteraction);
    }

    #[test]
    fn populated_view_reveals_filter_and_labels_rows() {
        let records = vec![airport(
            "Cairo",
            "CAI",
            Some("https://en.wikipedia.org/wiki/Cairo_International_Airport"),
        )];
        let view = ListingView::from_state(&classify(&records, ""));
        assert_eq!(view.state, "populated");
        assert!(view.show_filter);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].label, "Cairo (CAI)");
        assert!(view.entries[0].reference.is_some());
        assert_eq!(view.notice, None);
    }

    #[test]
    fn empty_views_carry_their_notices() {
        let no_match = ListingView::from_state(&ListingState::EmptyNoMatch);
        assert_eq!(no_match.notice, Some(NOTICE_NO_MATCH));
        assert!(no_match.show_filter);

        let untouched = ListingView::from_state(&ListingState::EmptyNoInteraction);
        assert_eq!(untouched.notice, Some(PROMPT_NO_INTERACTION));
        assert!(!untouched.show_filter);
    }
}
