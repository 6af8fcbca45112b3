//! Snapshot-owning map session.
//!
//! The session holds the active set as an explicit snapshot and applies one
//! event at a time under a single lock, preserving the run-to-completion
//! semantics of the browser event loop it fronts. The active set is replaced
//! wholesale on viewport settles, never edited in place.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use map_core::{AirportRecord, ListingView, dedupe_by_key, listing, sync_filter};
use metrics::{counter, gauge};
use tracing::debug;

use crate::console::data::{ListingUpdate, RawFeature, SessionSnapshot};

struct SessionState {
    active: Vec<AirportRecord>,
    query: String,
    settled_at_ms: Option<i64>,
    revision: u64,
}

#[derive(Clone)]
/// Shared handle to the console session. Cheap to clone into handlers.
pub(crate) struct MapSession {
    state: Arc<Mutex<SessionState>>,
    key_property: Arc<str>,
}

impl MapSession {
    pub(crate) fn new(key_property: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                active: Vec::new(),
                query: String::new(),
                settled_at_ms: None,
                revision: 0,
            })),
            key_property: key_property.into(),
        }
    }

    /// Replace the active set with the deduplicated viewport features. The
    /// current query text is kept; the listing resets to the full set, so a
    /// lingering query never empties a freshly settled viewport.
    ///
    /// Returns `None` only when the session lock is poisoned.
    pub(crate) fn apply_viewport(&self, features: Vec<RawFeature>) -> Option<ListingUpdate> {
        let records = dedupe_by_key(
            features.into_iter().map(RawFeature::into_record).collect(),
            |record: &AirportRecord| record.code.clone(),
        );

        let mut state = self.state.lock().ok()?;
        state.active = records;
        state.settled_at_ms = Some(Utc::now().timestamp_millis());
        state.revision += 1;

        counter!("airmap_viewport_settles_total").increment(1);
        gauge!("airmap_airports_in_view").set(state.active.len() as f64);
        debug!(
            airports = state.active.len(),
            query = %state.query,
            "viewport settled"
        );

        let view = ListingView::from_state(&listing::classify(&state.active, &state.query));
        Some(ListingUpdate {
            filter: map_core::expression::baseline(&self.key_property),
            airports_in_view: state.active.len(),
            matched: state.active.len(),
            query: state.query.clone(),
            listing: view,
        })
    }

    /// Store the new query and narrow the active set, returning the listing
    /// view together with the visual filter the map must adopt.
    pub(crate) fn apply_query(&self, raw_query: String) -> Option<ListingUpdate> {
        let mut state = self.state.lock().ok()?;
        state.query = raw_query;

        let outcome = sync_filter(&state.active, &state.query, &self.key_property);
        state.revision += 1;

        counter!("airmap_filter_events_total").increment(1);
        debug!(
            matched = outcome.narrowed.len(),
            airports = state.active.len(),
            query = %state.query,
            "filter applied"
        );

        let view = ListingView::from_state(&listing::classify(&outcome.narrowed, &state.query));
        Some(ListingUpdate {
            filter: outcome.expression,
            airports_in_view: state.active.len(),
            matched: outcome.narrowed.len(),
            query: state.query.clone(),
            listing: view,
        })
    }

    /// Serializable state summary for `/api/state` and the SSE stream.
    pub(crate) fn snapshot(&self) -> Option<SessionSnapshot> {
        let state = self.state.lock().ok()?;
        Some(SessionSnapshot {
            revision: state.revision,
            airports_in_view: state.active.len(),
            query: state.query.clone(),
            state: listing::classify(&state.active, &state.query).tag(),
            settled_at_ms: state.settled_at_ms,
        })
    }
}
