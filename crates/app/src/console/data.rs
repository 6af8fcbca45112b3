use map_core::{AirportRecord, ListingView};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
/// One rendered feature as reported by the page after a viewport settle.
/// The page flattens engine properties to this shape; duplicates across tile
/// boundaries are expected and collapsed server-side.
pub(crate) struct RawFeature {
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) lon: f64,
    pub(crate) lat: f64,
    #[serde(default)]
    pub(crate) reference: Option<String>,
}

impl RawFeature {
    pub(crate) fn into_record(self) -> AirportRecord {
        AirportRecord {
            name: self.name,
            code: self.code,
            lon: self.lon,
            lat: self.lat,
            reference: self.reference,
        }
    }
}

#[derive(Debug, Deserialize)]
/// Body of `POST /api/viewport`.
pub(crate) struct ViewportReport {
    pub(crate) features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
/// Query string of `GET /api/filter`.
pub(crate) struct FilterQuery {
    pub(crate) q: Option<String>,
}

#[derive(Debug, Serialize)]
/// Response to viewport and filter events: the listing view the page renders
/// verbatim plus the visual filter the map layer must adopt.
pub(crate) struct ListingUpdate {
    pub(crate) listing: ListingView,
    pub(crate) filter: Value,
    pub(crate) airports_in_view: usize,
    pub(crate) matched: usize,
    pub(crate) query: String,
}

#[derive(Debug, Serialize)]
/// Session summary served on `/api/state` and the SSE stream.
pub(crate) struct SessionSnapshot {
    pub(crate) revision: u64,
    pub(crate) airports_in_view: usize,
    pub(crate) query: String,
    pub(crate) state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) settled_at_ms: Option<i64>,
}
