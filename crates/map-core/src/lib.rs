//! Core logic for the airport map console: record reduction, text filtering,
//! and listing state derivation.
//!
//! The crate is pure and I/O free so every rule can be unit tested without a
//! running map. It is split into focused modules:
//! - `record`: the airport record shared by every stage.
//! - `dedupe`: first-occurrence collapse of duplicated viewport features.
//! - `filter`: normalization, substring narrowing, and the filter-sync
//!   reducer.
//! - `expression`: declarative visual filter predicates for the map layer.
//! - `listing`: listing state classification and the view payload.

pub use dedupe::dedupe_by_key;
pub use filter::{FilterOutcome, matches_query, normalize, sync_filter};
pub use listing::{ListingEntry, ListingState, ListingView};
pub use record::AirportRecord;

pub mod dedupe;
pub mod expression;
pub mod filter;
pub mod listing;
pub mod record;
