//! # View Definitions
//!
//! The facet list of each registry view, as declarative data.
//!
//! Every screen of the dashboard used to re-implement its own predicate
//! chain over local state; these tables replace the copies. A host builds
//! a [`FacetState`](crate::facet::FacetState) keyed by the constants below
//! and hands it to [`FilterEngine`](crate::filter::FilterEngine) together
//! with the matching table.

use crate::facet::{CategoryField, Facet, TextField};
use crate::types::RecordKind;

// =============================================================================
// FACET IDS
// =============================================================================

/// Free-text query facet.
pub const QUERY: &str = "query";

/// Ward select facet.
pub const WARD: &str = "ward";

/// Road status select facet.
pub const STATUS: &str = "status";

/// Work phase select facet.
pub const PHASE: &str = "phase";

/// Vendor select facet.
pub const VENDOR: &str = "vendor";

/// Record kind select facet (unified search only).
pub const KIND: &str = "kind";

/// Tagged-road select facet (work ledger only).
pub const ROAD: &str = "road";

// =============================================================================
// FACET TABLES
// =============================================================================

/// Road registry view: search by name or id, filter by ward and status.
#[must_use]
pub fn road_facets() -> Vec<Facet> {
    vec![
        Facet::text(QUERY, vec![TextField::Name, TextField::Id]),
        Facet::equals(WARD, CategoryField::Ward),
        Facet::equals(STATUS, CategoryField::Status),
    ]
}

/// Work ledger view: search by work or road name, filter by tagged road
/// and phase.
#[must_use]
pub fn work_facets() -> Vec<Facet> {
    vec![
        Facet::text(QUERY, vec![TextField::Name, TextField::RoadName]),
        Facet::equals(ROAD, CategoryField::Road),
        Facet::equals(PHASE, CategoryField::Phase),
    ]
}

/// Unified search view over mixed road/work entries: search by name, id or
/// tagged road name; filter by kind and ward; vendor and phase apply to
/// works only, roads bypass them.
#[must_use]
pub fn search_facets() -> Vec<Facet> {
    vec![
        Facet::text(QUERY, vec![TextField::Name, TextField::Id, TextField::RoadName]),
        Facet::equals(KIND, CategoryField::Kind),
        Facet::equals(WARD, CategoryField::Ward),
        Facet::scoped(VENDOR, RecordKind::Work, CategoryField::Vendor),
        Facet::scoped(PHASE, RecordKind::Work, CategoryField::Phase),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
