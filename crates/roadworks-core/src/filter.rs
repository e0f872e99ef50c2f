//! # Filter Engine
//!
//! Pure evaluation of a facet list against a record collection.
//!
//! A record is matched iff it satisfies the conjunction of every active
//! facet; inactive facets (unset, empty query, [`ALL`](crate::facet::ALL)
//! sentinel) drop out before the scan. Evaluation is:
//!
//! - **Pure** — a function of `(records, facets, state)` only, no caches
//! - **Stable** — output preserves the input order (filter, not sort)
//! - **Total** — malformed state degrades to "fewer results", never errors
//!
//! Re-entrancy is free: the engine holds no state, so concurrent calls with
//! different inputs cannot interfere. A superseded call is simply discarded
//! by the host.

use crate::facet::{CategoryField, Facet, FacetRule, FacetState, Faceted, TextField};
use crate::types::RecordKind;

// =============================================================================
// FILTER REPORT
// =============================================================================

/// Result of one evaluation: the surviving records plus the counts the
/// "Showing X of Y" caption consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport<R> {
    /// Records satisfying every active facet, in input order.
    pub matched: Vec<R>,
    /// Size of the unfiltered input.
    pub total_count: usize,
    /// Number of matched records (`matched.len()`, precomputed).
    pub matched_count: usize,
}

// =============================================================================
// PREPARED PREDICATES
// =============================================================================

/// An active facet resolved against the state, ready to test records.
///
/// Prepared once per evaluation so the query is case-folded once, not once
/// per record.
enum Predicate<'a> {
    Text {
        fields: &'a [TextField],
        needle: String,
    },
    Equals {
        field: CategoryField,
        value: &'a str,
    },
    Scoped {
        kind: RecordKind,
        field: CategoryField,
        value: &'a str,
    },
}

impl Predicate<'_> {
    fn matches<R: Faceted>(&self, record: &R) -> bool {
        match self {
            Predicate::Text { fields, needle } => fields.iter().any(|&field| {
                record
                    .text_field(field)
                    .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
            }),
            Predicate::Equals { field, value } => record
                .category(*field)
                .is_some_and(|actual| actual == *value),
            Predicate::Scoped { kind, field, value } => {
                if record.kind() != *kind {
                    // Out-of-scope records bypass the facet entirely.
                    return true;
                }
                record
                    .category(*field)
                    .is_some_and(|actual| actual == *value)
            }
        }
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// The faceted filter engine.
///
/// Stateless; every view shares this one implementation instead of
/// hand-rolling its own predicate chain.
pub struct FilterEngine;

impl FilterEngine {
    /// Evaluate `records` against the facets active in `state`.
    ///
    /// State keys naming no facet in `facets` are ignored; a facet with no
    /// state entry is inactive. With every facet inactive this is the
    /// identity filter.
    #[must_use]
    pub fn evaluate<R: Faceted + Clone>(
        records: &[R],
        facets: &[Facet],
        state: &FacetState,
    ) -> FilterReport<R> {
        let predicates = Self::prepare(facets, state);

        let matched: Vec<R> = records
            .iter()
            .filter(|record| predicates.iter().all(|p| p.matches(*record)))
            .cloned()
            .collect();

        FilterReport {
            total_count: records.len(),
            matched_count: matched.len(),
            matched,
        }
    }

    /// Test a single record against the facets active in `state`.
    #[must_use]
    pub fn matches<R: Faceted>(record: &R, facets: &[Facet], state: &FacetState) -> bool {
        Self::prepare(facets, state)
            .iter()
            .all(|p| p.matches(record))
    }

    /// Resolve the facet list against the state, keeping only active facets.
    fn prepare<'a>(facets: &'a [Facet], state: &'a FacetState) -> Vec<Predicate<'a>> {
        facets
            .iter()
            .filter_map(|facet| {
                let value = state.active_value(&facet.id)?;
                Some(match &facet.rule {
                    FacetRule::Text { fields } => Predicate::Text {
                        fields,
                        needle: value.to_lowercase(),
                    },
                    FacetRule::Equals { field } => Predicate::Equals {
                        field: *field,
                        value,
                    },
                    FacetRule::Scoped { kind, field } => Predicate::Scoped {
                        kind: *kind,
                        field: *field,
                        value,
                    },
                })
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
