//! # Facet Module
//!
//! Declarative filter dimensions for registry views.
//!
//! A view is described by an ordered list of [`Facet`]s; the user's current
//! choices live in a flat [`FacetState`]. Neither carries behavior — the
//! evaluation rules live in [`crate::filter`], which keeps a view definition
//! a pure data table.

use crate::types::RecordKind;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel state value meaning "this facet is inactive".
///
/// Every categorical select in the registry UI carries an "All …" option;
/// this is its wire form. Text facets use the empty string instead.
pub const ALL: &str = "all";

// =============================================================================
// FACET IDENTITY
// =============================================================================

/// Name of a single filter dimension, the key into [`FacetState`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetId(String);

impl FacetId {
    /// Create a new facet id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// RECORD FIELDS A FACET CAN TARGET
// =============================================================================

/// Free-text fields a text-search facet may probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    /// The record's own name.
    Name,
    /// The record's display id (`RD-001`, `W-001`).
    Id,
    /// The name of the road a work is tagged to. Roads do not carry it.
    RoadName,
}

/// Categorical fields an equality facet may compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryField {
    /// Ward number, as its bare digit (`"1"`).
    Ward,
    /// Road status token (`"active"` / `"inactive"`). Works do not carry it.
    Status,
    /// Work phase token (`"planning"` / `"in-progress"` / `"completed"`).
    Phase,
    /// Work vendor, compared verbatim (open set).
    Vendor,
    /// Record kind token (`"road"` / `"work"`).
    Kind,
    /// The id of the road a work is tagged to (`"RD-001"`).
    Road,
}

// =============================================================================
// FACET DEFINITION
// =============================================================================

/// Matching rule of a single facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetRule {
    /// Case-insensitive substring search over one or more text fields.
    /// An empty query matches everything.
    Text {
        /// Fields probed, in order; a field the record lacks is skipped.
        fields: Vec<TextField>,
    },

    /// Exact equality on a categorical field. The [`ALL`] sentinel matches
    /// everything; a record lacking the field never matches.
    Equals {
        /// The categorical field compared.
        field: CategoryField,
    },

    /// Equality that only applies to records of one kind; records of any
    /// other kind bypass the facet and count as matching.
    Scoped {
        /// The record kind the facet applies to.
        kind: RecordKind,
        /// The categorical field compared on records of that kind.
        field: CategoryField,
    },
}

/// A single named filter dimension: an id plus its matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// The state key of this facet.
    pub id: FacetId,
    /// How records are matched against the state value.
    pub rule: FacetRule,
}

impl Facet {
    /// Text-search facet helper.
    #[must_use]
    pub fn text(id: impl Into<String>, fields: Vec<TextField>) -> Self {
        Self {
            id: FacetId::new(id),
            rule: FacetRule::Text { fields },
        }
    }

    /// Categorical-equality facet helper.
    #[must_use]
    pub fn equals(id: impl Into<String>, field: CategoryField) -> Self {
        Self {
            id: FacetId::new(id),
            rule: FacetRule::Equals { field },
        }
    }

    /// Kind-scoped categorical facet helper.
    #[must_use]
    pub fn scoped(id: impl Into<String>, kind: RecordKind, field: CategoryField) -> Self {
        Self {
            id: FacetId::new(id),
            rule: FacetRule::Scoped { kind, field },
        }
    }
}

// =============================================================================
// FACET STATE
// =============================================================================

/// The user's current choice per facet.
///
/// A flat, independently-settable mapping with no transition constraints:
/// any facet may take any value at any time. Keys that no facet list knows
/// are carried but never consulted. `BTreeSet`-style determinism comes from
/// the underlying `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetState {
    values: BTreeMap<FacetId, String>,
}

impl FacetState {
    /// Create an empty (identity) state: every facet at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a facet's value, replacing any previous choice.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(FacetId::new(id), value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    /// Get the raw value for a facet, if one was chosen.
    #[must_use]
    pub fn get(&self, id: &FacetId) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// The active (non-default) value for a facet.
    ///
    /// Returns `None` when the facet is unset, empty, or at the [`ALL`]
    /// sentinel — the three spellings of "inactive".
    #[must_use]
    pub fn active_value(&self, id: &FacetId) -> Option<&str> {
        match self.get(id) {
            None | Some("") | Some(ALL) => None,
            Some(value) => Some(value),
        }
    }

    /// Drop a single facet back to its default.
    pub fn clear(&mut self, id: &FacetId) {
        self.values.remove(id);
    }

    /// Reset every facet to its default, restoring the identity filter.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Number of facets holding any value (active or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no facet holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// FACETED TRAIT
// =============================================================================

/// The seam between record types and the filter engine.
///
/// A record exposes its text and categorical fields by name; fields a record
/// kind does not carry return `None` and the engine resolves the gap per the
/// facet rule. Values are `Cow` so stored strings borrow while derived ones
/// (display ids, ward digits) allocate only when probed.
pub trait Faceted {
    /// Which kind of record this is.
    fn kind(&self) -> RecordKind;

    /// The record's value for a text field, if it carries that field.
    fn text_field(&self, field: TextField) -> Option<Cow<'_, str>>;

    /// The record's value for a categorical field, if it carries it.
    fn category(&self, field: CategoryField) -> Option<Cow<'_, str>>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_defaults_are_inactive() {
        let mut state = FacetState::new();
        let ward = FacetId::new("ward");

        assert_eq!(state.active_value(&ward), None);

        state.set("ward", ALL);
        assert_eq!(state.active_value(&ward), None);

        state.set("ward", "");
        assert_eq!(state.active_value(&ward), None);

        state.set("ward", "2");
        assert_eq!(state.active_value(&ward), Some("2"));
    }

    #[test]
    fn reset_restores_identity() {
        let mut state = FacetState::new().with("ward", "2").with("query", "gandhi");
        assert_eq!(state.len(), 2);

        state.reset();
        assert!(state.is_empty());
        assert_eq!(state.active_value(&FacetId::new("ward")), None);
    }

    #[test]
    fn clear_drops_single_facet() {
        let mut state = FacetState::new().with("ward", "2").with("phase", "planning");

        state.clear(&FacetId::new("ward"));
        assert_eq!(state.active_value(&FacetId::new("ward")), None);
        assert_eq!(
            state.active_value(&FacetId::new("phase")),
            Some("planning")
        );
    }

    #[test]
    fn facet_helpers_build_expected_rules() {
        let f = Facet::text("query", vec![TextField::Name, TextField::Id]);
        assert_eq!(f.id.as_str(), "query");
        assert!(matches!(f.rule, FacetRule::Text { ref fields } if fields.len() == 2));

        let f = Facet::scoped("vendor", RecordKind::Work, CategoryField::Vendor);
        assert!(matches!(
            f.rule,
            FacetRule::Scoped {
                kind: RecordKind::Work,
                field: CategoryField::Vendor
            }
        ));
    }
}
