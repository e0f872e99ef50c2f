//! # Record Module
//!
//! The two record kinds of the registry — roads and the works tagged to
//! them — plus the joined row shapes the views actually filter and render.
//!
//! Works are stored normalized: a work carries only the `RoadId` of the
//! road it is tagged to. The registry joins in the road's name and ward
//! when it produces [`WorkRow`]s, so the denormalized copies can never
//! drift from the road they came from.

use crate::facet::{CategoryField, Faceted, TextField};
use crate::types::{Metres, RecordKind, RoadId, RoadStatus, Rupees, Ward, WorkId, WorkPhase};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// =============================================================================
// ROAD
// =============================================================================

/// A registered road asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    /// Stable identifier, assigned at registration, immutable.
    pub id: RoadId,
    /// Free-text label.
    pub name: String,
    /// The ward the road lies in.
    pub ward: Ward,
    /// Length of the road.
    pub length: Metres,
    /// Whether the road is in service.
    pub status: RoadStatus,
    /// Date the road entered the registry.
    pub registered_on: NaiveDate,
}

// =============================================================================
// WORK
// =============================================================================

/// A tagged unit of infrastructure spend against exactly one road.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Stable identifier, assigned at tagging, immutable.
    pub id: WorkId,
    /// Free-text label.
    pub name: String,
    /// What the work covers.
    pub description: String,
    /// The road this work is tagged to. Always references an existing road.
    pub road_id: RoadId,
    /// Contracted cost, always positive.
    pub cost: Rupees,
    /// Executing vendor (open set).
    pub vendor: String,
    /// Operator-set lifecycle label.
    pub phase: WorkPhase,
    /// Declared start of the work.
    pub start_date: NaiveDate,
    /// Declared end; never before `start_date`.
    pub end_date: NaiveDate,
}

// =============================================================================
// JOINED ROWS
// =============================================================================

/// A road together with its derived project count.
///
/// This is the row shape of the road registry view; the count is computed
/// by the registry at snapshot time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadRow {
    /// The road record.
    pub road: Road,
    /// Number of works currently tagged to this road.
    pub project_count: usize,
}

/// A work joined with the road it is tagged to.
///
/// The row shape of the work ledger and the work half of unified search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRow {
    /// The work record.
    pub work: Work,
    /// Name of the referenced road.
    pub road_name: String,
    /// Ward of the referenced road.
    pub ward: Ward,
}

/// One heterogeneous row of the unified search view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A road row.
    Road(RoadRow),
    /// A work row.
    Work(WorkRow),
}

impl Entry {
    /// Display id of the underlying record.
    #[must_use]
    pub fn id_string(&self) -> String {
        match self {
            Entry::Road(row) => row.road.id.to_string(),
            Entry::Work(row) => row.work.id.to_string(),
        }
    }

    /// Name of the underlying record.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Entry::Road(row) => &row.road.name,
            Entry::Work(row) => &row.work.name,
        }
    }

    /// Ward of the underlying record.
    #[must_use]
    pub fn ward(&self) -> Ward {
        match self {
            Entry::Road(row) => row.road.ward,
            Entry::Work(row) => row.ward,
        }
    }

    /// The one-line detail cell of the search table:
    /// `4.5 km • 2 projects` for roads, `₹24,50,000 • In Progress` for works.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Entry::Road(row) => {
                format!("{} • {} projects", row.road.length, row.project_count)
            }
            Entry::Work(row) => format!("{} • {}", row.work.cost, row.work.phase),
        }
    }
}

// =============================================================================
// FACETED IMPLEMENTATIONS
// =============================================================================

impl Faceted for RoadRow {
    fn kind(&self) -> RecordKind {
        RecordKind::Road
    }

    fn text_field(&self, field: TextField) -> Option<Cow<'_, str>> {
        match field {
            TextField::Name => Some(Cow::Borrowed(self.road.name.as_str())),
            TextField::Id => Some(Cow::Owned(self.road.id.to_string())),
            TextField::RoadName => None,
        }
    }

    fn category(&self, field: CategoryField) -> Option<Cow<'_, str>> {
        match field {
            CategoryField::Ward => Some(Cow::Owned(self.road.ward.number().to_string())),
            CategoryField::Status => Some(Cow::Borrowed(self.road.status.token())),
            CategoryField::Kind => Some(Cow::Borrowed(RecordKind::Road.token())),
            CategoryField::Phase | CategoryField::Vendor | CategoryField::Road => None,
        }
    }
}

impl Faceted for WorkRow {
    fn kind(&self) -> RecordKind {
        RecordKind::Work
    }

    fn text_field(&self, field: TextField) -> Option<Cow<'_, str>> {
        match field {
            TextField::Name => Some(Cow::Borrowed(self.work.name.as_str())),
            TextField::Id => Some(Cow::Owned(self.work.id.to_string())),
            TextField::RoadName => Some(Cow::Borrowed(self.road_name.as_str())),
        }
    }

    fn category(&self, field: CategoryField) -> Option<Cow<'_, str>> {
        match field {
            CategoryField::Ward => Some(Cow::Owned(self.ward.number().to_string())),
            CategoryField::Phase => Some(Cow::Borrowed(self.work.phase.token())),
            CategoryField::Vendor => Some(Cow::Borrowed(self.work.vendor.as_str())),
            CategoryField::Kind => Some(Cow::Borrowed(RecordKind::Work.token())),
            CategoryField::Road => Some(Cow::Owned(self.work.road_id.to_string())),
            CategoryField::Status => None,
        }
    }
}

impl Faceted for Entry {
    fn kind(&self) -> RecordKind {
        match self {
            Entry::Road(_) => RecordKind::Road,
            Entry::Work(_) => RecordKind::Work,
        }
    }

    fn text_field(&self, field: TextField) -> Option<Cow<'_, str>> {
        match self {
            Entry::Road(row) => row.text_field(field),
            Entry::Work(row) => row.text_field(field),
        }
    }

    fn category(&self, field: CategoryField) -> Option<Cow<'_, str>> {
        match self {
            Entry::Road(row) => row.category(field),
            Entry::Work(row) => row.category(field),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_road_row() -> RoadRow {
        RoadRow {
            road: Road {
                id: RoadId(1),
                name: "Narnaul Highway".to_string(),
                ward: Ward::new(1).expect("ward"),
                length: Metres::new(4500),
                status: RoadStatus::Active,
                registered_on: NaiveDate::from_ymd_opt(2024, 1, 12).expect("date"),
            },
            project_count: 2,
        }
    }

    fn sample_work_row() -> WorkRow {
        WorkRow {
            work: Work {
                id: WorkId(1),
                name: "Road Resurfacing".to_string(),
                description: "Complete resurfacing with bituminous concrete.".to_string(),
                road_id: RoadId(1),
                cost: Rupees::new(2_450_000),
                vendor: "Highway Construction Ltd.".to_string(),
                phase: WorkPhase::InProgress,
                start_date: NaiveDate::from_ymd_opt(2024, 6, 12).expect("date"),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 30).expect("date"),
            },
            road_name: "Narnaul Highway".to_string(),
            ward: Ward::new(1).expect("ward"),
        }
    }

    #[test]
    fn road_row_exposes_expected_facet_fields() {
        let row = sample_road_row();

        assert_eq!(row.text_field(TextField::Id).as_deref(), Some("RD-001"));
        assert_eq!(row.text_field(TextField::RoadName), None);
        assert_eq!(row.category(CategoryField::Ward).as_deref(), Some("1"));
        assert_eq!(row.category(CategoryField::Status).as_deref(), Some("active"));
        assert_eq!(row.category(CategoryField::Vendor), None);
    }

    #[test]
    fn work_row_exposes_expected_facet_fields() {
        let row = sample_work_row();

        assert_eq!(
            row.text_field(TextField::RoadName).as_deref(),
            Some("Narnaul Highway")
        );
        assert_eq!(
            row.category(CategoryField::Phase).as_deref(),
            Some("in-progress")
        );
        assert_eq!(row.category(CategoryField::Road).as_deref(), Some("RD-001"));
        assert_eq!(row.category(CategoryField::Status), None);
    }

    #[test]
    fn entry_detail_lines() {
        let road = Entry::Road(sample_road_row());
        let work = Entry::Work(sample_work_row());

        assert_eq!(road.detail(), "4.5 km • 2 projects");
        assert_eq!(work.detail(), "₹24,50,000 • In Progress");
    }
}
