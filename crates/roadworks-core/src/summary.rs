//! # Summary Module
//!
//! Derived dashboard aggregates over a registry.
//!
//! Everything here is a pure measurement: counts, saturating rupee totals
//! and per-ward / per-phase breakdowns, optionally narrowed to one ward.
//! These are the numbers the overview cards and the (external) charts
//! consume.

use crate::registry::Registry;
use crate::types::{RoadStatus, Rupees, Ward, WorkPhase};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// BREAKDOWNS
// =============================================================================

/// Work count and expenditure within one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseBreakdown {
    /// Number of works in the phase.
    pub count: usize,
    /// Summed cost of those works.
    pub expenditure: Rupees,
}

/// Road and work counts within one ward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WardBreakdown {
    /// Registered roads in the ward.
    pub road_count: usize,
    /// Works tagged to roads in the ward.
    pub work_count: usize,
}

// =============================================================================
// REGISTRY SUMMARY
// =============================================================================

/// The dashboard overview numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    /// The ward the summary was narrowed to, if any.
    pub ward: Option<Ward>,
    /// Registered roads in scope.
    pub road_count: usize,
    /// Roads in scope currently in service.
    pub active_road_count: usize,
    /// Works in scope.
    pub work_count: usize,
    /// Works in scope currently in progress.
    pub works_in_progress: usize,
    /// Summed cost of all works in scope (saturating).
    pub total_expenditure: Rupees,
    /// Count and expenditure per phase; every phase is present, zeroed when
    /// empty, so the chart axis is stable.
    pub by_phase: BTreeMap<WorkPhase, PhaseBreakdown>,
    /// Road/work counts per ward; wards with no records are absent.
    pub by_ward: BTreeMap<Ward, WardBreakdown>,
}

impl RegistrySummary {
    /// Measure the registry, optionally narrowed to one ward.
    ///
    /// A work's ward is the ward of the road it is tagged to.
    #[must_use]
    pub fn measure(registry: &Registry, ward: Option<Ward>) -> Self {
        let mut by_phase: BTreeMap<WorkPhase, PhaseBreakdown> = WorkPhase::all()
            .into_iter()
            .map(|phase| (phase, PhaseBreakdown::default()))
            .collect();
        let mut by_ward: BTreeMap<Ward, WardBreakdown> = BTreeMap::new();

        let mut road_count = 0;
        let mut active_road_count = 0;
        for row in registry.road_rows() {
            if ward.is_some_and(|w| w != row.road.ward) {
                continue;
            }
            road_count += 1;
            if row.road.status == RoadStatus::Active {
                active_road_count += 1;
            }
            by_ward.entry(row.road.ward).or_default().road_count += 1;
        }

        let mut work_count = 0;
        let mut works_in_progress = 0;
        let mut total_expenditure = Rupees::default();
        for row in registry.work_rows() {
            if ward.is_some_and(|w| w != row.ward) {
                continue;
            }
            work_count += 1;
            if row.work.phase == WorkPhase::InProgress {
                works_in_progress += 1;
            }
            total_expenditure = total_expenditure.saturating_add(row.work.cost);

            let phase = by_phase.entry(row.work.phase).or_default();
            phase.count += 1;
            phase.expenditure = phase.expenditure.saturating_add(row.work.cost);

            by_ward.entry(row.ward).or_default().work_count += 1;
        }

        Self {
            ward,
            road_count,
            active_road_count,
            work_count,
            works_in_progress,
            total_expenditure,
            by_phase,
            by_ward,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{MutationEngine, RoadDraft, WorkDraft};
    use crate::types::{Metres, RoadId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn seed() -> Registry {
        let mut registry = Registry::new();
        for (name, ward, status) in [
            ("Narnaul Highway", 1, RoadStatus::Active),
            ("Gandhi Market Road", 2, RoadStatus::Active),
            ("Hospital Road", 2, RoadStatus::Inactive),
        ] {
            MutationEngine::register_road(
                &mut registry,
                RoadDraft {
                    name: name.to_string(),
                    ward: Ward::new(ward).expect("ward"),
                    length: Metres::new(1000),
                    status,
                },
                date(2024, 1, 1),
            )
            .expect("register");
        }
        for (road, cost, phase) in [
            (1, 2_450_000, WorkPhase::InProgress),
            (1, 880_000, WorkPhase::Planning),
            (2, 540_000, WorkPhase::Completed),
        ] {
            MutationEngine::tag_work(
                &mut registry,
                WorkDraft {
                    name: "Work".to_string(),
                    description: String::new(),
                    road_id: RoadId(road),
                    cost: Rupees::new(cost),
                    vendor: "Vendor".to_string(),
                    phase,
                    start_date: date(2024, 5, 1),
                    end_date: date(2024, 8, 1),
                },
            )
            .expect("tag");
        }
        registry
    }

    #[test]
    fn unfiltered_summary_counts_everything() {
        let summary = RegistrySummary::measure(&seed(), None);

        assert_eq!(summary.road_count, 3);
        assert_eq!(summary.active_road_count, 2);
        assert_eq!(summary.work_count, 3);
        assert_eq!(summary.works_in_progress, 1);
        assert_eq!(summary.total_expenditure, Rupees::new(3_870_000));
    }

    #[test]
    fn every_phase_is_present_even_when_zero() {
        let registry = Registry::new();
        let summary = RegistrySummary::measure(&registry, None);

        assert_eq!(summary.by_phase.len(), 3);
        for breakdown in summary.by_phase.values() {
            assert_eq!(breakdown.count, 0);
            assert_eq!(breakdown.expenditure, Rupees::new(0));
        }
    }

    #[test]
    fn phase_breakdown_sums_costs() {
        let summary = RegistrySummary::measure(&seed(), None);
        let in_progress = summary.by_phase[&WorkPhase::InProgress];

        assert_eq!(in_progress.count, 1);
        assert_eq!(in_progress.expenditure, Rupees::new(2_450_000));
    }

    #[test]
    fn ward_filter_narrows_consistently() {
        let ward2 = Ward::new(2).expect("ward");
        let summary = RegistrySummary::measure(&seed(), Some(ward2));

        assert_eq!(summary.ward, Some(ward2));
        assert_eq!(summary.road_count, 2);
        assert_eq!(summary.active_road_count, 1);
        // Only the work tagged to the ward-2 road.
        assert_eq!(summary.work_count, 1);
        assert_eq!(summary.total_expenditure, Rupees::new(540_000));
        assert_eq!(summary.by_ward.len(), 1);
    }

    #[test]
    fn by_ward_groups_roads_and_joined_works() {
        let summary = RegistrySummary::measure(&seed(), None);
        let ward1 = summary.by_ward[&Ward::new(1).expect("ward")];
        let ward2 = summary.by_ward[&Ward::new(2).expect("ward")];

        assert_eq!(ward1.road_count, 1);
        assert_eq!(ward1.work_count, 2);
        assert_eq!(ward2.road_count, 2);
        assert_eq!(ward2.work_count, 1);
    }
}
