//! # Sample Dataset
//!
//! The built-in demo registry: eight roads and the six works tagged to
//! them. The records are fed through [`MutationEngine`] rather than
//! inserted raw, so the demo data passes exactly the validation user input
//! does — a sample that stopped validating would fail loudly.

use crate::mutation::{MutationEngine, RoadDraft, WorkDraft};
use crate::registry::Registry;
use crate::types::{Metres, RegistryError, RoadId, RoadStatus, Rupees, Ward, WorkPhase};
use chrono::NaiveDate;

/// Build the sample registry.
pub fn sample_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();

    let roads: [(&str, u8, u32, RoadStatus, (i32, u32, u32)); 8] = [
        ("Narnaul Highway", 1, 4500, RoadStatus::Active, (2024, 1, 12)),
        ("Gandhi Market Road", 2, 1800, RoadStatus::Active, (2024, 2, 18)),
        ("Civil Lines Road", 1, 2200, RoadStatus::Active, (2024, 3, 5)),
        ("Rewari Link Road", 3, 6100, RoadStatus::Active, (2024, 3, 22)),
        ("Hospital Road", 2, 900, RoadStatus::Inactive, (2024, 4, 10)),
        ("Industrial Area Road", 4, 3200, RoadStatus::Active, (2024, 4, 17)),
        ("Bus Stand Road", 1, 700, RoadStatus::Active, (2024, 5, 5)),
        ("College Road", 3, 1400, RoadStatus::Inactive, (2024, 5, 20)),
    ];

    for (name, ward, metres, status, registered) in roads {
        MutationEngine::register_road(
            &mut registry,
            RoadDraft {
                name: name.to_string(),
                ward: Ward::new(ward)?,
                length: Metres::new(metres),
                status,
            },
            date(registered)?,
        )?;
    }

    #[allow(clippy::type_complexity)]
    let works: [(
        &str,
        u32,
        i64,
        &str,
        WorkPhase,
        (i32, u32, u32),
        (i32, u32, u32),
        &str,
    ); 6] = [
        (
            "Road Resurfacing",
            1,
            2_450_000,
            "Highway Construction Ltd.",
            WorkPhase::InProgress,
            (2024, 6, 12),
            (2024, 7, 30),
            "Complete resurfacing of road with 40mm thick bituminous concrete.",
        ),
        (
            "Drainage System Installation",
            1,
            880_000,
            "Urban Infrastructure Co.",
            WorkPhase::Planning,
            (2024, 7, 5),
            (2024, 8, 15),
            "Installation of new drainage system along the roadside.",
        ),
        (
            "Street Light Installation",
            2,
            540_000,
            "Electro Solutions",
            WorkPhase::Completed,
            (2024, 5, 10),
            (2024, 6, 5),
            "Installation of 24 LED street lights along the road.",
        ),
        (
            "Footpath Construction",
            3,
            1_220_000,
            "City Builders",
            WorkPhase::InProgress,
            (2024, 5, 20),
            (2024, 7, 10),
            "Construction of 1.5m wide footpath on both sides of the road.",
        ),
        (
            "Road Marking",
            2,
            350_000,
            "Road Signs & Markings Ltd.",
            WorkPhase::Planning,
            (2024, 6, 25),
            (2024, 7, 5),
            "Application of thermoplastic road markings and installation of signage.",
        ),
        (
            "Bridge Repair",
            4,
            3_620_000,
            "Bridge Builders Inc.",
            WorkPhase::InProgress,
            (2024, 5, 28),
            (2024, 8, 15),
            "Structural repairs to the existing bridge and expansion of the deck.",
        ),
    ];

    for (name, road, cost, vendor, phase, start, end, description) in works {
        MutationEngine::tag_work(
            &mut registry,
            WorkDraft {
                name: name.to_string(),
                description: description.to_string(),
                road_id: RoadId(road),
                cost: Rupees::new(cost),
                vendor: vendor.to_string(),
                phase,
                start_date: date(start)?,
                end_date: date(end)?,
            },
        )?;
    }

    Ok(registry)
}

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate, RegistryError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| RegistryError::SnapshotError(format!("invalid date {y}-{m:02}-{d:02}")))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkId;

    #[test]
    fn sample_registry_builds_clean() {
        let registry = sample_registry().expect("sample data must validate");
        assert_eq!(registry.road_count(), 8);
        assert_eq!(registry.work_count(), 6);
    }

    #[test]
    fn sample_ids_are_sequential() {
        let registry = sample_registry().expect("sample");
        assert!(registry.road(RoadId(8)).is_some());
        assert!(registry.road(RoadId(9)).is_none());
        assert!(registry.work(WorkId(6)).is_some());
    }

    #[test]
    fn derived_project_counts_match_tagged_works() {
        let registry = sample_registry().expect("sample");
        // Two works on the highway, none on the last three roads.
        assert_eq!(registry.project_count(RoadId(1)), 2);
        assert_eq!(registry.project_count(RoadId(2)), 2);
        assert_eq!(registry.project_count(RoadId(3)), 1);
        assert_eq!(registry.project_count(RoadId(4)), 1);
        assert_eq!(registry.project_count(RoadId(5)), 0);
    }

    #[test]
    fn sample_vendors_are_the_six_contractors() {
        let registry = sample_registry().expect("sample");
        assert_eq!(registry.vendors().len(), 6);
    }
}
