//! # Filter Scenarios
//!
//! End-to-end checks of the three registry views over the built-in sample
//! data: the facet tables, the joined rows and the engine working together
//! the way the hosting screens drive them.

use roadworks_core::{
    ALL, Entry, FacetState, Faceted, FilterEngine, RecordKind, Registry, RegistrySummary, Rupees,
    Ward, dataset, views,
};

fn sample() -> Registry {
    dataset::sample_registry().expect("sample data must validate")
}

// =============================================================================
// ROAD REGISTRY VIEW
// =============================================================================

#[test]
fn road_view_unfiltered_shows_all_roads() {
    let rows = sample().road_rows();
    let report = FilterEngine::evaluate(&rows, &views::road_facets(), &FacetState::new());

    assert_eq!(report.total_count, 8);
    assert_eq!(report.matched_count, 8);
}

#[test]
fn road_view_ward_and_status_conjunction() {
    let rows = sample().road_rows();
    let state = FacetState::new()
        .with(views::WARD, "1")
        .with(views::STATUS, "active");
    let report = FilterEngine::evaluate(&rows, &views::road_facets(), &state);

    let names: Vec<&str> = report.matched.iter().map(|r| r.road.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Narnaul Highway", "Civil Lines Road", "Bus Stand Road"]
    );
}

#[test]
fn road_view_search_by_id_fragment() {
    let rows = sample().road_rows();
    let state = FacetState::new().with(views::QUERY, "rd-005");
    let report = FilterEngine::evaluate(&rows, &views::road_facets(), &state);

    assert_eq!(report.matched_count, 1);
    assert_eq!(report.matched[0].road.name, "Hospital Road");
}

// =============================================================================
// WORK LEDGER VIEW
// =============================================================================

#[test]
fn work_view_filters_by_tagged_road() {
    let rows = sample().work_rows();
    let state = FacetState::new().with(views::ROAD, "RD-002");
    let report = FilterEngine::evaluate(&rows, &views::work_facets(), &state);

    let names: Vec<&str> = report.matched.iter().map(|r| r.work.name.as_str()).collect();
    assert_eq!(names, vec!["Street Light Installation", "Road Marking"]);
}

#[test]
fn work_view_search_matches_joined_road_name() {
    let rows = sample().work_rows();
    let state = FacetState::new().with(views::QUERY, "gandhi");
    let report = FilterEngine::evaluate(&rows, &views::work_facets(), &state);

    // Both works on Gandhi Market Road, found via the road name alone.
    assert_eq!(report.matched_count, 2);
}

#[test]
fn work_view_phase_and_road_conjunction() {
    let rows = sample().work_rows();
    let state = FacetState::new()
        .with(views::ROAD, "RD-002")
        .with(views::PHASE, "planning");
    let report = FilterEngine::evaluate(&rows, &views::work_facets(), &state);

    assert_eq!(report.matched_count, 1);
    assert_eq!(report.matched[0].work.name, "Road Marking");
}

// =============================================================================
// UNIFIED SEARCH VIEW
// =============================================================================

#[test]
fn search_view_unfiltered_interleaves_roads_and_works() {
    let entries = sample().entries();
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &FacetState::new());

    assert_eq!(report.total_count, 14);
    assert_eq!(report.matched_count, 14);
    // Roads come first in each group, with their works directly below.
    assert_eq!(report.matched[0].id_string(), "RD-001");
    assert_eq!(report.matched[1].id_string(), "W-001");
    assert_eq!(report.matched[2].id_string(), "W-002");
    assert_eq!(report.matched[3].id_string(), "RD-002");
}

#[test]
fn search_query_reaches_roads_and_their_works() {
    let entries = sample().entries();
    let state = FacetState::new().with(views::QUERY, "narnaul");
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    // The road by name, its works by joined road name.
    let ids: Vec<String> = report.matched.iter().map(Entry::id_string).collect();
    assert_eq!(ids, vec!["RD-001", "W-001", "W-002"]);
}

#[test]
fn search_kind_and_ward_narrow_together() {
    let entries = sample().entries();
    let state = FacetState::new()
        .with(views::KIND, "work")
        .with(views::WARD, "1");
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    // Works on ward-1 roads: two on the highway, one on Civil Lines Road.
    assert_eq!(report.matched_count, 3);
    assert!(report.matched.iter().all(|e| e.kind() == RecordKind::Work));
}

#[test]
fn vendor_facet_bypasses_roads() {
    let entries = sample().entries();
    let state = FacetState::new().with(views::VENDOR, "City Builders");
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    // All eight roads pass untouched; exactly one work survives.
    let roads = report
        .matched
        .iter()
        .filter(|e| e.kind() == RecordKind::Road)
        .count();
    let works: Vec<&Entry> = report
        .matched
        .iter()
        .filter(|e| e.kind() == RecordKind::Work)
        .collect();

    assert_eq!(roads, 8);
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].id_string(), "W-004");
}

#[test]
fn nonsense_query_yields_empty_result() {
    let entries = sample().entries();
    let state = FacetState::new().with(views::QUERY, "zzz-nonexistent");
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    assert_eq!(report.matched_count, 0);
    assert_eq!(report.total_count, 14);
}

#[test]
fn reset_restores_the_full_set() {
    let entries = sample().entries();
    let facets = views::search_facets();

    let mut state = FacetState::new()
        .with(views::QUERY, "bridge")
        .with(views::KIND, "work")
        .with(views::VENDOR, "Bridge Builders Inc.");
    let narrowed = FilterEngine::evaluate(&entries, &facets, &state);
    assert_eq!(narrowed.matched_count, 1);

    state.reset();
    let restored = FilterEngine::evaluate(&entries, &facets, &state);
    assert_eq!(restored.matched_count, 14);
    assert_eq!(restored.matched, entries);
}

#[test]
fn all_sentinel_equals_absent_state() {
    let entries = sample().entries();
    let facets = views::search_facets();

    let explicit = FacetState::new()
        .with(views::KIND, ALL)
        .with(views::WARD, ALL)
        .with(views::VENDOR, ALL)
        .with(views::PHASE, ALL);

    let with_sentinels = FilterEngine::evaluate(&entries, &facets, &explicit);
    let with_defaults = FilterEngine::evaluate(&entries, &facets, &FacetState::new());

    assert_eq!(with_sentinels.matched, with_defaults.matched);
}

// =============================================================================
// SUMMARY CONSISTENCY
// =============================================================================

#[test]
fn summary_matches_sample_totals() {
    let registry = sample();
    let summary = RegistrySummary::measure(&registry, None);

    assert_eq!(summary.road_count, 8);
    assert_eq!(summary.active_road_count, 6);
    assert_eq!(summary.work_count, 6);
    assert_eq!(summary.works_in_progress, 3);
    assert_eq!(summary.total_expenditure, Rupees::new(9_060_000));
}

#[test]
fn summary_project_counts_add_up() {
    let registry = sample();
    let total: usize = registry.road_rows().iter().map(|r| r.project_count).sum();
    assert_eq!(total, registry.work_count());
}

#[test]
fn ward_summary_agrees_with_ward_filtered_views() {
    let registry = sample();
    let ward = Ward::new(2).expect("ward");
    let summary = RegistrySummary::measure(&registry, Some(ward));

    let entries = registry.entries();
    let state = FacetState::new().with(views::WARD, "2");
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    let roads = report
        .matched
        .iter()
        .filter(|e| e.kind() == RecordKind::Road)
        .count();
    let works = report
        .matched
        .iter()
        .filter(|e| e.kind() == RecordKind::Work)
        .count();

    assert_eq!(summary.road_count, roads);
    assert_eq!(summary.work_count, works);
}
