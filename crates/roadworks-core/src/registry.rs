//! # Registry Module
//!
//! The in-memory store of roads and works.
//!
//! All storage is `BTreeMap`, so every read surface iterates in ascending
//! id order with no further sorting. The registry owns the two structural
//! invariants of the data model:
//!
//! - `Work.road_id` references an existing road at every insert/replace,
//!   and a road cannot be removed while works still reference it
//! - ids are unique per kind and allocated monotonically, never reused
//!
//! Content validation (names, costs, dates) lives in [`crate::mutation`];
//! the registry only accepts or rejects whole records.

use crate::record::{Entry, Road, RoadRow, Work, WorkRow};
use crate::types::{RegistryError, RoadId, WorkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// REGISTRY
// =============================================================================

/// The owned collection of all registered roads and tagged works.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Road storage, keyed by id.
    roads: BTreeMap<RoadId, Road>,

    /// Work storage, keyed by id.
    works: BTreeMap<WorkId, Work>,

    /// Next road id to allocate.
    next_road_id: u32,

    /// Next work id to allocate.
    next_work_id: u32,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roads: BTreeMap::new(),
            works: BTreeMap::new(),
            next_road_id: 1,
            next_work_id: 1,
        }
    }

    // =========================================================================
    // ID ALLOCATION
    // =========================================================================

    /// Allocate the next road id. Allocated ids are never reused, even when
    /// the insert that follows fails.
    pub fn allocate_road_id(&mut self) -> RoadId {
        let id = RoadId(self.next_road_id);
        self.next_road_id = self.next_road_id.saturating_add(1);
        id
    }

    /// Allocate the next work id.
    pub fn allocate_work_id(&mut self) -> WorkId {
        let id = WorkId(self.next_work_id);
        self.next_work_id = self.next_work_id.saturating_add(1);
        id
    }

    // =========================================================================
    // WRITE SURFACE (structural integrity only)
    // =========================================================================

    /// Insert a new road. Rejects duplicate ids.
    pub fn insert_road(&mut self, road: Road) -> Result<RoadId, RegistryError> {
        if self.roads.contains_key(&road.id) {
            return Err(RegistryError::DuplicateId(road.id.to_string()));
        }
        let id = road.id;
        self.next_road_id = self.next_road_id.max(id.0.saturating_add(1));
        self.roads.insert(id, road);
        Ok(id)
    }

    /// Insert a new work. Rejects duplicate ids and unknown road references.
    pub fn insert_work(&mut self, work: Work) -> Result<WorkId, RegistryError> {
        if self.works.contains_key(&work.id) {
            return Err(RegistryError::DuplicateId(work.id.to_string()));
        }
        if !self.roads.contains_key(&work.road_id) {
            return Err(RegistryError::UnknownRoad(work.road_id));
        }
        let id = work.id;
        self.next_work_id = self.next_work_id.max(id.0.saturating_add(1));
        self.works.insert(id, work);
        Ok(id)
    }

    /// Replace an existing road in full. The id must already be registered.
    pub fn replace_road(&mut self, road: Road) -> Result<(), RegistryError> {
        if !self.roads.contains_key(&road.id) {
            return Err(RegistryError::UnknownRoad(road.id));
        }
        self.roads.insert(road.id, road);
        Ok(())
    }

    /// Replace an existing work in full. The id must already be tagged and
    /// the (possibly changed) road reference must exist.
    pub fn replace_work(&mut self, work: Work) -> Result<(), RegistryError> {
        if !self.works.contains_key(&work.id) {
            return Err(RegistryError::UnknownWork(work.id));
        }
        if !self.roads.contains_key(&work.road_id) {
            return Err(RegistryError::UnknownRoad(work.road_id));
        }
        self.works.insert(work.id, work);
        Ok(())
    }

    /// Remove a road. Fails while any work is still tagged to it.
    pub fn remove_road(&mut self, id: RoadId) -> Result<Road, RegistryError> {
        if !self.roads.contains_key(&id) {
            return Err(RegistryError::UnknownRoad(id));
        }
        let count = self.project_count(id);
        if count > 0 {
            return Err(RegistryError::RoadHasWorks { road: id, count });
        }
        self.roads
            .remove(&id)
            .ok_or(RegistryError::UnknownRoad(id))
    }

    /// Remove a work.
    pub fn remove_work(&mut self, id: WorkId) -> Result<Work, RegistryError> {
        self.works
            .remove(&id)
            .ok_or(RegistryError::UnknownWork(id))
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    /// Lookup a road by id.
    #[must_use]
    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    /// Lookup a work by id.
    #[must_use]
    pub fn work(&self, id: WorkId) -> Option<&Work> {
        self.works.get(&id)
    }

    /// Number of registered roads.
    #[must_use]
    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Number of tagged works.
    #[must_use]
    pub fn work_count(&self) -> usize {
        self.works.len()
    }

    /// Derived aggregate: how many works reference this road.
    #[must_use]
    pub fn project_count(&self, road: RoadId) -> usize {
        self.works.values().filter(|w| w.road_id == road).count()
    }

    /// Distinct vendor names across all works, ascending.
    #[must_use]
    pub fn vendors(&self) -> Vec<String> {
        let mut vendors: Vec<String> = self.works.values().map(|w| w.vendor.clone()).collect();
        vendors.sort();
        vendors.dedup();
        vendors
    }

    /// All roads with their derived project counts, ascending id order.
    #[must_use]
    pub fn road_rows(&self) -> Vec<RoadRow> {
        self.roads
            .values()
            .map(|road| RoadRow {
                road: road.clone(),
                project_count: self.project_count(road.id),
            })
            .collect()
    }

    /// All works joined with their road's name and ward, ascending id order.
    #[must_use]
    pub fn work_rows(&self) -> Vec<WorkRow> {
        self.works
            .values()
            .filter_map(|work| self.join_work(work))
            .collect()
    }

    /// The heterogeneous record stream of the unified search view: each
    /// road followed by the works tagged to it.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.roads.len() + self.works.len());
        for road in self.roads.values() {
            entries.push(Entry::Road(RoadRow {
                road: road.clone(),
                project_count: self.project_count(road.id),
            }));
            for work in self.works.values().filter(|w| w.road_id == road.id) {
                if let Some(row) = self.join_work(work) {
                    entries.push(Entry::Work(row));
                }
            }
        }
        entries
    }

    /// Join one work with its road. The write surface guarantees the road
    /// exists; a dangling reference degrades to an absent row.
    fn join_work(&self, work: &Work) -> Option<WorkRow> {
        let road = self.roads.get(&work.road_id)?;
        Some(WorkRow {
            work: work.clone(),
            road_name: road.name.clone(),
            ward: road.ward,
        })
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    /// Rebuild a registry from a snapshot, revalidating every structural
    /// invariant. Works are inserted after all roads so forward references
    /// within the snapshot are accepted.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for road in snapshot.roads {
            registry.insert_road(road)?;
        }
        for work in snapshot.works {
            registry.insert_work(work)?;
        }
        Ok(registry)
    }

    /// Capture the registry as a serializable snapshot, ascending id order.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            roads: self.roads.values().cloned().collect(),
            works: self.works.values().cloned().collect(),
        }
    }
}

/// A serializable image of the registry contents.
///
/// This is the `--data` interchange shape of the CLI; loading one runs the
/// full structural validation again, so a hand-edited snapshot cannot smuggle
/// in a dangling road reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// All roads, ascending id order.
    pub roads: Vec<Road>,
    /// All works, ascending id order.
    pub works: Vec<Work>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Metres, RoadStatus, Rupees, Ward, WorkPhase};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn make_road(id: u32, name: &str) -> Road {
        Road {
            id: RoadId(id),
            name: name.to_string(),
            ward: Ward::new(1).expect("ward"),
            length: Metres::new(1000),
            status: RoadStatus::Active,
            registered_on: date(2024, 1, 1),
        }
    }

    fn make_work(id: u32, road: u32) -> Work {
        Work {
            id: WorkId(id),
            name: "Resurfacing".to_string(),
            description: String::new(),
            road_id: RoadId(road),
            cost: Rupees::new(100_000),
            vendor: "City Builders".to_string(),
            phase: WorkPhase::Planning,
            start_date: date(2024, 6, 1),
            end_date: date(2024, 7, 1),
        }
    }

    #[test]
    fn insert_work_requires_existing_road() {
        let mut registry = Registry::new();
        let err = registry.insert_work(make_work(1, 1)).expect_err("dangling");
        assert!(matches!(err, RegistryError::UnknownRoad(RoadId(1))));

        registry.insert_road(make_road(1, "Narnaul Highway")).expect("road");
        registry.insert_work(make_work(1, 1)).expect("work");
        assert_eq!(registry.work_count(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        assert!(matches!(
            registry.insert_road(make_road(1, "B")),
            Err(RegistryError::DuplicateId(_))
        ));
    }

    #[test]
    fn remove_road_blocked_while_works_reference_it() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        registry.insert_work(make_work(1, 1)).expect("work");

        let err = registry.remove_road(RoadId(1)).expect_err("blocked");
        assert!(matches!(
            err,
            RegistryError::RoadHasWorks { road: RoadId(1), count: 1 }
        ));

        registry.remove_work(WorkId(1)).expect("untag");
        registry.remove_road(RoadId(1)).expect("now removable");
        assert_eq!(registry.road_count(), 0);
    }

    #[test]
    fn allocation_continues_past_inserted_ids() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(7, "A")).expect("road");
        assert_eq!(registry.allocate_road_id(), RoadId(8));
        assert_eq!(registry.allocate_road_id(), RoadId(9));
    }

    #[test]
    fn project_count_is_derived() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        registry.insert_road(make_road(2, "B")).expect("road");
        registry.insert_work(make_work(1, 1)).expect("work");
        registry.insert_work(make_work(2, 1)).expect("work");

        assert_eq!(registry.project_count(RoadId(1)), 2);
        assert_eq!(registry.project_count(RoadId(2)), 0);

        let rows = registry.road_rows();
        assert_eq!(rows[0].project_count, 2);
        assert_eq!(rows[1].project_count, 0);
    }

    #[test]
    fn work_rows_join_road_name_and_ward() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "Narnaul Highway")).expect("road");
        registry.insert_work(make_work(1, 1)).expect("work");

        let rows = registry.work_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].road_name, "Narnaul Highway");
        assert_eq!(rows[0].ward, Ward::new(1).expect("ward"));
    }

    #[test]
    fn entries_group_works_under_their_road() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        registry.insert_road(make_road(2, "B")).expect("road");
        registry.insert_work(make_work(1, 2)).expect("work");
        registry.insert_work(make_work(2, 1)).expect("work");

        let ids: Vec<String> = registry.entries().iter().map(|e| e.id_string()).collect();
        assert_eq!(ids, vec!["RD-001", "W-002", "RD-002", "W-001"]);
    }

    #[test]
    fn snapshot_round_trips() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        registry.insert_work(make_work(1, 1)).expect("work");

        let snapshot = registry.snapshot();
        let rebuilt = Registry::from_snapshot(snapshot).expect("rebuild");

        assert_eq!(rebuilt.road_count(), 1);
        assert_eq!(rebuilt.work_count(), 1);
        // Allocation resumes after the highest snapshot id.
        let mut rebuilt = rebuilt;
        assert_eq!(rebuilt.allocate_road_id(), RoadId(2));
    }

    #[test]
    fn snapshot_with_dangling_reference_is_rejected() {
        let snapshot = RegistrySnapshot {
            roads: vec![make_road(1, "A")],
            works: vec![make_work(1, 9)],
        };
        assert!(matches!(
            Registry::from_snapshot(snapshot),
            Err(RegistryError::UnknownRoad(RoadId(9)))
        ));
    }

    #[test]
    fn vendors_are_distinct_and_sorted() {
        let mut registry = Registry::new();
        registry.insert_road(make_road(1, "A")).expect("road");
        let mut w1 = make_work(1, 1);
        w1.vendor = "Zeta Works".to_string();
        let mut w2 = make_work(2, 1);
        w2.vendor = "Alpha Infra".to_string();
        let mut w3 = make_work(3, 1);
        w3.vendor = "Zeta Works".to_string();
        registry.insert_work(w1).expect("work");
        registry.insert_work(w2).expect("work");
        registry.insert_work(w3).expect("work");

        assert_eq!(registry.vendors(), vec!["Alpha Infra", "Zeta Works"]);
    }
}
