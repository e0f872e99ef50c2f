//! # Mutation Engine
//!
//! Validated create/update/delete over the registry.
//!
//! Drafts are the unkeyed record shapes a form dialog submits; the engine
//! validates draft content, allocates ids, and hands whole records to the
//! registry, which enforces the structural invariants (unique ids,
//! referential integrity). Nothing reaches storage unvalidated — the two
//! write-time invariants the data model calls out are enforced here and in
//! [`crate::registry`]:
//!
//! - `Work.road_id` must name a registered road
//! - `start_date <= end_date`

use crate::record::{Road, Work};
use crate::registry::Registry;
use crate::types::{Metres, RegistryError, RoadId, RoadStatus, Rupees, Ward, WorkId, WorkPhase};
use chrono::NaiveDate;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for road and work names.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length for vendor names.
pub const MAX_VENDOR_LENGTH: usize = 120;

/// Maximum length for work descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

// =============================================================================
// DRAFTS
// =============================================================================

/// The unkeyed content of a road, as submitted by the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadDraft {
    /// Free-text label.
    pub name: String,
    /// The ward the road lies in.
    pub ward: Ward,
    /// Length of the road.
    pub length: Metres,
    /// Whether the road is in service.
    pub status: RoadStatus,
}

/// The unkeyed content of a work, as submitted by the tagging form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDraft {
    /// Free-text label.
    pub name: String,
    /// What the work covers. May be empty.
    pub description: String,
    /// The road this work is tagged to.
    pub road_id: RoadId,
    /// Contracted cost.
    pub cost: Rupees,
    /// Executing vendor.
    pub vendor: String,
    /// Operator-set lifecycle label.
    pub phase: WorkPhase,
    /// Declared start of the work.
    pub start_date: NaiveDate,
    /// Declared end of the work.
    pub end_date: NaiveDate,
}

// =============================================================================
// MUTATION ENGINE
// =============================================================================

/// The MutationEngine consolidates all validated registry writes.
pub struct MutationEngine;

impl MutationEngine {
    /// Validate road draft content.
    pub fn validate_road(draft: &RoadDraft) -> Result<(), RegistryError> {
        validate_text("road name", &draft.name, MAX_NAME_LENGTH, true)?;
        if draft.length.value() == 0 {
            return Err(RegistryError::ZeroLength);
        }
        Ok(())
    }

    /// Validate work draft content.
    ///
    /// Road existence is the registry's concern and is checked on insert;
    /// everything else about the draft is checked here.
    pub fn validate_work(draft: &WorkDraft) -> Result<(), RegistryError> {
        validate_text("work name", &draft.name, MAX_NAME_LENGTH, true)?;
        validate_text("vendor", &draft.vendor, MAX_VENDOR_LENGTH, true)?;
        validate_text("description", &draft.description, MAX_DESCRIPTION_LENGTH, false)?;
        if !draft.cost.is_positive() {
            return Err(RegistryError::NonPositiveCost(draft.cost.value()));
        }
        if draft.start_date > draft.end_date {
            return Err(RegistryError::InvertedDates {
                start: draft.start_date,
                end: draft.end_date,
            });
        }
        Ok(())
    }

    /// Register a new road. The id is allocated by the registry; the
    /// registration date is supplied by the host (the core has no clock).
    pub fn register_road(
        registry: &mut Registry,
        draft: RoadDraft,
        registered_on: NaiveDate,
    ) -> Result<RoadId, RegistryError> {
        Self::validate_road(&draft)?;
        let id = registry.allocate_road_id();
        registry.insert_road(Road {
            id,
            name: draft.name,
            ward: draft.ward,
            length: draft.length,
            status: draft.status,
            registered_on,
        })
    }

    /// Update an existing road's content. Id and registration date are
    /// immutable and carried over.
    pub fn update_road(
        registry: &mut Registry,
        id: RoadId,
        draft: RoadDraft,
    ) -> Result<(), RegistryError> {
        Self::validate_road(&draft)?;
        let existing = registry.road(id).ok_or(RegistryError::UnknownRoad(id))?;
        let registered_on = existing.registered_on;
        registry.replace_road(Road {
            id,
            name: draft.name,
            ward: draft.ward,
            length: draft.length,
            status: draft.status,
            registered_on,
        })
    }

    /// Remove a road. Fails while works are still tagged to it.
    pub fn remove_road(registry: &mut Registry, id: RoadId) -> Result<Road, RegistryError> {
        registry.remove_road(id)
    }

    /// Tag a new work to a road.
    pub fn tag_work(registry: &mut Registry, draft: WorkDraft) -> Result<WorkId, RegistryError> {
        Self::validate_work(&draft)?;
        let id = registry.allocate_work_id();
        registry.insert_work(Self::build_work(id, draft))
    }

    /// Update an existing work's content, including retagging it to a
    /// different road.
    pub fn update_work(
        registry: &mut Registry,
        id: WorkId,
        draft: WorkDraft,
    ) -> Result<(), RegistryError> {
        Self::validate_work(&draft)?;
        if registry.work(id).is_none() {
            return Err(RegistryError::UnknownWork(id));
        }
        registry.replace_work(Self::build_work(id, draft))
    }

    /// Remove a work, releasing its road.
    pub fn untag_work(registry: &mut Registry, id: WorkId) -> Result<Work, RegistryError> {
        registry.remove_work(id)
    }

    fn build_work(id: WorkId, draft: WorkDraft) -> Work {
        Work {
            id,
            name: draft.name,
            description: draft.description,
            road_id: draft.road_id,
            cost: draft.cost,
            vendor: draft.vendor,
            phase: draft.phase,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }
}

/// Reject empty (when required) or over-long text fields.
fn validate_text(
    field: &'static str,
    value: &str,
    max_len: usize,
    required: bool,
) -> Result<(), RegistryError> {
    if required && value.trim().is_empty() {
        return Err(RegistryError::InvalidField {
            field,
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(RegistryError::InvalidField {
            field,
            reason: "exceeds maximum length",
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
