//! # roadworks-core
//!
//! The deterministic registry and filter engine for Roadworks - THE LOGIC.
//!
//! This crate implements the CORE of the municipal road-asset tracker: a
//! typed record model (roads and the works tagged to them), an owned
//! in-memory registry with validated writes, and the faceted filter engine
//! every view evaluates its state through.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY place where records exist (stateful)
//! - Performs no I/O: filtering, export planning and summaries are pure
//!   functions of their inputs
//! - Is deterministic: `BTreeMap` only, integer arithmetic only (metres,
//!   whole rupees), ascending-id iteration everywhere
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod dataset;
pub mod export;
pub mod facet;
pub mod filter;
pub mod mutation;
pub mod record;
pub mod registry;
pub mod summary;
pub mod types;
pub mod views;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Metres, RecordKind, RegistryError, RoadId, RoadStatus, Rupees, Ward, WorkId, WorkPhase,
};

// =============================================================================
// RE-EXPORTS: Records & Registry
// =============================================================================

pub use record::{Entry, Road, RoadRow, Work, WorkRow};
pub use registry::{Registry, RegistrySnapshot};

// =============================================================================
// RE-EXPORTS: Filter Engine
// =============================================================================

pub use facet::{ALL, CategoryField, Facet, FacetId, FacetRule, FacetState, Faceted, TextField};
pub use filter::{FilterEngine, FilterReport};

// =============================================================================
// RE-EXPORTS: Mutation, Export & Summary
// =============================================================================

pub use export::{ExportFormat, ExportSheet, FieldSelection, RoadField, WorkField};
pub use mutation::{MutationEngine, RoadDraft, WorkDraft};
pub use summary::{PhaseBreakdown, RegistrySummary, WardBreakdown};
