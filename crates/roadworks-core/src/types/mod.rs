//! # Core Type Definitions
//!
//! This module contains all core types for the Roadworks deterministic
//! registry:
//! - Record identifiers (`RoadId`, `WorkId`)
//! - Domain scalars (`Ward`, `Metres`, `Rupees`)
//! - Lifecycle enums (`RoadStatus`, `WorkPhase`, `RecordKind`)
//! - Error types (`RegistryError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point; lengths are metres,
//!   money is whole rupees)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for aggregates to prevent overflow

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Unique identifier for a road asset.
///
/// Rendered and parsed in the `RD-001` form used across every surface.
/// Ids are allocated monotonically by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoadId(pub u32);

/// Unique identifier for a unit of infrastructure work.
///
/// Rendered and parsed in the `W-001` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkId(pub u32);

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RD-{:03}", self.0)
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W-{:03}", self.0)
    }
}

/// Parse the numeric tail of a prefixed id such as `RD-001`.
fn parse_id_tail(input: &str, prefix: &str) -> Result<u32, RegistryError> {
    input
        .strip_prefix(prefix)
        .and_then(|tail| tail.parse::<u32>().ok())
        .ok_or_else(|| RegistryError::InvalidId(input.to_string()))
}

impl FromStr for RoadId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id_tail(s.trim(), "RD-").map(Self)
    }
}

impl FromStr for WorkId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id_tail(s.trim(), "W-").map(Self)
    }
}

// Ids cross the process boundary in their display form (`"RD-001"`),
// never as bare integers.

impl Serialize for RoadId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoadId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for WorkId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// WARD
// =============================================================================

/// Lowest valid ward number.
pub const WARD_MIN: u8 = 1;

/// Highest valid ward number.
pub const WARD_MAX: u8 = 5;

/// A municipal ward, the coarse spatial unit every record belongs to.
///
/// The valid domain is `WARD_MIN..=WARD_MAX`; construction outside that
/// range is rejected so a `Ward` value is valid by existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Ward(u8);

impl Ward {
    /// Create a ward, rejecting numbers outside the municipal range.
    pub fn new(number: u8) -> Result<Self, RegistryError> {
        if (WARD_MIN..=WARD_MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(RegistryError::UnknownWard(number))
        }
    }

    /// The raw ward number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// All valid wards in ascending order.
    #[must_use]
    pub fn all() -> Vec<Ward> {
        (WARD_MIN..=WARD_MAX).map(Ward).collect()
    }
}

impl TryFrom<u8> for Ward {
    type Error = RegistryError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<Ward> for u8 {
    fn from(ward: Ward) -> Self {
        ward.0
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ward {}", self.0)
    }
}

impl FromStr for Ward {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s.trim().parse().map_err(|_| RegistryError::InvalidField {
            field: "ward",
            reason: "expected a ward number",
        })?;
        Self::new(number)
    }
}

// =============================================================================
// METRES (road length)
// =============================================================================

/// Road length in whole metres.
///
/// Stored as an integer so the core stays float-free; displayed in the
/// `4.5 km` form the registry has always shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Metres(pub u32);

impl Metres {
    /// Create a length from whole metres.
    #[must_use]
    pub const fn new(metres: u32) -> Self {
        Self(metres)
    }

    /// The raw length in metres.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Metres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One decimal of kilometres, truncated: 4500 m -> "4.5 km".
        let km = self.0 / 1000;
        let tenths = (self.0 % 1000) / 100;
        write!(f, "{}.{} km", km, tenths)
    }
}

// =============================================================================
// RUPEES (monetary amount)
// =============================================================================

/// A monetary amount in whole rupees.
///
/// Uses i64 with saturating arithmetic; aggregation over a registry can
/// never overflow into a panic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Rupees(pub i64);

impl Rupees {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Saturating addition, the only aggregation the core performs.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// True for amounts a work cost is allowed to carry.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Rupees {
    /// Indian digit grouping: the last three digits, then groups of two.
    /// `2450000` renders as `₹24,50,000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);

        for (i, ch) in digits.chars().enumerate() {
            let remaining = digits.len() - i;
            if i > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.0 < 0 {
            write!(f, "-₹{}", grouped)
        } else {
            write!(f, "₹{}", grouped)
        }
    }
}

// =============================================================================
// ROAD STATUS
// =============================================================================

/// Whether a road asset is currently in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoadStatus {
    /// The road is in service.
    Active,
    /// The road is registered but out of service.
    Inactive,
}

impl RoadStatus {
    /// Human-facing label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadStatus::Active => "Active",
            RoadStatus::Inactive => "Inactive",
        }
    }

    /// Lowercase token used by facet state and CLI flags.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            RoadStatus::Active => "active",
            RoadStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(RoadStatus::Active),
            "inactive" => Ok(RoadStatus::Inactive),
            other => Err(RegistryError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// WORK PHASE
// =============================================================================

/// Lifecycle stage label of a work record.
///
/// A linear lifecycle with no enforced transition function: the phase is
/// operator-set and may move in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkPhase {
    /// Scoped and budgeted, not yet started.
    Planning,
    /// Under execution.
    InProgress,
    /// Delivered.
    Completed,
}

impl WorkPhase {
    /// Human-facing label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkPhase::Planning => "Planning",
            WorkPhase::InProgress => "In Progress",
            WorkPhase::Completed => "Completed",
        }
    }

    /// Kebab-case token used by facet state and CLI flags.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            WorkPhase::Planning => "planning",
            WorkPhase::InProgress => "in-progress",
            WorkPhase::Completed => "completed",
        }
    }

    /// All phases in lifecycle order.
    #[must_use]
    pub const fn all() -> [WorkPhase; 3] {
        [WorkPhase::Planning, WorkPhase::InProgress, WorkPhase::Completed]
    }
}

impl fmt::Display for WorkPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkPhase {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the token and the display form.
        match s.trim().to_ascii_lowercase().replace(' ', "-").as_str() {
            "planning" => Ok(WorkPhase::Planning),
            "in-progress" => Ok(WorkPhase::InProgress),
            "completed" => Ok(WorkPhase::Completed),
            other => Err(RegistryError::UnknownPhase(other.to_string())),
        }
    }
}

// =============================================================================
// RECORD KIND
// =============================================================================

/// The two record kinds the unified search view mixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A road asset.
    Road,
    /// A unit of work tagged to a road.
    Work,
}

impl RecordKind {
    /// Lowercase token used by facet state and CLI flags.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            RecordKind::Road => "road",
            RecordKind::Work => "work",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Road => "Road",
            RecordKind::Work => "Work",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "road" | "roads" => Ok(RecordKind::Road),
            "work" | "works" => Ok(RecordKind::Work),
            other => Err(RegistryError::UnknownKind(other.to_string())),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Roadworks registry.
///
/// - No silent failures on the write path
/// - Use `Result<T, RegistryError>` for fallible operations
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An id string did not match the `RD-001` / `W-001` shape.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Ward number outside the municipal range.
    #[error("Unknown ward: {0} (valid: {WARD_MIN}..={WARD_MAX})")]
    UnknownWard(u8),

    /// Road status label not recognised.
    #[error("Unknown road status: {0:?}")]
    UnknownStatus(String),

    /// Work phase label not recognised.
    #[error("Unknown work phase: {0:?}")]
    UnknownPhase(String),

    /// Record kind label not recognised.
    #[error("Unknown record kind: {0:?}")]
    UnknownKind(String),

    /// A required free-text field was empty or over its length limit.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// The draft field that failed validation.
        field: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A work cost must be a positive amount.
    #[error("Cost must be positive, got {0}")]
    NonPositiveCost(i64),

    /// A road length must be non-zero.
    #[error("Road length must be non-zero")]
    ZeroLength,

    /// An insert carried an id the registry already holds.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// A work referenced a road the registry does not hold.
    #[error("Road not found: {0}")]
    UnknownRoad(RoadId),

    /// An operation referenced a work the registry does not hold.
    #[error("Work not found: {0}")]
    UnknownWork(WorkId),

    /// A road cannot be removed while works are tagged to it.
    #[error("Road {road} has {count} tagged work(s); untag them first")]
    RoadHasWorks {
        /// The road that was asked to be removed.
        road: RoadId,
        /// How many works still reference it.
        count: usize,
    },

    /// Work dates out of order.
    #[error("Start date {start} is after end date {end}")]
    InvertedDates {
        /// Declared start of the work.
        start: chrono::NaiveDate,
        /// Declared end of the work.
        end: chrono::NaiveDate,
    },

    /// An export was requested with every field deselected.
    #[error("No fields selected for export")]
    NothingSelected,

    /// An export field name was not recognised for the record kind.
    #[error("Unknown export field: {0:?}")]
    UnknownField(String),

    /// An export format label was not recognised.
    #[error("Unknown export format: {0:?} (use: excel, csv, pdf)")]
    UnknownFormat(String),

    /// A registry snapshot could not be parsed.
    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}

// =============================================================================
// TESTS
// =============================================================================
