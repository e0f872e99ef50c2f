//! # Export Planning Module
//!
//! Field selection and row projection for data exports.
//!
//! An export is planned as an [`ExportSheet`]: the chosen columns in
//! declaration order plus every record projected to stringified cells.
//! Producing a downloadable artifact (xlsx/csv/pdf bytes) from a sheet is
//! deliberately not part of this crate; the sheet is the hand-off shape.

use crate::record::{RoadRow, WorkRow};
use crate::types::RegistryError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// EXPORT FORMAT
// =============================================================================

/// Declared target format of an export.
///
/// Carried through the plan so the (external) encoder knows what to
/// produce; no encoder ships with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook.
    Excel,
    /// Comma-separated values.
    Csv,
    /// PDF report.
    Pdf,
}

impl ExportFormat {
    /// Lowercase token used by CLI flags.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ExportFormat {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(RegistryError::UnknownFormat(other.to_string())),
        }
    }
}

// =============================================================================
// EXPORTABLE FIELDS
// =============================================================================

/// Exportable columns of the roads data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadField {
    /// Road id (`RD-001`).
    Id,
    /// Road name.
    Name,
    /// Ward number.
    Ward,
    /// Road length.
    Length,
    /// In-service status.
    Status,
    /// Registration date.
    RegisteredOn,
    /// Derived count of tagged works.
    ProjectCount,
}

impl RoadField {
    /// Every road column, in declaration order.
    pub const ALL: [RoadField; 7] = [
        RoadField::Id,
        RoadField::Name,
        RoadField::Ward,
        RoadField::Length,
        RoadField::Status,
        RoadField::RegisteredOn,
        RoadField::ProjectCount,
    ];

    /// Column header.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RoadField::Id => "Road ID",
            RoadField::Name => "Road Name",
            RoadField::Ward => "Ward Number",
            RoadField::Length => "Road Length",
            RoadField::Status => "Status",
            RoadField::RegisteredOn => "Registration Date",
            RoadField::ProjectCount => "Project Count",
        }
    }

    /// Flag token naming this column.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            RoadField::Id => "id",
            RoadField::Name => "name",
            RoadField::Ward => "ward",
            RoadField::Length => "length",
            RoadField::Status => "status",
            RoadField::RegisteredOn => "registered-on",
            RoadField::ProjectCount => "project-count",
        }
    }

    fn cell(&self, row: &RoadRow) -> String {
        match self {
            RoadField::Id => row.road.id.to_string(),
            RoadField::Name => row.road.name.clone(),
            RoadField::Ward => row.road.ward.number().to_string(),
            RoadField::Length => row.road.length.to_string(),
            RoadField::Status => row.road.status.as_str().to_string(),
            RoadField::RegisteredOn => row.road.registered_on.to_string(),
            RoadField::ProjectCount => row.project_count.to_string(),
        }
    }
}

impl FromStr for RoadField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        RoadField::ALL
            .into_iter()
            .find(|f| f.key() == token)
            .ok_or(RegistryError::UnknownField(token))
    }
}

/// Exportable columns of the works data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkField {
    /// Work id (`W-001`).
    Id,
    /// Work name.
    Name,
    /// Tagged road, as `name (id)`.
    RoadInfo,
    /// Contracted cost.
    Cost,
    /// Executing vendor.
    Vendor,
    /// Lifecycle phase.
    Phase,
    /// Declared start date.
    StartDate,
    /// Declared end date.
    EndDate,
    /// Work description.
    Description,
}

impl WorkField {
    /// Every work column, in declaration order.
    pub const ALL: [WorkField; 9] = [
        WorkField::Id,
        WorkField::Name,
        WorkField::RoadInfo,
        WorkField::Cost,
        WorkField::Vendor,
        WorkField::Phase,
        WorkField::StartDate,
        WorkField::EndDate,
        WorkField::Description,
    ];

    /// Column header.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            WorkField::Id => "Work ID",
            WorkField::Name => "Work Name",
            WorkField::RoadInfo => "Road",
            WorkField::Cost => "Cost",
            WorkField::Vendor => "Vendor",
            WorkField::Phase => "Phase",
            WorkField::StartDate => "Start Date",
            WorkField::EndDate => "End Date",
            WorkField::Description => "Description",
        }
    }

    /// Flag token naming this column.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            WorkField::Id => "id",
            WorkField::Name => "name",
            WorkField::RoadInfo => "road-info",
            WorkField::Cost => "cost",
            WorkField::Vendor => "vendor",
            WorkField::Phase => "phase",
            WorkField::StartDate => "start-date",
            WorkField::EndDate => "end-date",
            WorkField::Description => "description",
        }
    }

    fn cell(&self, row: &WorkRow) -> String {
        match self {
            WorkField::Id => row.work.id.to_string(),
            WorkField::Name => row.work.name.clone(),
            WorkField::RoadInfo => format!("{} ({})", row.road_name, row.work.road_id),
            WorkField::Cost => row.work.cost.to_string(),
            WorkField::Vendor => row.work.vendor.clone(),
            WorkField::Phase => row.work.phase.as_str().to_string(),
            WorkField::StartDate => row.work.start_date.to_string(),
            WorkField::EndDate => row.work.end_date.to_string(),
            WorkField::Description => row.work.description.clone(),
        }
    }
}

impl FromStr for WorkField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        WorkField::ALL
            .into_iter()
            .find(|f| f.key() == token)
            .ok_or(RegistryError::UnknownField(token))
    }
}

// =============================================================================
// FIELD SELECTION
// =============================================================================

/// The checkbox grid of an export: which columns are in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSelection<F: Ord> {
    selected: BTreeSet<F>,
}

impl<F: Ord + Copy> FieldSelection<F> {
    /// Start with nothing selected.
    #[must_use]
    pub fn none() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    /// Select every listed field.
    #[must_use]
    pub fn of(fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            selected: fields.into_iter().collect(),
        }
    }

    /// Flip one field.
    pub fn toggle(&mut self, field: F) {
        if !self.selected.remove(&field) {
            self.selected.insert(field);
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether a field is in the selection.
    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.selected.contains(&field)
    }

    /// Number of selected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected fields filtered out of `order`, preserving it.
    fn in_order(&self, order: &[F]) -> Vec<F> {
        order
            .iter()
            .copied()
            .filter(|f| self.selected.contains(f))
            .collect()
    }
}

impl FieldSelection<RoadField> {
    /// The default roads selection: every column.
    #[must_use]
    pub fn default_roads() -> Self {
        Self::of(RoadField::ALL)
    }
}

impl FieldSelection<WorkField> {
    /// The default works selection: every column except the description.
    #[must_use]
    pub fn default_works() -> Self {
        Self::of(
            WorkField::ALL
                .into_iter()
                .filter(|f| *f != WorkField::Description),
        )
    }
}

// =============================================================================
// EXPORT SHEET
// =============================================================================

/// A planned export: headers plus stringified rows, ready for an encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSheet {
    /// What the export covers.
    pub title: String,
    /// Declared target format.
    pub format: ExportFormat,
    /// Column headers, in declaration order of the selected fields.
    pub columns: Vec<&'static str>,
    /// One entry per record, cells aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

/// Plan a roads export over the given rows.
///
/// Columns follow the declaration order of [`RoadField::ALL`] regardless of
/// selection order. Fails when nothing is selected.
pub fn road_sheet(
    rows: &[RoadRow],
    selection: &FieldSelection<RoadField>,
    format: ExportFormat,
) -> Result<ExportSheet, RegistryError> {
    if selection.is_empty() {
        return Err(RegistryError::NothingSelected);
    }
    let fields = selection.in_order(&RoadField::ALL);
    Ok(ExportSheet {
        title: "Roads Data".to_string(),
        format,
        columns: fields.iter().map(|f| f.label()).collect(),
        rows: rows
            .iter()
            .map(|row| fields.iter().map(|f| f.cell(row)).collect())
            .collect(),
    })
}

/// Plan a works export over the given rows.
pub fn work_sheet(
    rows: &[WorkRow],
    selection: &FieldSelection<WorkField>,
    format: ExportFormat,
) -> Result<ExportSheet, RegistryError> {
    if selection.is_empty() {
        return Err(RegistryError::NothingSelected);
    }
    let fields = selection.in_order(&WorkField::ALL);
    Ok(ExportSheet {
        title: "Works & Projects".to_string(),
        format,
        columns: fields.iter().map(|f| f.label()).collect(),
        rows: rows
            .iter()
            .map(|row| fields.iter().map(|f| f.cell(row)).collect())
            .collect(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
