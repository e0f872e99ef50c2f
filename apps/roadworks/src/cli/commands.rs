//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands: each
//! registry view assembles a `FacetState` from its flags, hands it to the
//! filter engine, and renders the report as a table plus a
//! "Showing X of Y" caption.

use chrono::NaiveDate;
use roadworks_core::{
    ExportFormat, FacetState, Faceted, FieldSelection, FilterEngine, MutationEngine, Registry,
    RegistryError, RegistrySnapshot, RegistrySummary, RoadDraft, RoadField, Ward, WorkDraft,
    WorkField, views,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for `--data` snapshots (5 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_DATA_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RegistryError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RegistryError::SnapshotError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RegistryError::SnapshotError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a snapshot path.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_file_path(path: &Path) -> Result<PathBuf, RegistryError> {
    let canonical = path.canonicalize().map_err(|e| {
        RegistryError::SnapshotError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(RegistryError::SnapshotError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// REGISTRY LOADING
// =============================================================================

/// Build the registry for this invocation: a `--data` snapshot when given,
/// the built-in sample records otherwise. Read-only either way — nothing is
/// ever written back.
pub fn load_registry(data: Option<&Path>) -> Result<Registry, RegistryError> {
    match data {
        Some(path) => {
            let validated = validate_file_path(path)?;
            validate_file_size(&validated, MAX_DATA_FILE_SIZE)?;

            let contents = std::fs::read(&validated)
                .map_err(|e| RegistryError::SnapshotError(format!("Read file: {}", e)))?;
            let snapshot: RegistrySnapshot = serde_json::from_slice(&contents)
                .map_err(|e| RegistryError::SnapshotError(format!("Parse snapshot: {}", e)))?;

            let registry = Registry::from_snapshot(snapshot)?;
            tracing::info!(
                "Loaded snapshot {:?}: {} roads, {} works",
                validated,
                registry.road_count(),
                registry.work_count()
            );
            Ok(registry)
        }
        None => roadworks_core::dataset::sample_registry(),
    }
}

// =============================================================================
// FACET STATE ASSEMBLY
// =============================================================================

/// Build a facet state from optional flag values; absent flags stay at
/// their defaults, so an unflagged command is the identity filter.
#[must_use]
pub fn state_from_flags(pairs: Vec<(&str, Option<String>)>) -> FacetState {
    let mut state = FacetState::new();
    for (id, value) in pairs {
        if let Some(value) = value {
            state.set(id, value);
        }
    }
    state
}

// =============================================================================
// TABLE RENDERING
// =============================================================================

/// Render headers and stringified rows as an aligned text table.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_line = |cells: Vec<String>| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            let pad = widths.get(i).copied().unwrap_or(0);
            line.push_str(cell);
            for _ in cell.chars().count()..pad {
                line.push(' ');
            }
            if i + 1 < cells.len() {
                line.push_str("  ");
            }
        }
        line.trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&render_line(
        headers.iter().map(|h| (*h).to_string()).collect(),
    ));
    out.push('\n');
    out.push_str(&render_line(
        widths.iter().map(|w| "-".repeat(*w)).collect(),
    ));
    for row in rows {
        out.push('\n');
        out.push_str(&render_line(row.clone()));
    }
    out
}

// =============================================================================
// ROADS COMMAND
// =============================================================================

/// Road registry view.
pub fn cmd_roads(
    registry: &Registry,
    json_mode: bool,
    query: Option<String>,
    ward: Option<String>,
    status: Option<String>,
) -> Result<(), RegistryError> {
    let rows = registry.road_rows();
    let state = state_from_flags(vec![
        (views::QUERY, query),
        (views::WARD, ward),
        (views::STATUS, status),
    ]);
    let report = FilterEngine::evaluate(&rows, &views::road_facets(), &state);

    if json_mode {
        let output = serde_json::json!({
            "total_count": report.total_count,
            "matched_count": report.matched_count,
            "roads": report.matched,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Road Registry");
    println!("=============");
    println!();

    if report.matched.is_empty() {
        println!("No roads found matching the current filters");
    } else {
        let cells: Vec<Vec<String>> = report
            .matched
            .iter()
            .map(|row| {
                vec![
                    row.road.id.to_string(),
                    row.road.name.clone(),
                    row.road.ward.to_string(),
                    row.road.length.to_string(),
                    row.road.status.to_string(),
                    row.road.registered_on.format("%d %b %Y").to_string(),
                    row.project_count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(
                &["Road ID", "Road Name", "Ward", "Length", "Status", "Registered On", "Projects"],
                &cells
            )
        );
    }

    println!();
    println!(
        "Showing {} out of {} roads",
        report.matched_count, report.total_count
    );

    Ok(())
}

// =============================================================================
// WORKS COMMAND
// =============================================================================

/// Work ledger view.
pub fn cmd_works(
    registry: &Registry,
    json_mode: bool,
    query: Option<String>,
    road: Option<String>,
    phase: Option<String>,
) -> Result<(), RegistryError> {
    let rows = registry.work_rows();
    let state = state_from_flags(vec![
        (views::QUERY, query),
        (views::ROAD, road),
        (views::PHASE, phase),
    ]);
    let report = FilterEngine::evaluate(&rows, &views::work_facets(), &state);

    if json_mode {
        let output = serde_json::json!({
            "total_count": report.total_count,
            "matched_count": report.matched_count,
            "works": report.matched,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Work Ledger");
    println!("===========");
    println!();

    if report.matched.is_empty() {
        println!("No work items found matching the current filters");
    } else {
        let cells: Vec<Vec<String>> = report
            .matched
            .iter()
            .map(|row| {
                vec![
                    row.work.id.to_string(),
                    row.work.name.clone(),
                    format!("{} ({})", row.road_name, row.work.road_id),
                    row.work.cost.to_string(),
                    row.work.vendor.clone(),
                    row.work.phase.to_string(),
                    row.work.start_date.to_string(),
                    row.work.end_date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(
                &["Work ID", "Work Name", "Road", "Cost", "Vendor", "Phase", "Start", "End"],
                &cells
            )
        );
    }

    println!();
    println!(
        "Showing {} out of {} works",
        report.matched_count, report.total_count
    );

    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Unified search over mixed road and work entries.
pub fn cmd_search(
    registry: &Registry,
    json_mode: bool,
    query: Option<String>,
    kind: Option<String>,
    ward: Option<String>,
    vendor: Option<String>,
    phase: Option<String>,
) -> Result<(), RegistryError> {
    let entries = registry.entries();
    let state = state_from_flags(vec![
        (views::QUERY, query),
        (views::KIND, kind),
        (views::WARD, ward),
        (views::VENDOR, vendor),
        (views::PHASE, phase),
    ]);
    let report = FilterEngine::evaluate(&entries, &views::search_facets(), &state);

    if json_mode {
        let output = serde_json::json!({
            "total_count": report.total_count,
            "matched_count": report.matched_count,
            "entries": report.matched,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Search Results");
    println!("==============");
    println!();

    if report.matched.is_empty() {
        println!("No items found matching your search criteria");
    } else {
        let cells: Vec<Vec<String>> = report
            .matched
            .iter()
            .map(|entry| {
                vec![
                    entry.id_string(),
                    entry.name().to_string(),
                    entry.kind().to_string(),
                    entry.ward().to_string(),
                    entry.detail(),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(&["ID", "Name", "Type", "Ward", "Details"], &cells)
        );
    }

    println!();
    println!(
        "Found {} of {} items matching your criteria",
        report.matched_count, report.total_count
    );

    Ok(())
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Dashboard aggregates, optionally narrowed to one ward.
pub fn cmd_summary(
    registry: &Registry,
    json_mode: bool,
    ward: Option<String>,
) -> Result<(), RegistryError> {
    let ward = ward.map(|w| w.parse::<Ward>()).transpose()?;
    let summary = RegistrySummary::measure(registry, ward);

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Registry Summary");
    println!("================");
    if let Some(ward) = summary.ward {
        println!("Scope: {}", ward);
    }
    println!();
    println!(
        "Roads:        {} ({} active)",
        summary.road_count, summary.active_road_count
    );
    println!(
        "Works:        {} ({} in progress)",
        summary.work_count, summary.works_in_progress
    );
    println!("Expenditure:  {}", summary.total_expenditure);
    println!();
    println!("By Phase:");
    for (phase, breakdown) in &summary.by_phase {
        println!(
            "  {:<12} {} work(s)  {}",
            phase.as_str(),
            breakdown.count,
            breakdown.expenditure
        );
    }
    if !summary.by_ward.is_empty() {
        println!();
        println!("By Ward:");
        for (ward, breakdown) in &summary.by_ward {
            println!(
                "  {}: {} road(s), {} work(s)",
                ward, breakdown.road_count, breakdown.work_count
            );
        }
    }

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Plan a roads or works export.
///
/// Prints the planned sheet; producing an actual artifact is the job of an
/// external encoder, so no file is ever written here.
pub fn cmd_export(
    registry: &Registry,
    json_mode: bool,
    target: &str,
    fields: Option<String>,
    all_fields: bool,
    format: &str,
) -> Result<(), RegistryError> {
    let format: ExportFormat = format.parse()?;

    let sheet = match target.trim().to_ascii_lowercase().as_str() {
        "roads" => {
            let selection = if all_fields {
                FieldSelection::of(RoadField::ALL)
            } else if let Some(list) = fields {
                FieldSelection::of(parse_fields::<RoadField>(&list)?)
            } else {
                FieldSelection::default_roads()
            };
            roadworks_core::export::road_sheet(&registry.road_rows(), &selection, format)?
        }
        "works" => {
            let selection = if all_fields {
                FieldSelection::of(WorkField::ALL)
            } else if let Some(list) = fields {
                FieldSelection::of(parse_fields::<WorkField>(&list)?)
            } else {
                FieldSelection::default_works()
            };
            roadworks_core::export::work_sheet(&registry.work_rows(), &selection, format)?
        }
        other => return Err(RegistryError::UnknownKind(other.to_string())),
    };

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&sheet).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Export Plan: {} ({})", sheet.title, sheet.format);
    println!();
    println!("{}", render_table(&sheet.columns, &sheet.rows));
    println!();
    println!(
        "Planned {} row(s) across {} column(s); no file was produced (encoding is external)",
        sheet.rows.len(),
        sheet.columns.len()
    );

    Ok(())
}

/// Parse a comma-separated field list.
fn parse_fields<F: std::str::FromStr<Err = RegistryError>>(
    list: &str,
) -> Result<Vec<F>, RegistryError> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

// =============================================================================
// ADD-ROAD COMMAND
// =============================================================================

/// Register a new road in the in-memory registry.
pub fn cmd_add_road(
    mut registry: Registry,
    json_mode: bool,
    name: String,
    ward: u8,
    length: u32,
    status: &str,
) -> Result<(), RegistryError> {
    let draft = RoadDraft {
        name,
        ward: Ward::new(ward)?,
        length: roadworks_core::Metres::new(length),
        status: status.parse()?,
    };
    let registered_on = chrono::Local::now().date_naive();
    let id = MutationEngine::register_road(&mut registry, draft, registered_on)?;
    tracing::info!("Registered road {}", id);

    let road = registry.road(id).ok_or(RegistryError::UnknownRoad(id))?;

    if json_mode {
        let output = serde_json::json!({
            "registered": road,
            "road_count": registry.road_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Registered {}: {} ({})", id, road.name, road.ward);
    println!(
        "Registry now holds {} roads (in-memory only; nothing persists)",
        registry.road_count()
    );

    Ok(())
}

// =============================================================================
// TAG-WORK COMMAND
// =============================================================================

/// Tag a new work to a registered road.
pub fn cmd_tag_work(
    mut registry: Registry,
    json_mode: bool,
    road: &str,
    name: String,
    cost: i64,
    vendor: String,
    phase: &str,
    start: &str,
    end: &str,
    description: String,
) -> Result<(), RegistryError> {
    let draft = WorkDraft {
        name,
        description,
        road_id: road.parse()?,
        cost: roadworks_core::Rupees::new(cost),
        vendor,
        phase: phase.parse()?,
        start_date: parse_date("start date", start)?,
        end_date: parse_date("end date", end)?,
    };
    let id = MutationEngine::tag_work(&mut registry, draft)?;
    tracing::info!("Tagged work {}", id);

    let work = registry.work(id).ok_or(RegistryError::UnknownWork(id))?;

    if json_mode {
        let output = serde_json::json!({
            "tagged": work,
            "work_count": registry.work_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Tagged {}: {} on {} for {}",
        id, work.name, work.road_id, work.cost
    );
    println!(
        "Registry now holds {} works (in-memory only; nothing persists)",
        registry.work_count()
    );

    Ok(())
}

/// Parse a `YYYY-MM-DD` date flag.
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RegistryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| RegistryError::InvalidField {
            field,
            reason: "expected YYYY-MM-DD",
        })
}
