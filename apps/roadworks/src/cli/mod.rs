//! # Roadworks CLI Module
//!
//! This module implements the CLI interface for Roadworks.
//!
//! ## Available Commands
//!
//! - `roads` - Road registry view with search/ward/status filters
//! - `works` - Work ledger view with search/road/phase filters
//! - `search` - Unified search over mixed road and work entries
//! - `summary` - Dashboard aggregates, optionally per ward
//! - `export` - Plan a roads or works export with field selection
//! - `add-road` - Register a new road in the in-memory registry
//! - `tag-work` - Tag a new work to a registered road
//!
//! Every command rebuilds its registry (built-in samples, or a `--data`
//! snapshot) — nothing persists between invocations.

mod commands;

use clap::{Parser, Subcommand};
use roadworks_core::RegistryError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Roadworks - Municipal Road Registry
///
/// Track road assets and the infrastructure work tagged to them, and
/// filter every view through one faceted engine.
#[derive(Parser, Debug)]
#[command(name = "roadworks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Load the registry from a JSON snapshot instead of the built-in samples
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Road registry view
    Roads {
        /// Search by road name or id
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Filter by ward number (1-5)
        #[arg(short, long)]
        ward: Option<String>,

        /// Filter by status (active, inactive)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Work ledger view
    Works {
        /// Search by work name or tagged road name
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Filter by tagged road id (e.g. RD-002)
        #[arg(short, long)]
        road: Option<String>,

        /// Filter by phase (planning, in-progress, completed)
        #[arg(short, long)]
        phase: Option<String>,
    },

    /// Unified search over roads and works
    Search {
        /// Search by name, id, or tagged road name
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Filter by record kind (road, work)
        #[arg(short, long)]
        kind: Option<String>,

        /// Filter by ward number (1-5)
        #[arg(short, long)]
        ward: Option<String>,

        /// Filter by vendor (works only; roads always pass)
        #[arg(long)]
        vendor: Option<String>,

        /// Filter by phase (works only; roads always pass)
        #[arg(short, long)]
        phase: Option<String>,
    },

    /// Dashboard aggregates
    Summary {
        /// Narrow to one ward
        #[arg(short, long)]
        ward: Option<String>,
    },

    /// Plan a data export (no artifact is written)
    Export {
        /// What to export: roads or works
        target: String,

        /// Comma-separated field keys (default: the view's standard set)
        #[arg(short, long)]
        fields: Option<String>,

        /// Select every field, including ones off by default
        #[arg(short, long)]
        all_fields: bool,

        /// Declared target format (excel, csv, pdf)
        #[arg(short = 't', long, default_value = "excel")]
        format: String,
    },

    /// Register a new road
    AddRoad {
        /// Road name
        #[arg(short, long)]
        name: String,

        /// Ward number (1-5)
        #[arg(short, long)]
        ward: u8,

        /// Length in metres
        #[arg(short, long)]
        length: u32,

        /// Status (active, inactive)
        #[arg(short, long, default_value = "active")]
        status: String,
    },

    /// Tag a new work to a road
    TagWork {
        /// Tagged road id (e.g. RD-001)
        #[arg(short, long)]
        road: String,

        /// Work name
        #[arg(short, long)]
        name: String,

        /// Cost in whole rupees
        #[arg(short, long)]
        cost: i64,

        /// Executing vendor
        #[arg(long)]
        vendor: String,

        /// Phase (planning, in-progress, completed)
        #[arg(short, long, default_value = "planning")]
        phase: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Work description
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), RegistryError> {
    let registry = load_registry(cli.data.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Roads {
            query,
            ward,
            status,
        }) => cmd_roads(&registry, json_mode, query, ward, status),
        Some(Commands::Works { query, road, phase }) => {
            cmd_works(&registry, json_mode, query, road, phase)
        }
        Some(Commands::Search {
            query,
            kind,
            ward,
            vendor,
            phase,
        }) => cmd_search(&registry, json_mode, query, kind, ward, vendor, phase),
        Some(Commands::Summary { ward }) => cmd_summary(&registry, json_mode, ward),
        Some(Commands::Export {
            target,
            fields,
            all_fields,
            format,
        }) => cmd_export(&registry, json_mode, &target, fields, all_fields, &format),
        Some(Commands::AddRoad {
            name,
            ward,
            length,
            status,
        }) => cmd_add_road(registry, json_mode, name, ward, length, &status),
        Some(Commands::TagWork {
            road,
            name,
            cost,
            vendor,
            phase,
            start,
            end,
            description,
        }) => cmd_tag_work(
            registry,
            json_mode,
            &road,
            name,
            cost,
            vendor,
            &phase,
            &start,
            &end,
            description,
        ),
        None => {
            // No subcommand - show the dashboard summary by default
            cmd_summary(&registry, json_mode, None)
        }
    }
}
