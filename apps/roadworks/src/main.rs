//! # Roadworks - Municipal Road Registry
//!
//! The main binary for the Roadworks registry and filter engine.
//!
//! This application provides:
//! - CLI views over the registry (roads, works, unified search, summary)
//! - Export planning with per-field selection
//! - Validated registration and tagging of demo records
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                apps/roadworks (THE BINARY)               │
//! │                                                          │
//! │  ┌──────────────┐   ┌───────────────┐   ┌────────────┐  │
//! │  │  CLI (clap)  │   │ Table render  │   │ Snapshot   │  │
//! │  │  one command │   │ + captions    │   │ loader     │  │
//! │  │  per view    │   │               │   │ (--data)   │  │
//! │  └──────┬───────┘   └───────┬───────┘   └─────┬──────┘  │
//! │         └───────────────────┼─────────────────┘         │
//! │                             ▼                           │
//! │                   ┌─────────────────┐                   │
//! │                   │ roadworks-core  │                   │
//! │                   │  (THE LOGIC)    │                   │
//! │                   └─────────────────┘                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Registry views
//! roadworks roads --ward 1 --status active
//! roadworks works --road RD-002 --phase planning
//! roadworks search --query narnaul
//!
//! # Dashboard numbers and export planning
//! roadworks summary --ward 2
//! roadworks export works --fields id,name,cost --format csv
//! ```

use clap::Parser;
use roadworks::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — ROADWORKS_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ROADWORKS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roadworks=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Roadworks startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗  ██████╗  █████╗ ██████╗ ██╗    ██╗ ██████╗ ██████╗ ██╗  ██╗███████╗
  ██╔══██╗██╔═══██╗██╔══██╗██╔══██╗██║    ██║██╔═══██╗██╔══██╗██║ ██╔╝██╔════╝
  ██████╔╝██║   ██║███████║██║  ██║██║ █╗ ██║██║   ██║██████╔╝█████╔╝ ███████╗
  ██╔══██╗██║   ██║██╔══██║██║  ██║██║███╗██║██║   ██║██╔══██╗██╔═██╗ ╚════██║
  ██║  ██║╚██████╔╝██║  ██║██████╔╝╚███╔███╔╝╚██████╔╝██║  ██║██║  ██╗███████║
  ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═════╝  ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝

  Municipal Road Registry v{}

  Deterministic • Validated • In-Memory
"#,
        env!("CARGO_PKG_VERSION")
    );
}
