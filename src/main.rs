//! # UI Inventory CLI (`uinv`)
//!
//! The `uinv` binary drives the derivation engine over a captured evidence
//! snapshot. Every command re-derives from the evidence file; nothing is
//! cached between runs and the evidence is never modified.
//!
//! ## Usage
//!
//! ```bash
//! uinv --config ./config/uinv.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `uinv components` | De-duplicated components, most captured first |
//! | `uinv styles` | Exact-match styles, most used first |
//! | `uinv captures <component-id>` | Captures belonging to a component |
//! | `uinv locations <style-id>` | Pages on which a style appears |
//! | `uinv related <style-id>` | Components using a style (max 12) |
//! | `uinv essentials <record-id>` | Visual essentials of one capture |
//! | `uinv groups` | Bucketed near-duplicate groups |
//! | `uinv explain <key>` | Break a group key into its parts |
//! | `uinv variants <key>` | Variants inside one bucketed group |
//! | `uinv stats` | Inventory summary |
//! | `uinv export` | Versioned JSON export of components and styles |
//!
//! ## Examples
//!
//! ```bash
//! # List components for one audit project
//! uinv components --project checkout-audit
//!
//! # Colors only, as JSON
//! uinv styles --kind color --json
//!
//! # Export to a file
//! uinv export --output ./out/inventory.json
//! ```

mod config;
mod evidence;
mod export;
mod groups;
mod inspect;
mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::inspect::Output;

/// UI Inventory CLI — derive components and styles from captured UI evidence.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file that names the evidence snapshot and default scope.
#[derive(Parser)]
#[command(
    name = "uinv",
    about = "UI Inventory — derive a browsable inventory of components and styles from UI evidence",
    version,
    long_about = "UI Inventory groups captured UI evidence into de-duplicated components and \
    exact-match styles, answers drill-down queries over them, and offers a bucketed \
    near-duplicate view for exploratory analysis."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/uinv.toml")]
    config: PathBuf,

    /// Only include evidence from this project (overrides `scope.project_id`).
    ///
    /// Records captured before project scoping are always included.
    #[arg(long, global = true)]
    project: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List de-duplicated components.
    ///
    /// Sorted by capture count (desc), then name.
    Components,

    /// List exact-match styles.
    ///
    /// Sorted by usage count (desc), then kind, then value.
    Styles {
        /// Only show one kind: color, spacing, typography, shadow, border, unknown.
        #[arg(long)]
        kind: Option<String>,
    },

    /// List the captures that make up a component.
    Captures {
        /// Component id (`comp_…`).
        id: String,
    },

    /// List the pages on which a style appears.
    Locations {
        /// Style id (`style_…`).
        id: String,
    },

    /// List components that use a style (at most 12).
    Related {
        /// Style id (`style_…`).
        id: String,
    },

    /// Show the visual essentials table of one capture.
    Essentials {
        /// Evidence record id.
        id: String,
    },

    /// Group evidence into bucketed near-duplicate groups.
    Groups {
        /// Grouping mode: `name`, `role`, or `full`. Defaults to `grouping.mode`.
        #[arg(long)]
        mode: Option<String>,
    },

    /// Explain a bucketed group key without reading evidence.
    Explain {
        /// Group key as printed by `uinv groups`.
        key: String,
    },

    /// Split one bucketed group into style variants.
    Variants {
        /// Group key as printed by `uinv groups`.
        key: String,

        /// Mode the key was produced with. Defaults to `grouping.mode`.
        #[arg(long)]
        mode: Option<String>,
    },

    /// Print an inventory summary.
    Stats,

    /// Export components and styles as versioned JSON.
    ///
    /// Writes to `--output`, else `export.output`, else stdout.
    Export {
        /// Output file path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // `explain` works on the key alone and needs no config.
    if let Commands::Explain { key } = &cli.command {
        return groups::run_explain(key, cli.json);
    }

    let cfg = config::load_config(&cli.config)?;
    let out = Output {
        project: cli.project.as_deref(),
        json: cli.json,
    };

    match cli.command {
        Commands::Components => inspect::run_components(&cfg, out)?,
        Commands::Styles { kind } => inspect::run_styles(&cfg, kind.as_deref(), out)?,
        Commands::Captures { id } => inspect::run_captures(&cfg, &id, out)?,
        Commands::Locations { id } => inspect::run_locations(&cfg, &id, out)?,
        Commands::Related { id } => inspect::run_related(&cfg, &id, out)?,
        Commands::Essentials { id } => inspect::run_essentials(&cfg, &id, out)?,
        Commands::Groups { mode } => {
            let mode = groups::resolve_mode(&cfg, mode.as_deref())?;
            groups::run_groups(&cfg, mode, out)?;
        }
        Commands::Explain { .. } => {}
        Commands::Variants { key, mode } => {
            let mode = groups::resolve_mode(&cfg, mode.as_deref())?;
            groups::run_variants(&cfg, &key, mode, out)?;
        }
        Commands::Stats => stats::run_stats(&cfg, out.project)?,
        Commands::Export { output } => {
            export::run_export(&cfg, out.project, output.as_deref())?;
        }
    }

    Ok(())
}
