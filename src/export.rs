//! Export the derived inventory as JSON.
//!
//! Produces a payload holding every component and style, stamped with the
//! engine's signature version so downstream tooling can detect grouping
//! changes between exports. The evidence file is never modified.

use anyhow::{Context, Result};
use std::path::Path;

use ui_inventory_core::export::build_export;

use crate::config::Config;
use crate::evidence;

/// Export components and styles as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(config: &Config, project: Option<&str>, output: Option<&Path>) -> Result<()> {
    let records = evidence::load_scoped(config, project)?;
    let project = project.or(config.scope.project_id.as_deref());

    let mut payload = build_export(&records, project, config.grouping.representative);
    payload.exported_at = Some(chrono::Utc::now().to_rfc3339());

    let json = if config.export.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    match output.or(config.export.output.as_deref()) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!(
                "Exported {} components, {} styles from {} records to {} (signature v{})",
                payload.components.len(),
                payload.styles.len(),
                payload.record_count,
                path.display(),
                payload.signature_version
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
