//! Evidence loading.
//!
//! Reads the evidence snapshot named in the config and applies project
//! scoping before anything reaches the derivation engine. The engine
//! itself never touches the filesystem.

use anyhow::{Context, Result};
use std::path::Path;

use ui_inventory_core::models::EvidenceRecord;
use ui_inventory_core::scope::scope_to_project;

use crate::config::Config;

/// Read every record from a JSON array file.
pub fn read_evidence(path: &Path) -> Result<Vec<EvidenceRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read evidence file: {}", path.display()))?;
    let records: Vec<EvidenceRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse evidence file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded evidence");
    Ok(records)
}

/// Load evidence and scope it to `project_override`, falling back to the
/// configured project.
pub fn load_scoped(config: &Config, project_override: Option<&str>) -> Result<Vec<EvidenceRecord>> {
    let records = read_evidence(&config.evidence.path)?;
    let project = project_override.or(config.scope.project_id.as_deref());
    let scoped = scope_to_project(&records, project);
    if let Some(project) = project {
        tracing::debug!(
            project,
            total = records.len(),
            in_scope = scoped.len(),
            "applied project scope"
        );
    }
    Ok(scoped)
}

/// Find one record by id.
pub fn find_record<'a>(records: &'a [EvidenceRecord], id: &str) -> Option<&'a EvidenceRecord> {
    records.iter().find(|r| r.id == id)
}
