//! Project scoping.
//!
//! Records captured before projects existed carry no `projectId`; they
//! pass every project filter rather than disappearing from audits.

use crate::models::EvidenceRecord;

/// Whether `record` belongs to `project_id`.
pub fn in_project(record: &EvidenceRecord, project_id: &str) -> bool {
    match record.project_id.as_deref() {
        Some(id) => id == project_id,
        None => true,
    }
}

/// Records visible under `project_id`; `None` keeps everything.
pub fn scope_to_project(records: &[EvidenceRecord], project_id: Option<&str>) -> Vec<EvidenceRecord> {
    match project_id {
        Some(project) => records
            .iter()
            .filter(|r| in_project(r, project))
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}
