//! Export payload for derived inventory data.
//!
//! The payload is the only place derived grouping leaves the engine. It
//! carries [`SIGNATURE_VERSION`] so downstream tooling can tell when two
//! exports were grouped by different algorithms. Nothing here is ever
//! written back into the evidence store.

use serde::{Deserialize, Serialize};

use crate::components::{aggregate_components_with, Component, RepresentativePolicy};
use crate::models::EvidenceRecord;
use crate::styles::{aggregate_styles, Style};

/// Version of signature construction, hashing and grouping keys.
///
/// Bump whenever any of them changes shape.
pub const SIGNATURE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub signature_version: u32,
    /// RFC 3339 timestamp, stamped by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub record_count: usize,
    pub components: Vec<Component>,
    pub styles: Vec<Style>,
}

/// Derive components and styles from `records` into an export payload.
pub fn build_export(
    records: &[EvidenceRecord],
    project_id: Option<&str>,
    policy: RepresentativePolicy,
) -> ExportPayload {
    ExportPayload {
        signature_version: SIGNATURE_VERSION,
        exported_at: None,
        project_id: project_id.map(str::to_string),
        record_count: records.len(),
        components: aggregate_components_with(records, policy),
        styles: aggregate_styles(records),
    }
}
