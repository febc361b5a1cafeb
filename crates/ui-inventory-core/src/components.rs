//! Component aggregation.
//!
//! Groups evidence records by signature hash. Each group becomes one
//! [`Component`] whose display fields come from a single representative
//! record.
//!
//! # Algorithm
//!
//! 1. Compute `comp_<hash(signature)>` for every record.
//! 2. Group by id, remembering encounter order.
//! 3. Pick the representative (first encountered by default).
//! 4. Derive name, category, type and source from the representative.
//! 5. Sort by `captures_count` (desc), `name` (locale asc), `id` (asc).

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{infer_category, page_label, Category};
use crate::models::EvidenceRecord;
use crate::signature::{component_id, effective_role};

/// Status emitted for every component; Canonical/Variant assignment is
/// layered on top of this engine by the caller.
pub const STATUS_UNKNOWN: &str = "Unknown";

/// A de-duplicated UI component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Effective ARIA role of the representative record.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub source: String,
    pub captures_count: usize,
}

/// How a group's representative record is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentativePolicy {
    /// First record in input order. Display fields may change if the
    /// upstream store reorders records.
    #[default]
    FirstSeen,
    /// Record with the lexicographically smallest id, independent of order.
    SmallestId,
}

/// Aggregate records into components using first-seen representatives.
pub fn aggregate_components(records: &[EvidenceRecord]) -> Vec<Component> {
    aggregate_components_with(records, RepresentativePolicy::FirstSeen)
}

/// Aggregate records into components with an explicit representative policy.
pub fn aggregate_components_with(
    records: &[EvidenceRecord],
    policy: RepresentativePolicy,
) -> Vec<Component> {
    let groups = group_by_component(records);

    let mut components: Vec<Component> = groups
        .into_iter()
        .map(|(id, members)| {
            let rep = pick_representative(&members, policy);
            Component {
                id,
                name: display_name(rep),
                category: infer_category(rep),
                kind: effective_role(rep),
                status: STATUS_UNKNOWN.to_string(),
                source: page_label(&rep.url),
                captures_count: members.len(),
            }
        })
        .collect();

    components.sort_by(compare_components);

    debug!(
        records = records.len(),
        components = components.len(),
        "aggregated components"
    );
    components
}

/// Group records by component id, preserving first-encounter order of
/// both groups and members.
pub(crate) fn group_by_component(records: &[EvidenceRecord]) -> Vec<(String, Vec<&EvidenceRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&EvidenceRecord>)> = Vec::new();

    for record in records {
        let id = component_id(record);
        match index.get(&id) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(id.clone(), groups.len());
                groups.push((id, vec![record]));
            }
        }
    }
    groups
}

fn pick_representative<'a>(
    members: &[&'a EvidenceRecord],
    policy: RepresentativePolicy,
) -> &'a EvidenceRecord {
    // Groups are never empty: each one is created by pushing a record.
    match policy {
        RepresentativePolicy::FirstSeen => members[0],
        RepresentativePolicy::SmallestId => members
            .iter()
            .copied()
            .min_by(|a, b| a.id.cmp(&b.id))
            .unwrap_or(members[0]),
    }
}

/// Accessible name, else text preview, else `"tag (role)"` / `"tag"`.
///
/// Surrounding whitespace is trimmed for display; the signature still sees
/// the raw text.
pub fn display_name(record: &EvidenceRecord) -> String {
    if let Some(text) = record.display_text().map(str::trim).filter(|t| !t.is_empty()) {
        return text.to_string();
    }
    let tag = record.tag_name.to_lowercase();
    match record.explicit_role() {
        Some(role) => format!("{tag} ({role})"),
        None => tag,
    }
}

/// Ordering used for component lists everywhere in the engine.
pub(crate) fn compare_components(a: &Component, b: &Component) -> Ordering {
    b.captures_count
        .cmp(&a.captures_count)
        .then_with(|| locale_cmp(&a.name, &b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive comparison with a code-point tie-break, approximating
/// a root-locale collation for display names.
///
/// Only case is folded. Accents are not, so `"éclair"` sorts after
/// `"zebra"` where a full collation would place it beside `"eclair"`.
/// Ordering is still total and deterministic, which is all export
/// stability needs.
pub(crate) fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
