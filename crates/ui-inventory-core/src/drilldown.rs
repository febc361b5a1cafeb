//! Drill-down resolvers.
//!
//! Each resolver re-scans the full evidence set against an id derived
//! earlier by [`crate::components`] or [`crate::styles`]. Nothing is
//! cached; an unknown id yields an empty list.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classify::{page_label, Category};
use crate::components::{compare_components, Component};
use crate::hash::{stable_id, IdKind};
use crate::models::EvidenceRecord;
use crate::signature::component_id;
use crate::styles::{record_has_style, Style};

/// Maximum number of entries returned by [`related_components`].
pub const RELATED_COMPONENTS_LIMIT: usize = 12;

/// One capture belonging to a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCapture {
    pub id: String,
    pub url: String,
    pub source_label: String,
    pub screenshot_blob_id: Option<String>,
}

/// A page on which a style appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleLocation {
    pub id: String,
    pub source_label: String,
    pub url: String,
    /// Number of records on this page carrying the style.
    pub uses: usize,
    /// Record used for the location thumbnail.
    pub representative_capture_id: String,
    pub screenshot_blob_id: Option<String>,
}

/// A component that uses a given style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedComponent {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub captures_count: usize,
}

/// Captures whose signature hashes to `component_id`.
///
/// Sorted by source label, then URL.
pub fn component_captures(target_id: &str, records: &[EvidenceRecord]) -> Vec<ComponentCapture> {
    let mut captures: Vec<ComponentCapture> = records
        .iter()
        .filter(|r| component_id(r) == target_id)
        .map(|r| ComponentCapture {
            id: r.id.clone(),
            url: r.url.clone(),
            source_label: page_label(&r.url),
            screenshot_blob_id: r.screenshot_blob_id.clone(),
        })
        .collect();

    if captures.is_empty() {
        trace!(component_id = target_id, "no captures for component");
    }

    captures.sort_by(|a, b| {
        a.source_label
            .cmp(&b.source_label)
            .then_with(|| a.url.cmp(&b.url))
    });
    captures
}

/// Pages on which the style `style_id` appears.
///
/// Matching records are grouped by `(source label, url)`. Sorted by
/// `uses` (desc), then source label (asc).
pub fn style_locations(
    target_id: &str,
    records: &[EvidenceRecord],
    styles: &[Style],
) -> Vec<StyleLocation> {
    let Some(style) = styles.iter().find(|s| s.id == target_id) else {
        trace!(style_id = target_id, "style not found");
        return Vec::new();
    };

    let mut index: HashMap<(String, &str), usize> = HashMap::new();
    let mut locations: Vec<StyleLocation> = Vec::new();

    for record in records
        .iter()
        .filter(|r| record_has_style(r, style.kind, &style.value))
    {
        let label = page_label(&record.url);
        let key = (label.clone(), record.url.as_str());
        match index.get(&key) {
            Some(&slot) => locations[slot].uses += 1,
            None => {
                index.insert(key, locations.len());
                locations.push(StyleLocation {
                    id: stable_id(IdKind::Location, &format!("{}|{}", label, record.url)),
                    source_label: label,
                    url: record.url.clone(),
                    uses: 1,
                    representative_capture_id: record.id.clone(),
                    screenshot_blob_id: record.screenshot_blob_id.clone(),
                });
            }
        }
    }

    locations.sort_by(|a, b| {
        b.uses
            .cmp(&a.uses)
            .then_with(|| a.source_label.cmp(&b.source_label))
            .then_with(|| a.url.cmp(&b.url))
    });
    locations
}

/// Components whose records carry the style `style_id`, capped at
/// [`RELATED_COMPONENTS_LIMIT`].
pub fn related_components(
    target_id: &str,
    records: &[EvidenceRecord],
    components: &[Component],
    styles: &[Style],
) -> Vec<RelatedComponent> {
    let Some(style) = styles.iter().find(|s| s.id == target_id) else {
        trace!(style_id = target_id, "style not found");
        return Vec::new();
    };

    let matching: HashSet<String> = records
        .iter()
        .filter(|r| record_has_style(r, style.kind, &style.value))
        .map(component_id)
        .collect();

    let mut related: Vec<&Component> = components
        .iter()
        .filter(|c| matching.contains(&c.id))
        .collect();
    related.sort_by(|a, b| compare_components(a, b));
    related.truncate(RELATED_COMPONENTS_LIMIT);

    related
        .into_iter()
        .map(|c| RelatedComponent {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category,
            captures_count: c.captures_count,
        })
        .collect()
}
