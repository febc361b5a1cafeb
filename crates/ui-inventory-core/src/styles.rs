//! Style fact extraction and exact-match style aggregation.
//!
//! Each record is flattened into a fixed list of atomic [`StyleFact`]s.
//! The list is enumerated, not data-driven: only the properties below are
//! reported, in this order.
//!
//! | Property | Emitted |
//! |----------|---------|
//! | `backgroundColor`, `color` | always |
//! | `borderColor` | if captured |
//! | `paddingTop/Right/Bottom/Left` | always |
//! | `fontFamily`, `fontSize`, `fontWeight`, `lineHeight` | if typography captured |
//! | `boxShadow` | always |
//! | `radiusTopLeft/TopRight/BottomRight/BottomLeft` | if radius captured |
//!
//! Facts are grouped by exact `kind|value` string equality. There is no
//! numeric tolerance here; approximate grouping lives in [`crate::buckets`].
//!
//! A group's token and source label are chosen from all of its facts, so
//! style ids do not depend on input order:
//!
//! - token: the lexicographically smallest declared token, else `"—"`;
//! - source: `"Design System"` if any fact is token-backed, else the most
//!   common page label (ties go to the smallest label).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{
    extract_token, infer_style_kind, page_label, uses_design_token, StyleKind,
    DESIGN_SYSTEM_SOURCE,
};
use crate::hash::{stable_id, IdKind};
use crate::models::{EvidenceRecord, StyleSources, SENTINEL};

/// One `(record, property)` observation.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFact<'a> {
    pub property: &'static str,
    pub kind: StyleKind,
    pub value: &'a str,
    pub token: String,
    pub sources: Option<&'a StyleSources>,
    pub url: &'a str,
}

/// A de-duplicated style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: String,
    /// CSS custom property name, or `"—"` when none was declared.
    pub token: String,
    pub value: String,
    pub kind: StyleKind,
    pub usage_count: usize,
    pub source: String,
}

/// `(property, value)` pairs of one record, in extraction order.
pub fn style_properties(record: &EvidenceRecord) -> Vec<(&'static str, &str)> {
    let p = record.primitives();
    let mut props: Vec<(&'static str, &str)> = Vec::with_capacity(16);

    props.push(("backgroundColor", p.background_color.raw.as_str()));
    props.push(("color", p.color.raw.as_str()));
    if let Some(border) = &p.border_color {
        props.push(("borderColor", border.raw.as_str()));
    }

    props.push(("paddingTop", p.spacing.padding_top.as_str()));
    props.push(("paddingRight", p.spacing.padding_right.as_str()));
    props.push(("paddingBottom", p.spacing.padding_bottom.as_str()));
    props.push(("paddingLeft", p.spacing.padding_left.as_str()));

    if let Some(t) = &p.typography {
        props.push(("fontFamily", t.font_family.as_str()));
        props.push(("fontSize", t.font_size.as_str()));
        props.push(("fontWeight", t.font_weight.as_str()));
        props.push(("lineHeight", t.line_height.as_str()));
    }

    props.push(("boxShadow", p.shadow.raw.as_str()));

    if let Some(r) = &p.radius {
        props.push(("radiusTopLeft", r.top_left.as_str()));
        props.push(("radiusTopRight", r.top_right.as_str()));
        props.push(("radiusBottomRight", r.bottom_right.as_str()));
        props.push(("radiusBottomLeft", r.bottom_left.as_str()));
    }

    props
}

/// Flatten one record into style facts.
pub fn extract_style_facts(record: &EvidenceRecord) -> Vec<StyleFact<'_>> {
    let sources = record.primitives().sources.as_ref();
    let token = extract_token(sources);

    style_properties(record)
        .into_iter()
        .map(|(property, value)| StyleFact {
            property,
            kind: infer_style_kind(property),
            value,
            token: token.clone(),
            sources,
            url: &record.url,
        })
        .collect()
}

/// Whether `record` carries a fact with this exact kind and value.
pub fn record_has_style(record: &EvidenceRecord, kind: StyleKind, value: &str) -> bool {
    style_properties(record)
        .into_iter()
        .any(|(property, v)| v == value && infer_style_kind(property) == kind)
}

/// Aggregate all records' style facts into exact-match styles.
pub fn aggregate_styles(records: &[EvidenceRecord]) -> Vec<Style> {
    let mut index: HashMap<(StyleKind, &str), usize> = HashMap::new();
    let mut groups: Vec<StyleGroup<'_>> = Vec::new();
    let mut fact_count = 0usize;

    for record in records {
        for fact in extract_style_facts(record) {
            fact_count += 1;
            let key = (fact.kind, fact.value);
            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    index.insert(key, groups.len());
                    groups.push(StyleGroup::new(fact.kind, fact.value));
                    groups.len() - 1
                }
            };
            groups[slot].add(&fact);
        }
    }

    let mut styles: Vec<Style> = groups.into_iter().map(StyleGroup::into_style).collect();

    styles.sort_by(|a, b| {
        b.usage_count
            .cmp(&a.usage_count)
            .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
            .then_with(|| a.value.cmp(&b.value))
    });

    debug!(
        records = records.len(),
        facts = fact_count,
        styles = styles.len(),
        "aggregated styles"
    );
    styles
}

/// Facts sharing one `kind|value`, reduced without regard to their order.
struct StyleGroup<'a> {
    kind: StyleKind,
    value: &'a str,
    count: usize,
    token: Option<String>,
    design_system: bool,
    labels: BTreeMap<String, usize>,
}

impl<'a> StyleGroup<'a> {
    fn new(kind: StyleKind, value: &'a str) -> Self {
        Self {
            kind,
            value,
            count: 0,
            token: None,
            design_system: false,
            labels: BTreeMap::new(),
        }
    }

    fn add(&mut self, fact: &StyleFact<'a>) {
        self.count += 1;
        if fact.token != SENTINEL
            && self.token.as_deref().map_or(true, |t| fact.token.as_str() < t)
        {
            self.token = Some(fact.token.clone());
        }
        if uses_design_token(fact.sources) {
            self.design_system = true;
        } else if !self.design_system {
            *self.labels.entry(page_label(fact.url)).or_insert(0) += 1;
        }
    }

    fn into_style(self) -> Style {
        let token = self.token.unwrap_or_else(|| SENTINEL.to_string());
        let source = if self.design_system {
            DESIGN_SYSTEM_SOURCE.to_string()
        } else {
            self.labels
                .into_iter()
                .max_by(|(la, na), (lb, nb)| na.cmp(nb).then_with(|| lb.cmp(la)))
                .map(|(label, _)| label)
                .unwrap_or_else(|| SENTINEL.to_string())
        };
        Style {
            id: style_id(self.kind, &token, self.value),
            token,
            value: self.value.to_string(),
            kind: self.kind,
            usage_count: self.count,
            source,
        }
    }
}

/// `style_` id from kind, token and value.
pub fn style_id(kind: StyleKind, token: &str, value: &str) -> String {
    stable_id(IdKind::Style, &format!("{}|{}|{}", kind.as_str(), token, value))
}
