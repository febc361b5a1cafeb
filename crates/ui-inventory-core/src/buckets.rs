//! Bucketed variant engine.
//!
//! An exploratory grouping mode that quantizes continuous style values so
//! near-duplicates share a key. It is advisory only: the canonical style
//! inventory in [`crate::styles`] always uses exact matching.
//!
//! # Quantization
//!
//! | Input | Bucket |
//! |-------|--------|
//! | `"Npx"` | nearest multiple of 4 (non-numeric → `0`) |
//! | RGB channel | nearest multiple of 16, clamped to 240 |
//! | alpha | nearest 0.1 |
//! | shadow | `shadow<layers>`, or `noshadow` when absent / `none` |
//!
//! Rounding is half-to-even, so `10px` → `8` and channel `8` → `0`.
//!
//! # Group keys
//!
//! Keys are `::`-joined segments. Identity segments come first
//! (`tag::name`, `tag::role::name`), then for [`GroupingMode::Full`] the
//! bucketed primitives as `prefix=value` segments:
//!
//! ```text
//! button::button::save::p=8,16,8,16::bg=16,112,208,1.0::bd=none::c=240,240,240,1.0::sh=noshadow
//! ```
//!
//! [`explain`] reverses a key into a readable structure without looking
//! at any record.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ColorPrimitive, EvidenceRecord, ShadowPrimitive};
use crate::signature::effective_role;

static EDGE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{P}\s]+|[\p{P}\s]+$").expect("static regex"));
static INNER_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

const SEGMENT_SEP: &str = "::";
const NO_COLOR: &str = "none";
const NO_SHADOW: &str = "noshadow";

/// Grouping granularity, from loosest to most specific.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Tag + normalized name.
    Name,
    /// Tag + role + normalized name.
    #[default]
    Role,
    /// Tag + role + normalized name + bucketed primitives.
    Full,
}

impl GroupingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupingMode::Name => "name",
            GroupingMode::Role => "role",
            GroupingMode::Full => "full",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(GroupingMode::Name),
            "role" => Some(GroupingMode::Role),
            "full" => Some(GroupingMode::Full),
            _ => None,
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Round a `"Npx"` value to the nearest multiple of 4.
pub fn bucket_px(value: Option<&str>) -> i64 {
    let Some(raw) = value else {
        return 0;
    };
    let number = raw.trim().trim_end_matches("px").trim();
    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => ((n / 4.0).round_ties_even() * 4.0) as i64,
        _ => 0,
    }
}

/// Round one RGB channel to the nearest multiple of 16, clamped to 240.
pub fn bucket_channel(channel: f64) -> u8 {
    let rounded = (channel / 16.0).round_ties_even() * 16.0;
    rounded.clamp(0.0, 240.0) as u8
}

/// Round alpha to the nearest 0.1.
pub fn bucket_alpha(alpha: f64) -> f64 {
    ((alpha * 10.0).round_ties_even() / 10.0).clamp(0.0, 1.0)
}

/// `"r,g,b,a"` bucket of a parsed color, or `"none"` when unparsed.
pub fn bucket_color(color: Option<&ColorPrimitive>) -> String {
    match color.and_then(|c| c.value) {
        Some(v) => format!(
            "{},{},{},{:.1}",
            bucket_channel(v.r),
            bucket_channel(v.g),
            bucket_channel(v.b),
            bucket_alpha(v.a)
        ),
        None => NO_COLOR.to_string(),
    }
}

/// Shadow reduced to presence plus layer count.
pub fn bucket_shadow(shadow: &ShadowPrimitive) -> String {
    let raw = shadow.raw.trim();
    if !shadow.is_present || raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        NO_SHADOW.to_string()
    } else {
        format!("shadow{}", shadow.layer_count.unwrap_or(1))
    }
}

/// Lowercase, trim, collapse whitespace, strip edge punctuation.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let collapsed = INNER_WHITESPACE.replace_all(lowered.trim(), " ");
    EDGE_PUNCTUATION.replace_all(&collapsed, "").into_owned()
}

/// Normalized name as it appears in a key: `::` collapsed so segments stay
/// unambiguous.
fn key_name(record: &EvidenceRecord) -> String {
    let mut name = normalize_name(record.display_text().unwrap_or(""));
    while name.contains(SEGMENT_SEP) {
        name = name.replace(SEGMENT_SEP, ":");
    }
    name
}

/// Full bucketed style fingerprint of a record.
pub fn bucket_fingerprint(record: &EvidenceRecord) -> String {
    let p = record.primitives();
    let padding: Vec<String> = p
        .spacing
        .sides()
        .iter()
        .map(|side| bucket_px(Some(*side)).to_string())
        .collect();

    [
        format!("p={}", padding.join(",")),
        format!("bg={}", bucket_color(Some(&p.background_color))),
        format!("bd={}", bucket_color(p.border_color.as_ref())),
        format!("c={}", bucket_color(Some(&p.color))),
        format!("sh={}", bucket_shadow(&p.shadow)),
    ]
    .join(SEGMENT_SEP)
}

/// Group key of `record` under `mode`.
pub fn group_key(record: &EvidenceRecord, mode: GroupingMode) -> String {
    let tag = record.tag_name.to_lowercase();
    let name = key_name(record);
    match mode {
        GroupingMode::Name => [tag, name].join(SEGMENT_SEP),
        GroupingMode::Role => [tag, effective_role(record), name].join(SEGMENT_SEP),
        GroupingMode::Full => [
            tag,
            effective_role(record),
            name,
            bucket_fingerprint(record),
        ]
        .join(SEGMENT_SEP),
    }
}


/// Records sharing one group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketGroup {
    pub key: String,
    pub member_ids: Vec<String>,
}

impl BucketGroup {
    pub fn count(&self) -> usize {
        self.member_ids.len()
    }
}

/// Group records by key. Sorted by member count (desc), then key (asc).
pub fn group_records(records: &[EvidenceRecord], mode: GroupingMode) -> Vec<BucketGroup> {
    let mut clusters = cluster(records.iter(), |r| group_key(r, mode));
    sort_clusters(&mut clusters);
    debug!(
        mode = mode.as_str(),
        records = records.len(),
        groups = clusters.len(),
        "bucketed records"
    );
    clusters
        .into_iter()
        .map(|(key, member_ids)| BucketGroup { key, member_ids })
        .collect()
}

/// Members of the group `key` under `mode`; empty if no record maps to it.
pub fn group_members<'a>(
    records: &'a [EvidenceRecord],
    mode: GroupingMode,
    key: &str,
) -> Vec<&'a EvidenceRecord> {
    records
        .iter()
        .filter(|r| group_key(r, mode) == key)
        .collect()
}

/// Members of a group sharing one bucketed fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// 1-based display index in sorted order.
    pub index: usize,
    pub fingerprint: String,
    pub member_ids: Vec<String>,
}

/// Cluster group members by full fingerprint, whatever mode formed the group.
///
/// Sorted by member count (desc), then fingerprint (asc); indices are
/// assigned after sorting.
pub fn variants(members: &[&EvidenceRecord]) -> Vec<Variant> {
    let mut clusters = cluster(members.iter().copied(), bucket_fingerprint);
    sort_clusters(&mut clusters);
    clusters
        .into_iter()
        .enumerate()
        .map(|(i, (fingerprint, member_ids))| Variant {
            index: i + 1,
            fingerprint,
            member_ids,
        })
        .collect()
}

/// `(key, member ids)` in first-encounter order.
fn cluster<'a, I, F>(records: I, key_of: F) -> Vec<(String, Vec<String>)>
where
    I: Iterator<Item = &'a EvidenceRecord>,
    F: Fn(&EvidenceRecord) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut clusters: Vec<(String, Vec<String>)> = Vec::new();
    for record in records {
        let key = key_of(record);
        match index.get(&key) {
            Some(&slot) => clusters[slot].1.push(record.id.clone()),
            None => {
                index.insert(key.clone(), clusters.len());
                clusters.push((key, vec![record.id.clone()]));
            }
        }
    }
    clusters
}

fn sort_clusters(clusters: &mut [(String, Vec<String>)]) {
    clusters.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
}

/// Readable breakdown of a group key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupExplanation {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

impl GroupExplanation {
    /// Mode that produced the key, judged from which parts are present.
    pub fn mode(&self) -> GroupingMode {
        if self.padding.is_some()
            || self.background.is_some()
            || self.border.is_some()
            || self.text_color.is_some()
            || self.shadow.is_some()
        {
            GroupingMode::Full
        } else if self.role.is_some() {
            GroupingMode::Role
        } else {
            GroupingMode::Name
        }
    }

    /// One `label: value` line per present part.
    pub fn lines(&self) -> Vec<String> {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        let mut lines = vec![format!("tag: {}", self.tag)];
        if let Some(role) = &self.role {
            lines.push(format!("role: {role}"));
        }
        lines.push(format!("name: {name}"));
        let parts = [
            ("padding", &self.padding),
            ("background", &self.background),
            ("border", &self.border),
            ("text color", &self.text_color),
            ("shadow", &self.shadow),
        ];
        for (label, value) in parts {
            if let Some(value) = value {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines
    }
}

/// Reverse-parse a group key into its parts, using only the key text.
///
/// Parsing is positional. Names never contain `::`, so a key has two
/// segments in name mode, three in role mode, and eight in full mode
/// (three identity segments followed by the five bucket segments in fixed
/// order). A name that happens to look like a bucket segment, such as
/// `p=3`, is still read as a name.
pub fn explain(key: &str) -> GroupExplanation {
    let segments: Vec<&str> = key.split(SEGMENT_SEP).collect();
    let mut out = GroupExplanation {
        tag: segments[0].to_string(),
        ..GroupExplanation::default()
    };

    match segments.as_slice() {
        [_] => {}
        [_, name] => out.name = name.to_string(),
        [_, role, name, p, bg, bd, c, sh] if has_bucket_prefixes([p, bg, bd, c, sh]) => {
            out.role = Some(role.to_string());
            out.name = name.to_string();
            out.padding = bucket_value(p).map(describe_padding);
            out.background = bucket_value(bg).map(describe_color);
            out.border = bucket_value(bd).map(describe_color);
            out.text_color = bucket_value(c).map(describe_color);
            out.shadow = bucket_value(sh).map(describe_shadow);
        }
        [_, role, rest @ ..] => {
            out.role = Some(role.to_string());
            out.name = rest.join(SEGMENT_SEP);
        }
        [] => {}
    }
    out
}

const BUCKET_PREFIXES: [&str; 5] = ["p", "bg", "bd", "c", "sh"];

fn has_bucket_prefixes(segments: [&&str; 5]) -> bool {
    segments
        .iter()
        .zip(BUCKET_PREFIXES)
        .all(|(segment, prefix)| segment.split_once('=').map(|(p, _)| p) == Some(prefix))
}

fn bucket_value(segment: &str) -> Option<&str> {
    segment.split_once('=').map(|(_, value)| value)
}

fn describe_padding(value: &str) -> String {
    format!("{}px (top/right/bottom/left, ±2px)", value.replace(',', "/"))
}

fn describe_color(value: &str) -> String {
    if value == NO_COLOR {
        return "not captured".to_string();
    }
    let channels: Vec<&str> = value.split(',').collect();
    match channels.as_slice() {
        [r, g, b, a] => format!("rgba({r}, {g}, {b}, {a}) bucket"),
        _ => value.to_string(),
    }
}

fn describe_shadow(value: &str) -> String {
    if value == NO_SHADOW {
        return "none".to_string();
    }
    match value.strip_prefix("shadow").and_then(|n| n.parse::<u32>().ok()) {
        Some(1) => "present, 1 layer".to_string(),
        Some(n) => format!("present, {n} layers"),
        None => value.to_string(),
    }
}
