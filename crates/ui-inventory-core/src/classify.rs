//! Classification helpers shared by the aggregators and resolvers.
//!
//! All functions here are total: unknown inputs map to a fallback label
//! (`"Layout"`, `"Unknown"`, `"unknown"`, or the `"—"` sentinel) rather
//! than an error.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{EvidenceRecord, StyleSources, SENTINEL};

/// Matches `var(--name)`, capturing `name`.
static CSS_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var\(\s*--([A-Za-z0-9_-]+)").expect("static regex"));

/// Source label used when a style is backed by a CSS custom property.
pub const DESIGN_SYSTEM_SOURCE: &str = "Design System";

/// Component taxonomy, checked in declaration order (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Actions,
    Forms,
    Navigation,
    Feedback,
    Media,
    Layout,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Actions => "Actions",
            Category::Forms => "Forms",
            Category::Navigation => "Navigation",
            Category::Feedback => "Feedback",
            Category::Media => "Media",
            Category::Layout => "Layout",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Infer a component category from tag and explicit role.
pub fn infer_category(record: &EvidenceRecord) -> Category {
    let tag = record.tag_name.to_ascii_lowercase();
    let role = record
        .explicit_role()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let (tag, role) = (tag.as_str(), role.as_str());

    if matches!(tag, "button" | "a") || matches!(role, "button" | "link") {
        Category::Actions
    } else if matches!(tag, "input" | "select" | "textarea")
        || matches!(role, "textbox" | "combobox" | "checkbox" | "radio")
    {
        Category::Forms
    } else if tag == "nav" || role == "navigation" {
        Category::Navigation
    } else if matches!(role, "alert" | "status") {
        Category::Feedback
    } else if matches!(tag, "img" | "video" | "svg") || role == "img" {
        Category::Media
    } else {
        Category::Layout
    }
}

/// Human page label for a capture URL.
///
/// Root path → `"Homepage"`, otherwise the first path segment with its
/// first letter capitalized. Unparseable URLs → `"Unknown"`.
pub fn page_label(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return "Unknown".to_string(),
    };
    match parsed.path().split('/').find(|segment| !segment.is_empty()) {
        Some(segment) => capitalize(segment),
        None => "Homepage".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First CSS custom property name found across all source values, in
/// declared order.
///
/// Never returns an empty string: a missing token is [`SENTINEL`].
pub fn extract_token(sources: Option<&StyleSources>) -> String {
    source_values(sources)
        .find_map(|value| CSS_VAR.captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// Whether any source value references a CSS custom property.
pub fn uses_design_token(sources: Option<&StyleSources>) -> bool {
    source_values(sources).any(|v| v.contains("var(--"))
}

/// `"Design System"` for token-backed values, else the URL page label.
pub fn style_source_label(sources: Option<&StyleSources>, url: &str) -> String {
    if uses_design_token(sources) {
        DESIGN_SYSTEM_SOURCE.to_string()
    } else {
        page_label(url)
    }
}

/// String source values in declared order; non-string values are skipped.
fn source_values(sources: Option<&StyleSources>) -> impl Iterator<Item = &str> {
    sources
        .into_iter()
        .flat_map(|map| map.values())
        .filter_map(|value| value.as_str())
}

/// Style kind of an atomic style fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Border,
    Color,
    Shadow,
    Spacing,
    Typography,
    Unknown,
}

impl StyleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKind::Border => "border",
            StyleKind::Color => "color",
            StyleKind::Shadow => "shadow",
            StyleKind::Spacing => "spacing",
            StyleKind::Typography => "typography",
            StyleKind::Unknown => "unknown",
        }
    }

    /// Parse a kind name; unrecognized names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "border" => Some(StyleKind::Border),
            "color" => Some(StyleKind::Color),
            "shadow" => Some(StyleKind::Shadow),
            "spacing" => Some(StyleKind::Spacing),
            "typography" => Some(StyleKind::Typography),
            "unknown" => Some(StyleKind::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a style property key (case-insensitive).
pub fn infer_style_kind(key: &str) -> StyleKind {
    let key = key.to_ascii_lowercase();
    match key.as_str() {
        "backgroundcolor" | "color" | "bordercolor" => StyleKind::Color,
        "fontsize" | "fontweight" | "fontfamily" | "lineheight" => StyleKind::Typography,
        "boxshadow" => StyleKind::Shadow,
        k if k.starts_with("padding") || k.starts_with("margin") => StyleKind::Spacing,
        k if k.starts_with("radius") => StyleKind::Border,
        _ => StyleKind::Unknown,
    }
}
