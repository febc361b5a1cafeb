//! Evidence data model.
//!
//! These types mirror the JSON records written by the capture pipeline.
//! Records are immutable inputs: every engine function borrows them and
//! returns freshly allocated derived values.
//!
//! Wire names are camelCase to match the evidence store's serialization.
//! Every primitive that the capture pipeline may omit is an explicit
//! `Option` field so the style extractor knows exactly what can be absent.

use serde::{Deserialize, Serialize};

/// Property name → author-declared value, in the order the capture
/// pipeline wrote them. Token extraction depends on that order.
pub type StyleSources = serde_json::Map<String, serde_json::Value>;

/// One immutable capture of a UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<CaptureScope>,
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
    pub styles: CapturedStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ElementState>,
    /// Opaque blob id of the cropped screenshot, if one was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_blob_id: Option<String>,
    /// Absent on records captured before project scoping existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureScope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_landmark_role: Option<String>,
}

/// Interactive state flags observed at capture time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_disabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedStyles {
    pub primitives: StylePrimitives,
}

/// Computed style primitives of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePrimitives {
    pub spacing: Spacing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Sides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<Sides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Gap>,
    pub background_color: ColorPrimitive,
    pub color: ColorPrimitive,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorPrimitive>,
    pub shadow: ShadowPrimitive,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Radius>,
    /// Property name → author-declared value (e.g. `"var(--brand-primary)"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<StyleSources>,
}

/// Four-sided padding, always captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub padding_top: String,
    pub padding_right: String,
    pub padding_bottom: String,
    pub padding_left: String,
}

impl Spacing {
    /// Sides in top/right/bottom/left order.
    pub fn sides(&self) -> [&str; 4] {
        [
            &self.padding_top,
            &self.padding_right,
            &self.padding_bottom,
            &self.padding_left,
        ]
    }
}

/// Generic four-sided box value (margin, border width).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub row_gap: String,
    pub column_gap: String,
}

/// A captured color: the raw computed string plus optional parsed channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPrimitive {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Rgba>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowPrimitive {
    pub raw: String,
    pub is_present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub line_height: String,
}

/// Corner radii in top-left/top-right/bottom-right/bottom-left order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radius {
    pub top_left: String,
    pub top_right: String,
    pub bottom_right: String,
    pub bottom_left: String,
}

impl Radius {
    pub fn corners(&self) -> [&str; 4] {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_right,
            &self.bottom_left,
        ]
    }
}

impl EvidenceRecord {
    /// Shorthand for the style primitive bag.
    pub fn primitives(&self) -> &StylePrimitives {
        &self.styles.primitives
    }

    /// Explicit role, treating an empty string as absent.
    pub fn explicit_role(&self) -> Option<&str> {
        non_empty(self.role.as_deref())
    }

    /// Accessible name, else text preview, exactly as captured.
    ///
    /// Only `""` counts as absent; whitespace is kept so signatures hash
    /// the raw text.
    pub fn display_text(&self) -> Option<&str> {
        non_empty(self.accessible_name.as_deref()).or_else(|| non_empty(self.text_preview.as_deref()))
    }
}

/// `Some(s)` unless `s` is missing or `""`.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Placeholder rendered wherever a value is unknown or absent.
pub const SENTINEL: &str = "—";
