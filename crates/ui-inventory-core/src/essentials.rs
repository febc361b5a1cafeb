//! Visual essentials: a sectioned, human-readable property table for one
//! capture.
//!
//! Sections are emitted in a fixed order: Text, Surface, Spacing, State.
//! Values that were not captured render as `"—"`, never as blank.

use serde::{Deserialize, Serialize};

use crate::models::{EvidenceRecord, SENTINEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Text,
    Surface,
    Spacing,
    State,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssentialRow {
    pub section: Section,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEssentials {
    pub rows: Vec<EssentialRow>,
    pub derived_from_capture_id: Option<String>,
}

/// Collapse four sides the way CSS shorthand does.
///
/// All equal → one value; top/bottom and left/right pairs equal → two
/// values; otherwise all four in top/right/bottom/left order.
pub fn format_4_sided(top: &str, right: &str, bottom: &str, left: &str) -> String {
    if top == right && right == bottom && bottom == left {
        top.to_string()
    } else if top == bottom && right == left {
        format!("{top} {right}")
    } else {
        format!("{top} {right} {bottom} {left}")
    }
}

/// Derive the essentials table for `record`; `None` gives an empty table.
pub fn derive_visual_essentials(record: Option<&EvidenceRecord>) -> VisualEssentials {
    let Some(record) = record else {
        return VisualEssentials::default();
    };
    let p = record.primitives();
    let mut rows = Vec::new();
    let mut push = |section: Section, label: &str, value: &str| {
        rows.push(EssentialRow {
            section,
            label: label.to_string(),
            value: if value.trim().is_empty() {
                SENTINEL.to_string()
            } else {
                value.to_string()
            },
        });
    };

    push(Section::Text, "Text color", &p.color.raw);
    if let Some(t) = &p.typography {
        push(Section::Text, "Font family", &t.font_family);
        push(Section::Text, "Font size", &t.font_size);
        push(Section::Text, "Font weight", &t.font_weight);
        push(Section::Text, "Line height", &t.line_height);
    }

    push(Section::Surface, "Background", &p.background_color.raw);
    if let Some(border) = &p.border_color {
        push(Section::Surface, "Border color", &border.raw);
    }
    let radius = p
        .radius
        .as_ref()
        .map(|r| format_4_sided(&r.top_left, &r.top_right, &r.bottom_right, &r.bottom_left))
        .unwrap_or_else(|| SENTINEL.to_string());
    push(Section::Surface, "Radius", &radius);
    push(
        Section::Surface,
        "Shadow",
        if p.shadow.is_present { "Yes" } else { SENTINEL },
    );

    let s = &p.spacing;
    push(
        Section::Spacing,
        "Padding",
        &format_4_sided(&s.padding_top, &s.padding_right, &s.padding_bottom, &s.padding_left),
    );

    let disabled = record
        .state
        .as_ref()
        .and_then(|st| st.disabled.or(st.aria_disabled));
    let disabled = match disabled {
        Some(true) => "true",
        Some(false) => "false",
        None => SENTINEL,
    };
    push(Section::State, "Disabled", disabled);

    VisualEssentials {
        rows,
        derived_from_capture_id: Some(record.id.clone()),
    }
}
