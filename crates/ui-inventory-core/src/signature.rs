//! Component signatures.
//!
//! A signature is the normalized element identity plus a fixed subset of
//! style values:
//!
//! ```text
//! tag | role | name | bg:<raw> | bd:<raw> | br:<tl,tr,br,bl> | pd:<t,r,b,l> | c:<raw>
//! ```
//!
//! Two records with identical signatures are the same Component. The
//! signature depends on one record only, never on traversal order.

use crate::hash::{stable_id, IdKind};
use crate::models::{EvidenceRecord, SENTINEL};

/// ARIA role implied by an HTML tag when no explicit role was captured.
pub fn infer_role(tag_name: &str) -> &'static str {
    match tag_name.to_ascii_lowercase().as_str() {
        "button" => "button",
        "a" => "link",
        "input" => "textbox",
        "textarea" => "textbox",
        "select" => "combobox",
        "nav" => "navigation",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "img" => "img",
        "ul" | "ol" => "list",
        "li" => "listitem",
        "table" => "table",
        "form" => "form",
        "header" => "banner",
        "footer" => "contentinfo",
        "main" => "main",
        "aside" => "complementary",
        "dialog" => "dialog",
        _ => "generic",
    }
}

/// Explicit role if captured, else the tag's implied role.
pub fn effective_role(record: &EvidenceRecord) -> String {
    match record.explicit_role() {
        Some(role) => role.to_string(),
        None => infer_role(&record.tag_name).to_string(),
    }
}

/// Build the grouping signature of one record.
pub fn build_signature(record: &EvidenceRecord) -> String {
    let p = record.primitives();

    let tag = record.tag_name.to_lowercase();
    let role = effective_role(record);
    let name = record.display_text().unwrap_or("");

    let bg = or_sentinel(&p.background_color.raw);
    let bd = p
        .border_color
        .as_ref()
        .map(|c| or_sentinel(&c.raw))
        .unwrap_or(SENTINEL);
    let br = p
        .radius
        .as_ref()
        .map(|r| r.corners().join(","))
        .unwrap_or_else(|| SENTINEL.to_string());
    let pd = p.spacing.sides().join(",");
    let c = or_sentinel(&p.color.raw);

    format!("{tag}|{role}|{name}|bg:{bg}|bd:{bd}|br:{br}|pd:{pd}|c:{c}")
}

/// `comp_` id of the record's signature.
pub fn component_id(record: &EvidenceRecord) -> String {
    stable_id(IdKind::Component, &build_signature(record))
}

fn or_sentinel(raw: &str) -> &str {
    if raw.is_empty() {
        SENTINEL
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn test_signature_layout() {
        let rec = fixtures::record("a", "https://x.test/");
        assert_eq!(
            build_signature(&rec),
            "button|button|Save|bg:#1976D2|bd:—|br:—|pd:8px,8px,8px,8px|c:#FFFFFF"
        );
    }

    #[test]
    fn test_name_is_hashed_raw() {
        let mut rec = fixtures::record("a", "https://x.test/");
        rec.accessible_name = Some(" Save ".to_string());
        assert!(build_signature(&rec).starts_with("button|button| Save |bg:"));

        rec.accessible_name = Some(String::new());
        rec.text_preview = Some("Save".to_string());
        assert!(build_signature(&rec).starts_with("button|button|Save|bg:"));
    }

    #[test]
    fn test_tag_lowercased_and_role_inferred() {
        let mut rec = fixtures::record("a", "https://x.test/");
        rec.tag_name = "A".to_string();
        rec.role = None;
        rec.accessible_name = None;
        let sig = build_signature(&rec);
        assert!(sig.starts_with("a|link||bg:"), "got {sig}");
    }

    #[test]
    fn test_radius_and_border_included() {
        let mut rec = fixtures::record("a", "https://x.test/");
        rec.styles.primitives.radius = Some(fixtures::radius("4px"));
        rec.styles.primitives.border_color = Some(fixtures::color("#000"));
        let sig = build_signature(&rec);
        assert!(sig.contains("|bd:#000|"));
        assert!(sig.contains("|br:4px,4px,4px,4px|"));
    }

    #[test]
    fn test_id_ignores_record_identity() {
        let a = fixtures::record("a", "https://x.test/");
        let b = fixtures::record("b", "https://x.test/settings");
        assert_eq!(component_id(&a), component_id(&b));
    }

    #[test]
    fn test_infer_role_table() {
        assert_eq!(infer_role("nav"), "navigation");
        assert_eq!(infer_role("H3"), "heading");
        assert_eq!(infer_role("input"), "textbox");
        assert_eq!(infer_role("section"), "generic");
    }
}
