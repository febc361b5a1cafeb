//! End-to-end derivation properties over realistic evidence sets.

use std::collections::{BTreeMap, BTreeSet};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use ui_inventory_core::buckets::{bucket_px, explain, group_key, group_records, GroupingMode};
use ui_inventory_core::classify::{extract_token, StyleKind};
use ui_inventory_core::components::aggregate_components;
use ui_inventory_core::drilldown::{component_captures, related_components, style_locations};
use ui_inventory_core::essentials::format_4_sided;
use ui_inventory_core::models::{EvidenceRecord, StyleSources};
use ui_inventory_core::signature::component_id;
use ui_inventory_core::styles::aggregate_styles;

fn record(id: &str, url: &str, name: &str, bg: &str) -> EvidenceRecord {
    serde_json::from_value(json!({
        "id": id,
        "url": url,
        "tagName": "button",
        "role": "button",
        "accessibleName": name,
        "styles": { "primitives": {
            "spacing": { "paddingTop": "8px", "paddingRight": "16px",
                         "paddingBottom": "8px", "paddingLeft": "16px" },
            "backgroundColor": { "raw": bg },
            "color": { "raw": "#000000" },
            "radius": { "topLeft": "4px", "topRight": "4px",
                        "bottomRight": "4px", "bottomLeft": "4px" },
            "shadow": { "raw": "none", "isPresent": false }
        } }
    }))
    .expect("valid evidence record")
}

fn with_sources(mut record: EvidenceRecord, sources: serde_json::Value) -> EvidenceRecord {
    let map: StyleSources = serde_json::from_value(sources).expect("sources object");
    record.styles.primitives.sources = Some(map);
    record
}

/// Shared values carried by records with different tokens, and by
/// records with none, on several pages.
fn mixed_evidence() -> Vec<EvidenceRecord> {
    vec![
        with_sources(
            record("e1", "https://shop.test/", "Save", "#1976D2"),
            json!({ "color": "var(--text)", "backgroundColor": "var(--brand)" }),
        ),
        record("e2", "https://shop.test/cart", "Save", "#1976D2"),
        with_sources(
            record("e3", "https://shop.test/cart", "Checkout", "#1976D2"),
            json!({ "backgroundColor": "var(--accent)" }),
        ),
        record("e4", "https://shop.test/account", "Cancel", "#FFFFFF"),
        record("e5", "not a url", "Cancel", "#FFFFFF"),
        with_sources(
            record("e6", "https://shop.test/help", "Help", "#EEEEEE"),
            json!({ "paddingTop": "12px" }),
        ),
        record("e7", "https://shop.test/help", "Help", "#EEEEEE"),
    ]
}

#[test]
fn component_grouping_scenario() {
    let records = vec![
        record("a", "https://x.test/", "Save", "#1976D2"),
        record("b", "https://x.test/", "Save", "#1976D2"),
    ];
    let components = aggregate_components(&records);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].captures_count, 2);
}

#[test]
fn style_grouping_scenario() {
    let records = vec![
        record("a", "https://x.test/", "One", "#1976D2"),
        record("b", "https://x.test/", "Two", "#1976D2"),
        record("c", "https://x.test/", "Three", "#1976D2"),
        record("d", "https://x.test/", "Four", "#FFFFFF"),
        record("e", "https://x.test/", "Five", "#FFFFFF"),
    ];
    let styles = aggregate_styles(&records);
    let backgrounds: Vec<(&str, usize)> = styles
        .iter()
        .filter(|s| s.kind == StyleKind::Color && s.value != "#000000")
        .map(|s| (s.value.as_str(), s.usage_count))
        .collect();
    assert_eq!(backgrounds, vec![("#1976D2", 3), ("#FFFFFF", 2)]);
}

#[test]
fn url_fallback_scenario() {
    let records = vec![
        record("a", "not a url", "A", "#111111"),
        record("b", "https://x.test/", "B", "#222222"),
        record("c", "https://x.test/dashboard", "C", "#333333"),
    ];
    let sources: BTreeMap<String, String> = aggregate_components(&records)
        .into_iter()
        .map(|c| (c.name, c.source))
        .collect();
    assert_eq!(sources["A"], "Unknown");
    assert_eq!(sources["B"], "Homepage");
    assert_eq!(sources["C"], "Dashboard");
}

#[test]
fn aggregation_is_deterministic() {
    let records = mixed_evidence();
    let a = serde_json::to_string(&aggregate_components(&records)).unwrap();
    let b = serde_json::to_string(&aggregate_components(&records)).unwrap();
    assert_eq!(a, b);
    let a = serde_json::to_string(&aggregate_styles(&records)).unwrap();
    let b = serde_json::to_string(&aggregate_styles(&records)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn captures_cover_every_record() {
    let records = mixed_evidence();
    let components = aggregate_components(&records);
    let total: usize = components.iter().map(|c| c.captures_count).sum();
    assert_eq!(total, records.len());

    for component in &components {
        let captures = component_captures(&component.id, &records);
        assert_eq!(captures.len(), component.captures_count);
    }
}

#[test]
fn drilldown_round_trip() {
    let records = mixed_evidence();
    let components = aggregate_components(&records);
    let styles = aggregate_styles(&records);
    let brand = styles.iter().find(|s| s.value == "#1976D2").unwrap();

    assert_eq!(brand.token, "accent");
    assert_eq!(brand.source, "Design System");

    let locations = style_locations(&brand.id, &records, &styles);
    let uses: usize = locations.iter().map(|l| l.uses).sum();
    assert_eq!(uses, brand.usage_count);
    assert_eq!(locations[0].source_label, "Cart");

    let related = related_components(&brand.id, &records, &components, &styles);
    let names: Vec<&str> = related.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Save", "Checkout"]);
}

#[test]
fn four_sided_collapse() {
    assert_eq!(format_4_sided("8px", "8px", "8px", "8px"), "8px");
    assert_eq!(format_4_sided("8px", "16px", "8px", "16px"), "8px 16px");
    assert_eq!(format_4_sided("1px", "2px", "3px", "4px"), "1px 2px 3px 4px");
}

#[test]
fn bucketing_boundaries() {
    assert_eq!(bucket_px(Some("10px")), 8);
    let record: EvidenceRecord = serde_json::from_value(json!({
        "id": "rgb", "url": "https://x.test/", "tagName": "div",
        "styles": { "primitives": {
            "spacing": { "paddingTop": "10px", "paddingRight": "0px",
                         "paddingBottom": "0px", "paddingLeft": "0px" },
            "backgroundColor": { "raw": "rgb(250, 8, 127)",
                                 "value": { "r": 250, "g": 8, "b": 127, "a": 1 } },
            "color": { "raw": "#000" },
            "shadow": { "raw": "none", "isPresent": false }
        } }
    }))
    .unwrap();
    let groups = group_records(&[record], GroupingMode::Full);
    assert!(
        groups[0].key.contains("::p=8,0,0,0::bg=240,0,128,1.0::"),
        "key was {}",
        groups[0].key
    );
}

#[test]
fn token_follows_declared_source_order() {
    let text_first: StyleSources =
        serde_json::from_str(r#"{"color":"var(--text)","backgroundColor":"var(--bg)"}"#).unwrap();
    assert_eq!(extract_token(Some(&text_first)), "text");

    let bg_first: StyleSources =
        serde_json::from_str(r#"{"backgroundColor":"var(--bg)","color":"var(--text)"}"#).unwrap();
    assert_eq!(extract_token(Some(&bg_first)), "bg");
}

#[test]
fn style_identity_survives_reordering_with_tokens() {
    let a = with_sources(
        record("a", "https://x.test/", "Save", "#fff"),
        json!({ "backgroundColor": "var(--surface)" }),
    );
    let b = record("b", "https://x.test/", "Save", "#fff");

    let forward = aggregate_styles(&[a.clone(), b.clone()]);
    let backward = aggregate_styles(&[b, a]);
    assert_eq!(forward, backward);

    let bg = forward.iter().find(|s| s.value == "#fff").unwrap();
    assert_eq!(bg.token, "surface");
    assert_eq!(bg.source, "Design System");
}

#[test]
fn explain_reads_keys_by_position() {
    let ex = explain("button::button::p=3");
    assert_eq!(ex.mode(), GroupingMode::Role);
    assert_eq!(ex.role.as_deref(), Some("button"));
    assert_eq!(ex.name, "p=3");

    for name in ["sh=none", "Größe ändern", "c=1,2,3,1.0", "日本語"] {
        let rec = record("n", "https://x.test/", name, "#1976D2");
        for mode in [GroupingMode::Name, GroupingMode::Role, GroupingMode::Full] {
            let ex = explain(&group_key(&rec, mode));
            assert_eq!(ex.mode(), mode, "name {name:?} in {mode} mode");
            assert_eq!(ex.name, name.to_lowercase());
        }
    }
}

fn group_sets(records: &[EvidenceRecord]) -> BTreeSet<(String, BTreeSet<String>)> {
    let mut members: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for r in records {
        members
            .entry(component_id(r))
            .or_default()
            .insert(r.id.clone());
    }
    members.into_iter().collect()
}

proptest! {
    // Grouping (ids and members) and style identity are independent of
    // input order. Component display fields come from the first-seen member
    // and are allowed to differ.
    #[test]
    fn grouping_ignores_input_order(shuffled in Just(mixed_evidence()).prop_shuffle()) {
        let original = mixed_evidence();
        prop_assert_eq!(group_sets(&original), group_sets(&shuffled));

        let ids = |rs: &[EvidenceRecord]| -> BTreeSet<String> {
            aggregate_components(rs).into_iter().map(|c| c.id).collect()
        };
        prop_assert_eq!(ids(&original[..]), ids(&shuffled[..]));

        let styles = |rs: &[EvidenceRecord]| -> BTreeSet<(String, String, String, usize)> {
            aggregate_styles(rs)
                .into_iter()
                .map(|s| (s.id, s.token, s.source, s.usage_count))
                .collect()
        };
        prop_assert_eq!(styles(&original[..]), styles(&shuffled[..]));
    }
}
