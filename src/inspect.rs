//! Inventory listing and drill-down commands.
//!
//! Each command loads and scopes the evidence, calls the engine fresh,
//! and prints either a table or JSON to stdout. Unknown ids print an
//! empty result; they are not errors.

use anyhow::Result;
use serde::Serialize;

use ui_inventory_core::classify::StyleKind;
use ui_inventory_core::components::aggregate_components_with;
use ui_inventory_core::drilldown::{component_captures, related_components, style_locations};
use ui_inventory_core::essentials::derive_visual_essentials;
use ui_inventory_core::styles::aggregate_styles;

use crate::config::Config;
use crate::evidence;

/// Shared flags for every inspection command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output<'a> {
    pub project: Option<&'a str>,
    pub json: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_components(config: &Config, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let components = aggregate_components_with(&records, config.grouping.representative);
    if out.json {
        return print_json(&components);
    }

    println!(
        "{:<16} {:>8}  {:<12} {:<14} {:<16} {}",
        "ID", "CAPTURES", "CATEGORY", "TYPE", "SOURCE", "NAME"
    );
    for c in &components {
        println!(
            "{:<16} {:>8}  {:<12} {:<14} {:<16} {}",
            c.id, c.captures_count, c.category, c.kind, c.source, c.name
        );
    }
    eprintln!("{} components from {} records", components.len(), records.len());
    Ok(())
}

pub fn run_styles(config: &Config, kind: Option<&str>, out: Output<'_>) -> Result<()> {
    let kind = match kind {
        Some(name) => match StyleKind::parse(name) {
            Some(kind) => Some(kind),
            None => anyhow::bail!(
                "Unknown style kind: {}. Use color, spacing, typography, shadow, border, or unknown.",
                name
            ),
        },
        None => None,
    };

    let records = evidence::load_scoped(config, out.project)?;
    let mut styles = aggregate_styles(&records);
    if let Some(kind) = kind {
        styles.retain(|s| s.kind == kind);
    }
    if out.json {
        return print_json(&styles);
    }

    println!(
        "{:<16} {:>6}  {:<11} {:<24} {:<16} {}",
        "ID", "USES", "KIND", "TOKEN", "SOURCE", "VALUE"
    );
    for s in &styles {
        println!(
            "{:<16} {:>6}  {:<11} {:<24} {:<16} {}",
            s.id, s.usage_count, s.kind, s.token, s.source, s.value
        );
    }
    Ok(())
}

pub fn run_captures(config: &Config, component_id: &str, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let captures = component_captures(component_id, &records);
    if out.json {
        return print_json(&captures);
    }

    println!("--- Captures of {} ({}) ---", component_id, captures.len());
    for c in &captures {
        println!(
            "{:<16} {:<16} {}  [{}]",
            c.id,
            c.source_label,
            c.url,
            c.screenshot_blob_id.as_deref().unwrap_or("no screenshot")
        );
    }
    Ok(())
}

pub fn run_locations(config: &Config, style_id: &str, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let styles = aggregate_styles(&records);
    let locations = style_locations(style_id, &records, &styles);
    if out.json {
        return print_json(&locations);
    }

    println!("--- Locations of {} ({}) ---", style_id, locations.len());
    for l in &locations {
        println!(
            "{:>5}x  {:<16} {}  (e.g. {})",
            l.uses, l.source_label, l.url, l.representative_capture_id
        );
    }
    Ok(())
}

pub fn run_related(config: &Config, style_id: &str, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let components = aggregate_components_with(&records, config.grouping.representative);
    let styles = aggregate_styles(&records);
    let related = related_components(style_id, &records, &components, &styles);
    if out.json {
        return print_json(&related);
    }

    println!("--- Components using {} ({}) ---", style_id, related.len());
    for r in &related {
        println!(
            "{:<16} {:>8}  {:<12} {}",
            r.id, r.captures_count, r.category, r.name
        );
    }
    Ok(())
}

pub fn run_essentials(config: &Config, record_id: &str, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let essentials = derive_visual_essentials(evidence::find_record(&records, record_id));
    if out.json {
        return print_json(&essentials);
    }

    match &essentials.derived_from_capture_id {
        Some(id) => println!("--- Visual essentials of {} ---", id),
        None => {
            println!("--- No capture {} ---", record_id);
            return Ok(());
        }
    }
    let mut section = None;
    for row in &essentials.rows {
        if section != Some(row.section) {
            println!("[{:?}]", row.section);
            section = Some(row.section);
        }
        println!("  {:<14} {}", row.label, row.value);
    }
    Ok(())
}
