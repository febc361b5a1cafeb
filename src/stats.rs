//! Inventory statistics.
//!
//! A quick summary of what the current evidence derives to: record and
//! component counts, the category breakdown, and style counts per kind.
//! Used by `uinv stats` to sanity-check a capture session.

use anyhow::Result;
use std::collections::BTreeMap;

use ui_inventory_core::components::aggregate_components_with;
use ui_inventory_core::export::SIGNATURE_VERSION;
use ui_inventory_core::models::SENTINEL;
use ui_inventory_core::styles::aggregate_styles;

use crate::config::Config;
use crate::evidence;

/// Per-category breakdown of component and capture counts.
struct CategoryStats {
    components: usize,
    captures: usize,
}

/// Run the stats command: derive the inventory and print a summary.
pub fn run_stats(config: &Config, project: Option<&str>) -> Result<()> {
    let records = evidence::load_scoped(config, project)?;
    let components = aggregate_components_with(&records, config.grouping.representative);
    let styles = aggregate_styles(&records);

    let mut by_category: BTreeMap<&str, CategoryStats> = BTreeMap::new();
    for c in &components {
        let entry = by_category
            .entry(c.category.as_str())
            .or_insert(CategoryStats {
                components: 0,
                captures: 0,
            });
        entry.components += 1;
        entry.captures += c.captures_count;
    }

    let mut by_kind: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for s in &styles {
        let entry = by_kind.entry(s.kind.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += s.usage_count;
    }

    let tokened = styles.iter().filter(|s| s.token != SENTINEL).count();

    println!("UI Inventory — Stats");
    println!("====================");
    println!();
    println!("  Evidence:    {}", config.evidence.path.display());
    if let Some(project) = project.or(config.scope.project_id.as_deref()) {
        println!("  Project:     {}", project);
    }
    println!("  Signature:   v{}", SIGNATURE_VERSION);
    println!();
    println!("  Records:     {}", records.len());
    println!("  Components:  {}", components.len());
    println!(
        "  Styles:      {} ({} token-backed, {}%)",
        styles.len(),
        tokened,
        percent(tokened, styles.len())
    );

    if !by_category.is_empty() {
        println!();
        println!("  By category:");
        println!("  {:<16} {:>10} {:>10}", "CATEGORY", "COMPONENTS", "CAPTURES");
        println!("  {}", "-".repeat(38));
        for (category, s) in &by_category {
            println!("  {:<16} {:>10} {:>10}", category, s.components, s.captures);
        }
    }

    if !by_kind.is_empty() {
        println!();
        println!("  By style kind:");
        println!("  {:<16} {:>10} {:>10}", "KIND", "STYLES", "USES");
        println!("  {}", "-".repeat(38));
        for (kind, (count, uses)) in &by_kind {
            println!("  {:<16} {:>10} {:>10}", kind, count, uses);
        }
    }

    println!();
    Ok(())
}

fn percent(part: usize, whole: usize) -> usize {
    if whole > 0 {
        (part * 100) / whole
    } else {
        0
    }
}
