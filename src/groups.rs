//! Bucketed grouping commands: `groups`, `explain`, `variants`.
//!
//! Exploratory views over near-duplicate elements. These never affect
//! the exact-match components and styles listed by the other commands.

use anyhow::Result;

use ui_inventory_core::buckets::{explain, group_members, group_records, variants, GroupingMode};

use crate::config::Config;
use crate::evidence;
use crate::inspect::Output;

/// Resolve `--mode`, falling back to the configured default.
pub fn resolve_mode(config: &Config, mode: Option<&str>) -> Result<GroupingMode> {
    match mode {
        Some(name) => match GroupingMode::parse(name) {
            Some(mode) => Ok(mode),
            None => anyhow::bail!("Unknown grouping mode: {}. Use name, role, or full.", name),
        },
        None => Ok(config.grouping.grouping_mode()),
    }
}

pub fn run_groups(config: &Config, mode: GroupingMode, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let groups = group_records(&records, mode);
    if out.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    println!("--- {} groups (mode: {}) ---", groups.len(), mode);
    for g in &groups {
        println!("{:>6}  {}", g.count(), g.key);
    }
    Ok(())
}

/// Explain a key purely from its text; no evidence is read.
pub fn run_explain(key: &str, json: bool) -> Result<()> {
    let explanation = explain(key);
    if json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    println!("--- Group key (mode: {}) ---", explanation.mode());
    for line in explanation.lines() {
        println!("  {}", line);
    }
    Ok(())
}

pub fn run_variants(config: &Config, key: &str, mode: GroupingMode, out: Output<'_>) -> Result<()> {
    let records = evidence::load_scoped(config, out.project)?;
    let members = group_members(&records, mode, key);
    let found = variants(&members);
    if out.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    println!(
        "--- {} variants across {} members of {} ---",
        found.len(),
        members.len(),
        key
    );
    for v in &found {
        println!("#{:<3} {:>5}  {}", v.index, v.member_ids.len(), v.fingerprint);
        println!("      {}", v.member_ids.join(", "));
    }
    Ok(())
}
