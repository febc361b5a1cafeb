use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn evidence_record(
    id: &str,
    url: &str,
    name: &str,
    bg: (&str, [u8; 3]),
    project: Option<&str>,
) -> Value {
    let (raw, [r, g, b]) = bg;
    let mut record = json!({
        "id": id,
        "url": url,
        "tagName": "button",
        "role": "button",
        "accessibleName": name,
        "screenshotBlobId": format!("blob-{id}"),
        "styles": { "primitives": {
            "spacing": { "paddingTop": "8px", "paddingRight": "16px",
                         "paddingBottom": "8px", "paddingLeft": "16px" },
            "backgroundColor": { "raw": raw, "value": { "r": r, "g": g, "b": b, "a": 1 } },
            "color": { "raw": "#FFFFFF" },
            "shadow": { "raw": "none", "isPresent": false },
            "sources": { "backgroundColor": "var(--brand-primary)" }
        } }
    });
    if let Some(project) = project {
        record["projectId"] = json!(project);
    }
    record
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let brand = ("#1976D2", [25, 118, 210]);
    let danger = ("#D32F2F", [211, 47, 47]);
    let evidence = json!([
        evidence_record("e1", "https://shop.test/", "Save", brand, Some("alpha")),
        evidence_record("e2", "https://shop.test/cart", "Save", brand, Some("alpha")),
        evidence_record("e3", "https://shop.test/cart", "Checkout", brand, None),
        evidence_record("e4", "https://shop.test/account", "Delete", danger, Some("beta")),
    ]);
    fs::write(
        root.join("evidence.json"),
        serde_json::to_string_pretty(&evidence).unwrap(),
    )
    .unwrap();

    let config_content = r#"[evidence]
path = "../evidence.json"

[grouping]
mode = "role"
"#;

    let config_path = config_dir.join("uinv.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_uinv(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_uinv"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .expect("failed to run uinv");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_json(config_path: &Path, args: &[&str]) -> Value {
    let mut all = args.to_vec();
    all.push("--json");
    let (stdout, stderr, success) = run_uinv(config_path, &all);
    assert!(success, "{:?} failed: stderr={}", args, stderr);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad JSON ({e}): {stdout}"))
}

#[test]
fn test_components_json() {
    let (_tmp, config_path) = setup_test_env();
    let components = run_json(&config_path, &["components"]);
    let list = components.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["name"], "Save");
    assert_eq!(list[0]["capturesCount"], 2);
    assert_eq!(list[0]["status"], "Unknown");
    assert_eq!(list[0]["category"], "Actions");
}

#[test]
fn test_project_scope_keeps_unscoped_records() {
    let (_tmp, config_path) = setup_test_env();
    let components = run_json(&config_path, &["components", "--project", "alpha"]);
    let names: Vec<&str> = components
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Save", "Checkout"]);
}

#[test]
fn test_styles_kind_filter_and_tokens() {
    let (_tmp, config_path) = setup_test_env();
    let styles = run_json(&config_path, &["styles", "--kind", "color"]);
    let list = styles.as_array().unwrap();
    assert!(list.iter().all(|s| s["kind"] == "color"));
    assert_eq!(list[0]["value"], "#FFFFFF");
    assert_eq!(list[0]["usageCount"], 4);
    assert_eq!(list[0]["token"], "brand-primary");
    assert_eq!(list[0]["source"], "Design System");
}

#[test]
fn test_unknown_style_kind_fails() {
    let (_tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_uinv(&config_path, &["styles", "--kind", "fuzzy"]);
    assert!(!success);
    assert!(stderr.contains("Unknown style kind"));
}

#[test]
fn test_drilldown_flow() {
    let (_tmp, config_path) = setup_test_env();

    let components = run_json(&config_path, &["components"]);
    let save_id = components[0]["id"].as_str().unwrap().to_string();
    let captures = run_json(&config_path, &["captures", &save_id]);
    let captures = captures.as_array().unwrap();
    assert_eq!(captures.len(), 2);
    assert_eq!(captures[0]["sourceLabel"], "Cart");
    assert_eq!(captures[0]["screenshotBlobId"], "blob-e2");

    let styles = run_json(&config_path, &["styles"]);
    let brand = styles
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["value"] == "#1976D2")
        .unwrap();
    let brand_id = brand["id"].as_str().unwrap();

    let locations = run_json(&config_path, &["locations", brand_id]);
    assert_eq!(locations[0]["sourceLabel"], "Cart");
    assert_eq!(locations[0]["uses"], 2);

    let related = run_json(&config_path, &["related", brand_id]);
    assert_eq!(related.as_array().unwrap().len(), 2);

    let missing = run_json(&config_path, &["related", "style_missing"]);
    assert!(missing.as_array().unwrap().is_empty());
}

#[test]
fn test_essentials() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_uinv(&config_path, &["essentials", "e1"]);
    assert!(success, "essentials failed: {}", stderr);
    assert!(stdout.contains("[Surface]"));
    assert!(stdout.contains("8px 16px"));

    let none = run_json(&config_path, &["essentials", "nope"]);
    assert!(none["rows"].as_array().unwrap().is_empty());
    assert!(none["derivedFromCaptureId"].is_null());
}

#[test]
fn test_groups_explain_variants() {
    let (_tmp, config_path) = setup_test_env();
    let groups = run_json(&config_path, &["groups", "--mode", "full"]);
    let first = groups[0]["key"].as_str().unwrap().to_string();
    assert_eq!(groups[0]["memberIds"].as_array().unwrap().len(), 2);
    assert!(first.starts_with("button::button::save::p=8,16,8,16::bg=32,112,208,1.0"));

    let explained = run_json(&config_path, &["explain", &first]);
    assert_eq!(explained["tag"], "button");
    assert_eq!(explained["name"], "save");
    assert_eq!(explained["shadow"], "none");

    let variants = run_json(&config_path, &["variants", "button::button::save"]);
    assert_eq!(variants[0]["index"], 1);
    assert_eq!(variants[0]["memberIds"].as_array().unwrap().len(), 2);
}

#[test]
fn test_export_to_file() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("out/inventory.json");
    let (_, stderr, success) = run_uinv(
        &config_path,
        &["export", "--output", out.to_str().unwrap()],
    );
    assert!(success, "export failed: {}", stderr);
    assert!(stderr.contains("Exported 3 components"));

    let payload: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(payload["signatureVersion"], 1);
    assert_eq!(payload["recordCount"], 4);
    assert!(payload["exportedAt"].is_string());
    assert_eq!(payload["components"].as_array().unwrap().len(), 3);
}

#[test]
fn test_stats_summary() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_uinv(&config_path, &["stats"]);
    assert!(success, "stats failed: {}", stderr);
    assert!(stdout.contains("Records:     4"));
    assert!(stdout.contains("Components:  3"));
    assert!(stdout.contains("Actions"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_uinv(&tmp.path().join("absent.toml"), &["components"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
