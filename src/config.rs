use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ui_inventory_core::buckets::GroupingMode;
use ui_inventory_core::components::RepresentativePolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub evidence: EvidenceConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvidenceConfig {
    /// JSON file holding an array of evidence records.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScopeConfig {
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GroupingConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub representative: RepresentativePolicy,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            representative: RepresentativePolicy::default(),
        }
    }
}

fn default_mode() -> String {
    "role".to_string()
}

impl GroupingConfig {
    /// Parsed grouping mode; validated by [`load_config`].
    pub fn grouping_mode(&self) -> GroupingMode {
        GroupingMode::parse(&self.mode).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: None,
            pretty: true,
        }
    }
}

fn default_pretty() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.evidence.path.as_os_str().is_empty() {
        anyhow::bail!("evidence.path must not be empty");
    }

    // Relative evidence paths resolve against the config file's directory.
    if config.evidence.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.evidence.path = dir.join(&config.evidence.path);
        }
    }

    if let Some(project) = &config.scope.project_id {
        if project.trim().is_empty() {
            anyhow::bail!("scope.project_id must not be empty when set");
        }
    }

    if GroupingMode::parse(&config.grouping.mode).is_none() {
        anyhow::bail!(
            "Unknown grouping mode: '{}'. Must be name, role, or full.",
            config.grouping.mode
        );
    }

    Ok(config)
}
