//! Configuration file loading for meshprune.
//!
//! Discovers and loads `meshprune.toml` next to the input export, or from an explicit path.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use meshprune_core::export::DEFAULT_EXPORT_SUFFIX;
use meshprune_domain::DEFAULT_STALE_AFTER_DAYS;
use meshprune_domain::interpret::DEFAULT_FLOOD_MARKERS;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "meshprune.toml";

/// Top-level configuration from meshprune.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeshpruneConfig {
    /// Retention rule parameters.
    pub rules: RulesConfig,

    /// Export settings.
    pub export: ExportConfig,
}

/// Rules section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Days without activity after which a contact counts as stale.
    pub stale_after_days: i64,

    /// Routing path values treated as "flood" (no custom path).
    pub flood_markers: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            flood_markers: DEFAULT_FLOOD_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Export section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Suffix appended to the input's base name.
    pub suffix: String,

    /// Directory for the cleaned file (default: next to the input).
    pub out_dir: Option<Utf8PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_EXPORT_SUFFIX.to_string(),
            out_dir: None,
        }
    }
}

/// Discover the meshprune.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a meshprune.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<MeshpruneConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<MeshpruneConfig> {
    let config: MeshpruneConfig = toml::from_str(contents).context("invalid TOML")?;
    if config.rules.stale_after_days < 0 {
        anyhow::bail!(
            "rules.stale_after_days must not be negative (got {})",
            config.rules.stale_after_days
        );
    }
    Ok(config)
}

/// Load the explicit config, or discover one in `dir`, or fall back to defaults.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<MeshpruneConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(MeshpruneConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub stale_after_days: i64,

    /// Flood markers (from config file, extended by CLI).
    pub flood_markers: Vec<String>,

    pub suffix: String,

    pub out_dir: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: MeshpruneConfig,
}

impl ConfigMerger {
    pub fn new(config: MeshpruneConfig) -> Self {
        Self { config }
    }

    /// CLI `stale_after_days` replaces the config value; CLI flood markers extend the list.
    pub fn merge_rule_args(
        self,
        cli_stale_after_days: Option<i64>,
        cli_flood_markers: &[String],
    ) -> MergedConfig {
        let mut flood_markers = self.config.rules.flood_markers.clone();
        for marker in cli_flood_markers {
            if !flood_markers.contains(marker) {
                flood_markers.push(marker.clone());
            }
        }

        MergedConfig {
            stale_after_days: cli_stale_after_days.unwrap_or(self.config.rules.stale_after_days),
            flood_markers,
            suffix: self.config.export.suffix.clone(),
            out_dir: self.config.export.out_dir.clone(),
        }
    }
}
