//! Clap-free settings for review and export pipelines.

use crate::export::DEFAULT_EXPORT_SUFFIX;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use meshprune_domain::ClassifierConfig;

/// Settings for the review pipeline.
#[derive(Debug, Clone)]
pub struct ReviewSettings {
    /// Evaluation instant; `None` means "now".
    pub now: Option<DateTime<Utc>>,

    // Rules
    pub stale_after_days: i64,
    pub flood_markers: Vec<String>,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        let rules = ClassifierConfig::default();
        Self {
            now: None,
            stale_after_days: rules.stale_after_days,
            flood_markers: rules.flood_markers,
        }
    }
}

impl ReviewSettings {
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            stale_after_days: self.stale_after_days,
            flood_markers: self.flood_markers.clone(),
        }
    }
}

/// Bulk selection applied before individual overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    KeepAll,
    RemoveAll,
}

/// Settings for the export pipeline.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub review: ReviewSettings,
    pub out_dir: Utf8PathBuf,
    pub suffix: String,

    // User overrides
    pub bulk: Option<BulkAction>,
    pub keep: Vec<usize>,
    pub remove: Vec<usize>,

    // Consent
    pub accept_disclaimer: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            review: ReviewSettings::default(),
            out_dir: Utf8PathBuf::from("."),
            suffix: DEFAULT_EXPORT_SUFFIX.to_string(),
            bulk: None,
            keep: Vec::new(),
            remove: Vec::new(),
            accept_disclaimer: false,
        }
    }
}
