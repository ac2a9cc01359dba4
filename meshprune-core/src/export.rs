//! Cleaned-export document and file naming.

use meshprune_types::contact::ContactsDocument;
use thiserror::Error;

/// Base name used when the input file name is unknown.
pub const DEFAULT_BASE_NAME: &str = "meshcore_contacts";

/// Default suffix appended to the base name before `.json`.
pub const DEFAULT_EXPORT_SUFFIX: &str = "_cleaned";

pub const DISCLAIMER: &str = "meshprune only suggests which contacts to drop. Review the \
     selection before importing the cleaned file into your device; removed contacts must be \
     re-discovered over the air to come back. You use the exported file at your own risk.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no contacts loaded; nothing to export")]
    NothingLoaded,

    #[error("the export disclaimer has not been accepted")]
    ConsentRequired,

    #[error("serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `contacts.JSON` -> `contacts_cleaned.json`.
pub fn export_file_name(source_name: Option<&str>, suffix: &str) -> String {
    let base = source_name
        .map(strip_json_extension)
        .unwrap_or(DEFAULT_BASE_NAME);
    format!("{base}{suffix}.json")
}

fn strip_json_extension(name: &str) -> &str {
    let cut = name.len().saturating_sub(".json".len());
    match name.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".json") => &name[..cut],
        _ => name,
    }
}

/// Pretty-printed JSON, two-space indentation.
pub fn render_export(doc: &ContactsDocument) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(doc)?)
}
