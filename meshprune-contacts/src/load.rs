use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use meshprune_types::contact::{CONTACTS_FIELD, RawContact};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// User-facing message for any document that is not a contacts export.
pub const FORMAT_MESSAGE: &str = "The selected file is not a supported Meshcore contacts JSON. \
     Please export your contacts from Meshcore and try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactsLoadError {
    #[error("Could not read the selected file: {message}")]
    Io { message: String },

    /// `detail` is kept for logs; the display text is the same for every format failure.
    #[error("{}", FORMAT_MESSAGE)]
    Format { detail: String },
}

/// Raw text of an export plus where it came from.
#[derive(Debug, Clone)]
pub struct ContactPayload {
    pub path: Option<Utf8PathBuf>,
    pub text: String,
}

impl ContactPayload {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    /// File name of the source, e.g. `contacts.json`.
    pub fn file_name(&self) -> Option<&str> {
        self.path.as_deref().and_then(Utf8Path::file_name)
    }
}

pub fn read_payload(path: &Utf8Path) -> Result<ContactPayload, ContactsLoadError> {
    let text = fs::read_to_string(path).map_err(|e| ContactsLoadError::Io {
        message: e.to_string(),
    })?;
    debug!(path = %path, bytes = text.len(), "read contacts payload");
    Ok(ContactPayload {
        path: Some(path.to_path_buf()),
        text,
    })
}

/// Parse an export document into its contact records, in input order.
pub fn parse_contacts(text: &str) -> Result<Vec<RawContact>, ContactsLoadError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| ContactsLoadError::Format {
        detail: format!("invalid JSON: {e}"),
    })?;

    let Some(items) = doc.get(CONTACTS_FIELD).and_then(Value::as_array) else {
        return Err(ContactsLoadError::Format {
            detail: r#"JSON does not contain a "contacts" array."#.to_string(),
        });
    };

    let contacts: Vec<RawContact> = items.iter().cloned().map(RawContact::new).collect();
    debug!(count = contacts.len(), "parsed contacts");
    Ok(contacts)
}
