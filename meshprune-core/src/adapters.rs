//! Default filesystem-backed port implementations.

use crate::ports::{ContactSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use meshprune_contacts::{ContactPayload, ContactsLoadError};

/// Reads an export from disk via `meshprune_contacts::read_payload`.
#[derive(Debug, Clone)]
pub struct FsContactSource {
    pub path: Utf8PathBuf,
}

impl FsContactSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl ContactSource for FsContactSource {
    fn read_payload(&self) -> Result<ContactPayload, ContactsLoadError> {
        meshprune_contacts::read_payload(&self.path)
    }
}

/// In-memory contact source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryContactSource {
    payload: ContactPayload,
}

impl InMemoryContactSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            payload: ContactPayload::from_text(text),
        }
    }

    /// Attach a nominal file name, used to name the export.
    pub fn with_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.payload.path = Some(path.into());
        self
    }
}

impl ContactSource for InMemoryContactSource {
    fn read_payload(&self) -> Result<ContactPayload, ContactsLoadError> {
        Ok(self.payload.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
