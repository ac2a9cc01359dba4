//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use meshprune_contacts::{ContactPayload, ContactsLoadError};

/// Source of a raw contacts export.
pub trait ContactSource {
    fn read_payload(&self) -> Result<ContactPayload, ContactsLoadError>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
