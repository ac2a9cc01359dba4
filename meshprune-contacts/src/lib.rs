//! Contact export ingestion.
//!
//! The loader only insists on the document shape (`{ "contacts": [...] }`). Individual records are
//! accepted as found; malformed fields are interpreted later and degrade to safe defaults instead of
//! failing the whole load.

mod load;

pub use load::{ContactPayload, ContactsLoadError, FORMAT_MESSAGE, parse_contacts, read_payload};
