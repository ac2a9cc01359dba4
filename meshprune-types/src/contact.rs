use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known field names in a Meshcore contact record.
pub mod fields {
    pub const TYPE: &str = "type";
    pub const FLAGS: &str = "flags";
    pub const PUBLIC_KEY: &str = "public_key";
    pub const CUSTOM_NAME: &str = "custom_name";
    pub const NAME: &str = "name";
    pub const LAST_ADVERT: &str = "last_advert";
    pub const LAST_MODIFIED: &str = "last_modified";
    pub const OUT_PATH: &str = "out_path";
}

/// Top-level field holding the contact list in an export document.
pub const CONTACTS_FIELD: &str = "contacts";

/// A single contact record as found in a Meshcore export.
///
/// meshprune is *tolerant* when reading contacts:
/// - Unknown fields are kept and written back on export.
/// - Every field is optional and may carry an unexpected JSON type.
///
/// The record is never modified; derived values live on
/// [`ReviewedContact`](crate::review::ReviewedContact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawContact(Value);

impl RawContact {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field. Non-object records have no fields.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A field that is present and a non-empty string.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn public_key(&self) -> Option<&str> {
        self.field(fields::PUBLIC_KEY).and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawContact {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The document written by an export: `{ "contacts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactsDocument {
    pub contacts: Vec<RawContact>,
}

impl ContactsDocument {
    pub fn new(contacts: Vec<RawContact>) -> Self {
        Self { contacts }
    }
}
