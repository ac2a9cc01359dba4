//! BDD harness (cucumber-rs).
//!
//! Keeps scenario tests out of the production crates. Shared fixtures live here.

use serde_json::{Value, json};

/// Seconds in one day.
pub const DAY_SECS: i64 = 86_400;

/// A contact record as Meshcore exports it.
pub fn contact(kind: u64, public_key: &str, name: &str, favorite: bool) -> Value {
    json!({
        "type": kind,
        "public_key": public_key,
        "name": name,
        "flags": if favorite { 1 } else { 0 },
    })
}

/// Wrap records in the export envelope.
pub fn export_document(contacts: &[Value]) -> String {
    json!({ "contacts": contacts }).to_string()
}
