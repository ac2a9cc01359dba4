use crate::contact::RawContact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device role derived from the numeric `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Companion,
    Repeater,
    Room,
    Sensor,
    #[default]
    Unknown,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 5] = [
        TypeCategory::Companion,
        TypeCategory::Repeater,
        TypeCategory::Room,
        TypeCategory::Sensor,
        TypeCategory::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeCategory::Companion => "companion",
            TypeCategory::Repeater => "repeater",
            TypeCategory::Room => "room",
            TypeCategory::Sensor => "sensor",
            TypeCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Keep,
    Remove,
}

impl Recommendation {
    pub fn is_keep(self) -> bool {
        self == Recommendation::Keep
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Keep => "keep",
            Recommendation::Remove => "remove",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of the public key shown before it is elided.
pub const SHORT_ID_LEN: usize = 10;

/// Display name used when a contact carries neither `custom_name` nor `name`.
pub const UNNAMED: &str = "(unnamed)";

/// One contact after classification.
///
/// `id` is the position in the loaded list and the only key used to correlate
/// selections and resolver overrides with contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewedContact {
    pub id: usize,
    pub raw: RawContact,
    pub display_name: String,
    pub category: TypeCategory,
    pub favorite: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub age_days: Option<i64>,
    pub custom_path: bool,
    pub recommendation: Recommendation,
    /// Id of the retention rule that produced the initial verdict.
    pub rule_id: &'static str,
    pub reason: String,
    /// Set when the path resolver promoted this contact back to keep.
    pub path_override: bool,
}

impl ReviewedContact {
    pub fn public_key(&self) -> &str {
        self.raw.public_key().unwrap_or("")
    }

    /// Public key truncated for display, e.g. `a1b2c3d4e5…`.
    pub fn short_id(&self) -> String {
        let pk = self.public_key();
        if pk.chars().count() > SHORT_ID_LEN {
            let head: String = pk.chars().take(SHORT_ID_LEN).collect();
            format!("{head}…")
        } else {
            pk.to_string()
        }
    }
}

/// Keep/remove counts derived from the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total: u64,
    pub keep: u64,
    pub remove: u64,
}

impl ReviewSummary {
    pub fn from_selection(selected: &[bool]) -> Self {
        let total = selected.len() as u64;
        let keep = selected.iter().filter(|s| **s).count() as u64;
        Self {
            total,
            keep,
            remove: total - keep,
        }
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.total, self.keep, self.remove)
    }
}
