use crate::review::{Recommendation, ReviewSummary, ReviewedContact, TypeCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable record of one review run (`review.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub input: ReviewInput,
    pub evaluated_at: DateTime<Utc>,
    pub policy: ReviewPolicy,
    pub summary: ReviewSummary,

    /// Number of repeaters promoted back to keep by the path resolver.
    #[serde(default)]
    pub path_overrides: u64,

    #[serde(default)]
    pub contacts: Vec<ReviewEntry>,
}

impl ReviewReport {
    pub fn new(
        tool: ToolInfo,
        input: ReviewInput,
        evaluated_at: DateTime<Utc>,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            schema: crate::schema::MESHPRUNE_REVIEW_V1.to_string(),
            tool,
            input,
            evaluated_at,
            policy,
            summary: ReviewSummary::default(),
            path_overrides: 0,
            contacts: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Rule parameters in effect for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPolicy {
    pub stale_after_days: i64,

    #[serde(default)]
    pub flood_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub id: usize,
    pub display_name: String,
    pub category: TypeCategory,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_id: String,

    pub favorite: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_days: Option<i64>,

    pub custom_path: bool,
    pub recommendation: Recommendation,
    pub rule_id: String,
    pub reason: String,

    #[serde(default)]
    pub path_override: bool,

    pub selected: bool,
}

impl ReviewEntry {
    pub fn from_contact(contact: &ReviewedContact, selected: bool) -> Self {
        Self {
            id: contact.id,
            display_name: contact.display_name.clone(),
            category: contact.category,
            short_id: contact.short_id(),
            favorite: contact.favorite,
            last_seen: contact.last_seen,
            age_days: contact.age_days,
            custom_path: contact.custom_path,
            recommendation: contact.recommendation,
            rule_id: contact.rule_id.to_string(),
            reason: contact.reason.clone(),
            path_override: contact.path_override,
            selected,
        }
    }
}
