//! Rule explanations for the `meshprune explain` command.

use meshprune_domain::rule_ids;
use meshprune_types::review::TypeCategory;

/// Id reported for the routing path dependency pass.
pub const PATH_DEPENDENCY_ID: &str = "resolve.path_dependency";

/// Information about one retention rule or pass.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Short key (user-facing, e.g., "repeater").
    pub key: &'static str,
    /// Rule id as it appears in review reports.
    pub rule_id: &'static str,
    pub title: &'static str,
    /// Contact type the rule judges; `None` for passes that span types.
    pub category: Option<TypeCategory>,
    pub description: &'static str,
    /// When the rule suggests removal.
    pub remove_when: &'static str,
    /// What to do if you disagree with the suggestion.
    pub remediation: &'static str,
}

/// Registry of all rule explanations, in evaluation order.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    RuleExplanation {
        key: "repeater",
        rule_id: rule_ids::REPEATER,
        title: "Stale repeaters",
        category: Some(TypeCategory::Repeater),
        description: r#"Repeaters relay traffic for the mesh. A repeater that has not advertised
for a while has most likely moved, been switched off, or gone out of range.

The rule looks at the most recent of `last_advert` and `last_modified`."#,
        remove_when: r#"Suggested for removal when BOTH hold:
- not heard for more than the stale threshold (default 10 days)
- not marked as favorite

A stale repeater is still kept when its key prefix appears in the routing
path of a contact that stays in the list (see `path-dependency`)."#,
        remediation: r#"Mark the repeater as favorite in Meshcore, or keep it explicitly:

    meshprune export contacts.json --keep <ID> --accept-disclaimer"#,
    },
    RuleExplanation {
        key: "companion",
        rule_id: rule_ids::COMPANION,
        title: "Stale companions",
        category: Some(TypeCategory::Companion),
        description: r#"Companions are handheld or app-connected nodes belonging to people.
A configured routing path means someone set it up deliberately."#,
        remove_when: r#"Suggested for removal when ALL hold:
- not heard for more than the stale threshold (default 10 days)
- not marked as favorite
- no custom routing path (empty, or one of the flood markers)"#,
        remediation: r#"Mark the companion as favorite, or pass `--keep <ID>` on export.
Adjust the threshold with `--stale-after-days` or `[rules] stale_after_days`."#,
    },
    RuleExplanation {
        key: "sensor",
        rule_id: rule_ids::SENSOR,
        title: "Non-favorite sensors",
        category: Some(TypeCategory::Sensor),
        description: r#"Sensors are usually discovered in passing and rarely wanted in the list.
Activity does not matter for this rule."#,
        remove_when: "Suggested for removal unless marked as favorite.",
        remediation: "Mark sensors you care about as favorite in Meshcore.",
    },
    RuleExplanation {
        key: "room",
        rule_id: rule_ids::ROOM,
        title: "Rooms",
        category: Some(TypeCategory::Room),
        description: "Room servers hold shared conversations and are always kept.",
        remove_when: "Never suggested for removal.",
        remediation: "Pass `--remove <ID>` on export to drop a room anyway.",
    },
    RuleExplanation {
        key: "unknown",
        rule_id: rule_ids::UNKNOWN,
        title: "Unknown types",
        category: Some(TypeCategory::Unknown),
        description: r#"Records whose `type` is missing or not one of 1 to 4. Nothing is known
about them, so they are left alone."#,
        remove_when: "Never suggested for removal.",
        remediation: "Pass `--remove <ID>` on export to drop the record anyway.",
    },
    RuleExplanation {
        key: "path-dependency",
        rule_id: PATH_DEPENDENCY_ID,
        title: "Repeaters used in routing paths",
        category: None,
        description: r#"Runs once after the per-type rules. For every contact that is kept, its
routing path text is searched for the first two characters of each
repeater's public key. Matching repeaters are switched back to keep and
their reason gains a note.

The pass does not cascade: a repeater rescued this way does not in turn
rescue the repeaters in its own path. Two repeaters sharing a two-character
prefix are both rescued."#,
        remove_when: "Never removes anything; it only switches repeaters to keep.",
        remediation: "Pass `--remove <ID>` on export to drop a rescued repeater anyway.",
    },
];

/// Look up a rule by key or rule id, case-insensitively.
pub fn lookup_rule(query: &str) -> Option<&'static RuleExplanation> {
    let query_lower = query.to_lowercase();
    let query_normalized = query_lower.replace('_', "-");

    RULE_REGISTRY.iter().find(|rule| {
        rule.key == query_normalized
            || rule.rule_id == query_lower
            || rule.rule_id.ends_with(&format!(".{}", query_lower))
    })
}

pub fn list_rule_keys() -> Vec<&'static str> {
    RULE_REGISTRY.iter().map(|r| r.key).collect()
}

/// Label for the category column.
pub fn format_category(category: Option<TypeCategory>) -> &'static str {
    category.map(TypeCategory::as_str).unwrap_or("(all)")
}
