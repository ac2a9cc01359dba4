//! Second pass: keep repeaters that kept contacts route through.
//!
//! Matching is textual. A repeater counts as used when the first two characters of its public key
//! occur anywhere in a kept contact's `out_path`. Two repeaters sharing a prefix are both protected
//! when either is referenced.
//!
//! The used-prefix set is built from the keep set as it stood before this pass, so a repeater
//! promoted here does not in turn protect the repeaters on its own path.

use crate::interpret::path_text;
use meshprune_types::contact::fields;
use meshprune_types::review::{Recommendation, ReviewedContact, TypeCategory};
use std::collections::BTreeSet;
use tracing::debug;

pub const PATH_OVERRIDE_NOTE: &str = " Repeater is used in routing paths of kept contacts.";

const PREFIX_CHARS: usize = 2;

/// Leading characters of a public key used to spot a repeater in paths.
pub fn repeater_prefix(public_key: &str) -> Option<&str> {
    let end = public_key
        .char_indices()
        .nth(PREFIX_CHARS)
        .map_or(public_key.len(), |(i, _)| i);
    let prefix = &public_key[..end];
    (!prefix.is_empty()).then_some(prefix)
}

/// Promote referenced repeaters from remove to keep. Returns the ids that were promoted.
pub fn resolve_path_dependencies(contacts: &mut [ReviewedContact]) -> Vec<usize> {
    let repeater_prefixes: BTreeSet<String> = contacts
        .iter()
        .filter(|c| c.category == TypeCategory::Repeater)
        .filter_map(|c| repeater_prefix(c.public_key()).map(str::to_string))
        .collect();

    let mut used: BTreeSet<String> = BTreeSet::new();
    for keeper in contacts.iter().filter(|c| c.recommendation.is_keep()) {
        let Some(path) = path_text(keeper.raw.field(fields::OUT_PATH)) else {
            continue;
        };
        for prefix in &repeater_prefixes {
            if path.contains(prefix.as_str()) {
                used.insert(prefix.clone());
            }
        }
    }

    let mut promoted = Vec::new();
    for contact in contacts.iter_mut() {
        if contact.category != TypeCategory::Repeater
            || contact.recommendation != Recommendation::Remove
        {
            continue;
        }
        let Some(prefix) = repeater_prefix(contact.public_key()) else {
            continue;
        };
        if used.contains(prefix) {
            debug!(id = contact.id, prefix, "repeater used in kept paths");
            contact.recommendation = Recommendation::Keep;
            contact.reason.push_str(PATH_OVERRIDE_NOTE);
            contact.path_override = true;
            promoted.push(contact.id);
        }
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshprune_types::contact::RawContact;
    use serde_json::{Value, json};

    fn contact(
        id: usize,
        category: TypeCategory,
        recommendation: Recommendation,
        raw: Value,
    ) -> ReviewedContact {
        ReviewedContact {
            id,
            raw: RawContact::new(raw),
            display_name: format!("c{id}"),
            category,
            favorite: false,
            last_seen: None,
            age_days: None,
            custom_path: false,
            recommendation,
            rule_id: "test",
            reason: "initial.".to_string(),
            path_override: false,
        }
    }

    #[test]
    fn prefix_takes_two_chars() {
        assert_eq!(repeater_prefix("a1b2c3"), Some("a1"));
        assert_eq!(repeater_prefix("a"), Some("a"));
        assert_eq!(repeater_prefix(""), None);
        assert_eq!(repeater_prefix("äöü"), Some("äö"));
    }

    #[test]
    fn referenced_repeater_is_promoted() {
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "a1ffee" }),
            ),
            contact(
                1,
                TypeCategory::Companion,
                Recommendation::Keep,
                json!({ "public_key": "b2", "out_path": "xxa1yy" }),
            ),
        ];

        let promoted = resolve_path_dependencies(&mut contacts);

        assert_eq!(promoted, vec![0]);
        assert_eq!(contacts[0].recommendation, Recommendation::Keep);
        assert_eq!(
            contacts[0].reason,
            "initial. Repeater is used in routing paths of kept contacts."
        );
        assert!(contacts[0].path_override);
        assert!(!contacts[1].path_override);
    }

    #[test]
    fn removed_contacts_do_not_protect() {
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "a1ffee" }),
            ),
            contact(
                1,
                TypeCategory::Companion,
                Recommendation::Remove,
                json!({ "out_path": "a1" }),
            ),
        ];

        assert!(resolve_path_dependencies(&mut contacts).is_empty());
        assert_eq!(contacts[0].recommendation, Recommendation::Remove);
    }

    #[test]
    fn no_cascade_within_one_pass() {
        // Keeper routes via r1; r1 (removed) routes via r2 (removed).
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "11aa", "out_path": "22" }),
            ),
            contact(
                1,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "22bb" }),
            ),
            contact(
                2,
                TypeCategory::Room,
                Recommendation::Keep,
                json!({ "out_path": "11" }),
            ),
        ];

        let promoted = resolve_path_dependencies(&mut contacts);
        assert_eq!(promoted, vec![0]);
        assert_eq!(contacts[1].recommendation, Recommendation::Remove);
    }

    #[test]
    fn shared_prefix_protects_both() {
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "a1aaaa" }),
            ),
            contact(
                1,
                TypeCategory::Repeater,
                Recommendation::Remove,
                json!({ "public_key": "a1bbbb" }),
            ),
            contact(
                2,
                TypeCategory::Companion,
                Recommendation::Keep,
                json!({ "out_path": "a1" }),
            ),
        ];

        assert_eq!(resolve_path_dependencies(&mut contacts), vec![0, 1]);
    }

    #[test]
    fn non_repeaters_never_promoted() {
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Sensor,
                Recommendation::Remove,
                json!({ "public_key": "a1" }),
            ),
            contact(
                1,
                TypeCategory::Repeater,
                Recommendation::Keep,
                json!({ "public_key": "ff", "out_path": "a1" }),
            ),
        ];

        assert!(resolve_path_dependencies(&mut contacts).is_empty());
        assert_eq!(contacts[0].recommendation, Recommendation::Remove);
    }

    #[test]
    fn kept_repeater_note_not_appended() {
        let mut contacts = vec![
            contact(
                0,
                TypeCategory::Repeater,
                Recommendation::Keep,
                json!({ "public_key": "a1" }),
            ),
            contact(
                1,
                TypeCategory::Companion,
                Recommendation::Keep,
                json!({ "out_path": "a1" }),
            ),
        ];

        assert!(resolve_path_dependencies(&mut contacts).is_empty());
        assert_eq!(contacts[0].reason, "initial.");
    }
}
