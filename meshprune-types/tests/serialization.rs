use chrono::{TimeZone, Utc};
use meshprune_types::contact::{ContactsDocument, RawContact};
use meshprune_types::report::{ReviewInput, ReviewPolicy, ReviewReport, ToolInfo};
use meshprune_types::review::{Recommendation, ReviewSummary, TypeCategory};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

#[test]
fn type_category_serializes_snake_case() {
    for category in TypeCategory::ALL {
        let v = serde_json::to_value(category).expect("serialize");
        assert_eq!(v, json!(category.as_str()));
    }
}

#[test]
fn recommendation_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(Recommendation::Keep).expect("serialize"),
        json!("keep")
    );
    assert_eq!(
        serde_json::to_value(Recommendation::Remove).expect("serialize"),
        json!("remove")
    );
}

#[test]
fn raw_contact_is_transparent_and_keeps_unknown_fields() {
    let value = json!({
        "public_key": "a1b2c3",
        "type": 2,
        "vendor_extra": { "nested": [1, 2, 3] }
    });
    let raw = RawContact::new(value.clone());

    assert_eq!(serde_json::to_value(&raw).expect("serialize"), value);
}

#[test]
fn raw_contact_preserves_field_order() {
    let text = r#"{"zeta":1,"alpha":2,"type":1}"#;
    let raw: RawContact = serde_json::from_str(text).expect("parse");
    assert_eq!(serde_json::to_string(&raw).expect("serialize"), text);
}

#[test]
fn non_object_contact_has_no_fields() {
    let raw = RawContact::new(json!(42));
    assert!(raw.field("type").is_none());
    assert!(raw.public_key().is_none());
}

#[test]
fn non_empty_str_skips_blank_values() {
    let raw = RawContact::new(json!({ "custom_name": "", "name": "Hilltop" }));
    assert_eq!(raw.non_empty_str("custom_name"), None);
    assert_eq!(raw.non_empty_str("name"), Some("Hilltop"));
}

#[test]
fn contacts_document_pretty_prints_with_contacts_field() {
    let doc = ContactsDocument::new(vec![RawContact::new(json!({ "type": 3 }))]);
    let s = serde_json::to_string_pretty(&doc).expect("serialize");
    assert_eq!(s, "{\n  \"contacts\": [\n    {\n      \"type\": 3\n    }\n  ]\n}");
}

#[test]
fn review_report_omits_missing_sha() {
    let report = ReviewReport::new(
        ToolInfo {
            name: "meshprune".to_string(),
            version: None,
        },
        ReviewInput {
            path: "contacts.json".to_string(),
            sha256: None,
        },
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ReviewPolicy {
            stale_after_days: 10,
            flood_markers: vec!["flood".to_string()],
        },
    );

    let v = serde_json::to_value(&report).expect("serialize");
    assert_eq!(v["schema"], json!("meshprune.review.v1"));
    assert!(v["input"].get("sha256").is_none());
    assert!(v["tool"].get("version").is_none());
    assert_eq!(v["summary"], json!({ "total": 0, "keep": 0, "remove": 0 }));
}

fn record() -> impl Strategy<Value = RawContact> {
    prop::collection::vec(("[a-z_]{1,10}", any::<i64>()), 0..6).prop_map(|fields| {
        let map: Map<String, Value> = fields.into_iter().map(|(k, v)| (k, json!(v))).collect();
        RawContact::new(Value::Object(map))
    })
}

proptest! {
    #[test]
    fn summary_counts_add_up(selected in prop::collection::vec(any::<bool>(), 0..64)) {
        let s = ReviewSummary::from_selection(&selected);
        prop_assert_eq!(s.total, selected.len() as u64);
        prop_assert_eq!(s.keep + s.remove, s.total);
        prop_assert_eq!(s.keep, selected.iter().filter(|b| **b).count() as u64);
    }

    #[test]
    fn contacts_document_round_trips_with_field_order(
        contacts in prop::collection::vec(record(), 0..8)
    ) {
        let doc = ContactsDocument::new(contacts);
        let text = serde_json::to_string(&doc).expect("serialize");
        let back: ContactsDocument = serde_json::from_str(&text).expect("deserialize");
        prop_assert_eq!(&back, &doc);
        prop_assert_eq!(serde_json::to_string(&back).expect("serialize"), text);
    }
}
