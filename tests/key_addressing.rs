//! Key addressing tests.
//!
//! The facade's only logic of its own is resolving key traits to service
//! addresses; these tests pin that resolution down without touching either
//! backing service.

use std::collections::HashMap;

use fireblob::client::documents::document_path;
use fireblob::{Categorizer, Grouping, Key, MetaGrouping, MetaKey, ObjectLocation};

/// A caller-owned key type, the way downstream crates implement the traits
struct ReportKey {
    quarter: String,
}

impl Categorizer for ReportKey {
    fn category(&self) -> &str {
        "reports"
    }
}

impl Grouping for ReportKey {
    fn identifier(&self) -> &str {
        &self.quarter
    }
}

impl MetaGrouping for ReportKey {
    fn meta(&self) -> HashMap<String, String> {
        HashMap::from([("department".to_string(), "finance".to_string())])
    }
}

#[test]
fn document_path_uses_category_and_identifier() {
    let key = ReportKey {
        quarter: "2024-q3".to_string(),
    };
    assert_eq!(
        document_path("demo-project", &key),
        "projects/demo-project/databases/(default)/documents/reports/2024-q3"
    );
}

#[test]
fn object_location_uses_category_and_identifier() {
    let key = ReportKey {
        quarter: "2024-q3".to_string(),
    };
    let location = ObjectLocation::of(&key);
    assert_eq!(location.bucket_name(), "reports");
    assert_eq!(location.object, "2024-q3");
    assert_eq!(location.uri(), "gs://reports/2024-q3");
}

#[test]
fn location_derivation_is_pure() {
    let key = Key::new("media", "covers/alpha.png");

    // deriving twice yields the same address and leaves the key untouched
    assert_eq!(ObjectLocation::of(&key), ObjectLocation::of(&key));
    assert_eq!(document_path("p", &key), document_path("p", &key));
    assert_eq!(key.identifier(), "covers/alpha.png");
}

#[test]
fn custom_and_ready_made_keys_address_identically() {
    let custom = ReportKey {
        quarter: "2024-q3".to_string(),
    };
    let ready_made = Key::new("reports", "2024-q3");

    assert_eq!(ObjectLocation::of(&custom), ObjectLocation::of(&ready_made));
    assert_eq!(
        document_path("p", &custom),
        document_path("p", &ready_made)
    );
}

#[test]
fn meta_grouping_supplies_the_update_map() {
    let key = ReportKey {
        quarter: "2024-q3".to_string(),
    };
    let meta = key.meta();
    assert_eq!(meta.len(), 1);
    assert_eq!(
        meta.get("department").map(String::as_str),
        Some("finance")
    );

    let ready_made = MetaKey::new("reports", "2024-q3").with_meta("department", "finance");
    assert_eq!(ready_made.meta(), meta);
}

#[test]
fn traits_are_usable_through_references() {
    fn address(group: impl Grouping) -> ObjectLocation {
        ObjectLocation::of(&group)
    }

    let key = Key::new("media", "a");
    let by_ref = address(&key);
    let by_value = address(key);
    assert_eq!(by_ref, by_value);
}
