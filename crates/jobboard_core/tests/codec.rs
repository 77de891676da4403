mod common;

use std::collections::BTreeSet;

use jobboard_core::{
    decode, encode, hydrate, FieldDescriptor, FieldValue, FilterState, PartialState, SortKey,
    UrlState, ValueKind, FILTER_SCHEMA,
};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

use common::init_logging;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Paging {
    page: u32,
    compact: bool,
    label: String,
    ids: Vec<String>,
}

const PAGING_SCHEMA: [FieldDescriptor; 4] = [
    FieldDescriptor::new("page", "p", ValueKind::Number).omit_when_falsy(),
    FieldDescriptor::new("compact", "compact", ValueKind::Boolean),
    FieldDescriptor::new("label", "label", ValueKind::String),
    FieldDescriptor::new("ids", "id", ValueKind::StringList).omit_when_falsy(),
];

impl UrlState for Paging {
    fn schema() -> &'static [FieldDescriptor] {
        &PAGING_SCHEMA
    }
}

#[test]
fn decode_coerces_each_kind() {
    init_logging();
    let partial = decode("?p=3&compact=true&label=Hello+World&id=a&id=b", &PAGING_SCHEMA);

    assert_eq!(partial.get("page"), Some(&FieldValue::Number(3.0)));
    assert_eq!(partial.get("compact"), Some(&FieldValue::Boolean(true)));
    assert_eq!(
        partial.get("label"),
        Some(&FieldValue::String("Hello World".to_string()))
    );
    assert_eq!(
        partial.get("ids"),
        Some(&FieldValue::StringList(vec!["a".to_string(), "b".to_string()]))
    );
}

#[test]
fn decode_treats_malformed_values_as_absent() {
    init_logging();
    let partial = decode("p=three&compact=yes&compact=true&id=", &PAGING_SCHEMA);

    assert!(partial.get("page").is_none());
    // Only the first value of a scalar parameter counts, and it must be a literal.
    assert!(partial.get("compact").is_none());
    assert!(partial.get("ids").is_none());
    assert!(partial.get("label").is_none());
}

#[test]
fn decode_keeps_empty_string_parameter() {
    let partial = decode("label=", &PAGING_SCHEMA);
    assert_eq!(partial.get("label"), Some(&FieldValue::String(String::new())));
}

#[test]
fn encode_preserves_unrelated_parameters() {
    init_logging();
    let filters = FilterState {
        search: "react dev".to_string(),
        role: "Frontend".to_string(),
        selected_tags: vec!["React".to_string(), "Sass".to_string()],
        ..FilterState::default()
    };

    let query = encode(&filters, &FILTER_SCHEMA, "utm=mail&q=old&tag=Vue");
    assert_eq!(query, "utm=mail&q=react+dev&role=Frontend&tag=React&tag=Sass&sort=recent");
}

#[test]
fn encode_omits_falsy_values_only_when_asked() {
    let paging = Paging {
        page: 0,
        compact: false,
        label: String::new(),
        ids: vec!["x".to_string(), String::new()],
    };

    let query = encode(&paging, &PAGING_SCHEMA, "");
    // `compact` is not omit-when-falsy so `false` is kept; empty strings are never written.
    assert_eq!(query, "compact=false&id=x");
}

#[test]
fn encode_defaults_writes_only_sort() {
    let query = encode(&FilterState::default(), &FILTER_SCHEMA, "");
    assert_eq!(query, "sort=recent");
}

#[test]
fn filter_state_round_trips_through_the_url() {
    init_logging();
    let filters = FilterState {
        search: "Senior & Lead".to_string(),
        only_new: true,
        only_featured: true,
        role: "Fullstack".to_string(),
        level: "Senior".to_string(),
        contract: "Part Time".to_string(),
        selected_tags: vec!["C++".to_string(), "Node/JS".to_string()],
        sort_by: SortKey::Company,
    };

    let query = encode(&filters, &FILTER_SCHEMA, "");
    let restored = hydrate(&FilterState::default(), None, &decode(&query, &FILTER_SCHEMA));
    assert_eq!(restored, filters);
}

#[test]
fn schema_describes_every_filter_field_once() {
    let value = serde_json::to_value(FilterState::default()).unwrap();
    let fields: BTreeSet<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    let described: BTreeSet<&str> = FILTER_SCHEMA.iter().map(|d| d.field).collect();

    assert_eq!(described.len(), FILTER_SCHEMA.len());
    assert_eq!(fields, described);
}

#[test]
fn hydrate_prefers_url_then_store_then_defaults() {
    init_logging();
    let stored = json!({
        "search": "stored search",
        "role": "Backend",
        "onlyNew": true,
    });
    let from_url = decode("role=Frontend&sort=level", &FILTER_SCHEMA);

    let filters = hydrate(&FilterState::default(), Some(&stored), &from_url);

    assert_eq!(filters.role, "Frontend");
    assert_eq!(filters.sort_by, SortKey::Level);
    assert_eq!(filters.search, "stored search");
    assert!(filters.only_new);
    assert!(!filters.only_featured);
    assert!(filters.selected_tags.is_empty());
}

#[test]
fn hydrate_skips_values_that_do_not_fit_the_state() {
    init_logging();
    let stored = json!({
        "onlyNew": "yes",
        "level": "Junior",
        "selectedTags": ["Go", "Go", "Rust"],
        "unknown": 12,
    });
    let from_url = decode("sort=newest&featured=true", &FILTER_SCHEMA);

    let filters = hydrate(&FilterState::default(), Some(&stored), &from_url);

    assert!(!filters.only_new);
    assert!(filters.only_featured);
    assert_eq!(filters.level, "Junior");
    assert_eq!(filters.sort_by, SortKey::Recent);
    assert_eq!(filters.selected_tags, vec!["Go".to_string(), "Rust".to_string()]);
}

#[test]
fn hydrate_ignores_non_object_snapshot() {
    init_logging();
    let stored = json!(["not", "an", "object"]);
    let filters = hydrate(&FilterState::default(), Some(&stored), &PartialState::new());
    assert_eq!(filters, FilterState::default());
}

#[test]
fn hydrate_rejects_fractional_number_for_integer_field() {
    init_logging();
    let paging = hydrate(&Paging::default(), None, &decode("p=2.5&label=x", &PAGING_SCHEMA));
    assert_eq!(paging.page, 0);
    assert_eq!(paging.label, "x");
}
