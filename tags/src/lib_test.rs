use super::*;

fn tag(kind: NerType, value: &str, counter: u32) -> Tag {
    Tag { kind, value: value.to_owned(), counter }
}

fn page(order: u32, tags: Vec<Tag>) -> PageTags {
    PageTags { page_order: Some(order), tags, ..PageTags::default() }
}

fn sample_document() -> TagDocument {
    TagDocument {
        pages: vec![
            page(1, vec![tag(NerType::Location, "Berlin", 2), tag(NerType::Person, "Goethe", 1)]),
            page(2, vec![tag(NerType::Location, "Berlin", 1), tag(NerType::Location, "Weimar", 3)]),
            page(3, vec![tag(NerType::Person, "Goethe", 2), tag(NerType::Location, "Berlin", 1)]),
        ],
    }
}

// =============================================================
// Types and filters
// =============================================================

#[test]
fn ner_type_parses_case_insensitively() {
    assert_eq!("person".parse::<NerType>().expect("type"), NerType::Person);
    assert_eq!("LOCATION".parse::<NerType>().expect("type"), NerType::Location);
    assert_eq!(" misc ".parse::<NerType>().expect("type"), NerType::Misc);
}

#[test]
fn ner_type_rejects_unknown_name() {
    let err = "planet".parse::<NerType>().expect_err("should be invalid");
    assert!(matches!(err, TagError::InvalidType(ref s) if s == "planet"));
}

#[test]
fn type_filter_all_is_dash() {
    assert_eq!(TypeFilter::All.as_segment(), "-");
    assert_eq!("-".parse::<TypeFilter>().expect("filter"), TypeFilter::All);
    assert_eq!("".parse::<TypeFilter>().expect("filter"), TypeFilter::All);
    assert_eq!("event".parse::<TypeFilter>().expect("filter"), TypeFilter::Only(NerType::Event));
}

#[test]
fn type_filter_matches() {
    assert!(TypeFilter::All.matches(NerType::Misc));
    assert!(TypeFilter::Only(NerType::Person).matches(NerType::Person));
    assert!(!TypeFilter::Only(NerType::Person).matches(NerType::Event));
}

#[test]
fn recurrence_order_parses() {
    assert_eq!("ASC".parse::<RecurrenceOrder>().expect("order"), RecurrenceOrder::Asc);
    assert_eq!("desc".parse::<RecurrenceOrder>().expect("order"), RecurrenceOrder::Desc);
    assert!(matches!("up".parse::<RecurrenceOrder>(), Err(TagError::InvalidOrder(_))));
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn endpoint_urls_follow_service_layout() {
    let base = "https://viewer.example.org/viewer/";
    let filter = TypeFilter::Only(NerType::Person);
    assert_eq!(Endpoint::All.url(base, "PPN1"), "https://viewer.example.org/viewer/rest/ner/tags/PPN1/");
    assert_eq!(
        Endpoint::Ranges { range: 10, filter: TypeFilter::All }.url(base, "PPN1"),
        "https://viewer.example.org/viewer/rest/ner/tags/ranges/10/-/PPN1/"
    );
    assert_eq!(Endpoint::ByType { filter }.url(base, "PPN1"), "https://viewer.example.org/viewer/rest/ner/tags/person/PPN1/");
    assert_eq!(
        Endpoint::Recurrence { filter, order: RecurrenceOrder::Asc }.url(base, "PPN1"),
        "https://viewer.example.org/viewer/rest/ner/tags/recurrence/person/asc/PPN1/"
    );
    assert_eq!(
        Endpoint::Pages { start: 5, end: 14, filter: TypeFilter::All }.url(base, "PPN1"),
        "https://viewer.example.org/viewer/rest/ner/tags/5/14/-/PPN1/"
    );
}

#[test]
fn endpoint_url_without_trailing_slash_on_base() {
    assert_eq!(Endpoint::All.url("/viewer", "X"), "/viewer/rest/ner/tags/X/");
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn decode_single_pages() {
    let raw = r#"{"pages":[{"pageOrder":3,"tags":[{"type":"location","value":"Rom","counter":4}]}]}"#;
    let doc = TagDocument::decode(raw).expect("decode should succeed");
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].page_order, Some(3));
    assert_eq!(doc.pages[0].tags[0], tag(NerType::Location, "Rom", 4));
}

#[test]
fn decode_ranges_and_defaults() {
    let raw = r#"{"pages":[{"firstPage":1,"lastPage":10,"tags":[{"type":"PERSON","value":"Kant"}]}]}"#;
    let doc = TagDocument::decode(raw).expect("decode should succeed");
    let entry = &doc.pages[0];
    assert_eq!(entry.first(), Some(1));
    assert_eq!(entry.last(), Some(10));
    assert_eq!(entry.label(), "1 - 10");
    assert_eq!(entry.tags[0].counter, 1);
    assert_eq!(entry.tags[0].kind, NerType::Person);
}

#[test]
fn decode_skips_unknown_tag_types() {
    let raw = r#"{"pages":[{"pageOrder":2,"tags":[
        {"type":"work","value":"Faust","counter":2},
        {"type":"person","value":"Goethe","counter":3}
    ]}]}"#;
    let doc = TagDocument::decode(raw).expect("decode should succeed");
    assert_eq!(doc.pages[0].tags, vec![tag(NerType::Person, "Goethe", 3)]);
}

#[test]
fn decode_empty_object_has_no_pages() {
    let doc = TagDocument::decode("{}").expect("decode should succeed");
    assert!(doc.is_empty());
}

#[test]
fn decode_rejects_malformed_body() {
    let err = TagDocument::decode("<html>").expect_err("should fail");
    assert!(matches!(err, TagError::Decode(_)));
}

#[test]
fn http_error_message_includes_status() {
    assert_eq!(TagError::http(503, "Service Unavailable").to_string(), "tag request failed: 503 Service Unavailable");
}

#[test]
fn page_label_for_single_page() {
    assert_eq!(page(7, Vec::new()).label(), "7");
    assert_eq!(PageTags::default().label(), "");
}

// =============================================================
// Aggregation
// =============================================================

#[test]
fn aggregate_sums_and_sorts_by_count() {
    let summaries = aggregate(&sample_document());
    let order: Vec<(&str, u32)> = summaries.iter().map(|s| (s.value.as_str(), s.count)).collect();
    assert_eq!(order, vec![("Berlin", 4), ("Goethe", 3), ("Weimar", 3)]);
}

#[test]
fn aggregate_collects_pages() {
    let summaries = aggregate(&sample_document());
    let berlin = summaries.iter().find(|s| s.value == "Berlin").expect("berlin");
    assert_eq!(berlin.pages, vec![1, 2, 3]);
}

#[test]
fn aggregate_keeps_types_apart() {
    let doc = TagDocument {
        pages: vec![page(1, vec![tag(NerType::Location, "Paris", 1), tag(NerType::Person, "Paris", 1)])],
    };
    assert_eq!(aggregate(&doc).len(), 2);
}

#[test]
fn filter_by_value_ignores_case() {
    let summaries = aggregate(&sample_document());
    let hits = filter_by_value(&summaries, "  ber ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].value, "Berlin");
    assert_eq!(filter_by_value(&summaries, "").len(), 3);
    assert!(filter_by_value(&summaries, "xyz").is_empty());
}
