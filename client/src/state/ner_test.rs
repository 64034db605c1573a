use super::*;
use tags::{NerType, Tag};

fn tag(kind: NerType, value: &str, counter: u32) -> Tag {
    Tag { kind, value: value.to_owned(), counter }
}

fn sample_document() -> TagDocument {
    TagDocument {
        pages: vec![
            PageTags {
                page_order: Some(1),
                tags: vec![tag(NerType::Person, "Schiller", 1), tag(NerType::Location, "Jena", 2)],
                ..PageTags::default()
            },
            PageTags { page_order: Some(2), tags: vec![tag(NerType::Person, "Goethe", 1)], ..PageTags::default() },
            PageTags { page_order: Some(3), tags: vec![tag(NerType::Location, "Jena", 1)], ..PageTags::default() },
        ],
    }
}

// =============================================================
// page_window
// =============================================================

#[test]
fn window_centres_on_value() {
    assert_eq!(page_window(50, 10, 100), PageWindow { start: 45, end: 54 });
}

#[test]
fn window_clamps_at_first_page() {
    assert_eq!(page_window(2, 10, 100), PageWindow { start: 1, end: 10 });
}

#[test]
fn window_shifts_back_at_last_page() {
    assert_eq!(page_window(98, 10, 100), PageWindow { start: 91, end: 100 });
}

#[test]
fn window_never_exceeds_short_record() {
    assert_eq!(page_window(2, 10, 3), PageWindow { start: 1, end: 3 });
}

#[test]
fn window_handles_degenerate_inputs() {
    assert_eq!(page_window(0, 0, 0), PageWindow { start: 1, end: 1 });
    assert_eq!(page_window(500, 5, 20), PageWindow { start: 16, end: 20 });
}

#[test]
fn window_always_within_record() {
    for total in 1..40 {
        for range in 1..12 {
            for value in 0..=total + 2 {
                let w = page_window(value, range, total);
                assert!(w.start >= 1 && w.start <= w.end && w.end <= total, "{value} {range} {total} -> {w:?}");
                assert_eq!(w.end - w.start + 1, range.min(total));
            }
        }
    }
}

// =============================================================
// Defaults and restore
// =============================================================

#[test]
fn new_clamps_current_page() {
    let state = NerState::new(20, 99);
    assert_eq!(state.slider_value, 20);
    assert_eq!(state.total_pages, 20);
    assert_eq!(state.mode, NerMode::Overview);
    assert_eq!(state.page_range, DEFAULT_PAGE_RANGE);
}

#[test]
fn restore_applies_valid_values() {
    let mut state = NerState::default();
    state.restore(Some(25), Some("location"));
    assert_eq!(state.page_range, 25);
    assert_eq!(state.filter, TypeFilter::Only(NerType::Location));
}

#[test]
fn restore_ignores_invalid_values() {
    let mut state = NerState::default();
    state.restore(Some(0), Some("planet"));
    assert_eq!(state.page_range, DEFAULT_PAGE_RANGE);
    assert_eq!(state.filter, TypeFilter::All);
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn endpoint_follows_mode() {
    let mut state = NerState::new(100, 50);
    assert_eq!(state.endpoint(), Endpoint::Ranges { range: 10, filter: TypeFilter::All });

    state.set_mode(NerMode::Recurrence);
    state.set_filter(TypeFilter::Only(NerType::Event));
    assert_eq!(
        state.endpoint(),
        Endpoint::Recurrence { filter: TypeFilter::Only(NerType::Event), order: RecurrenceOrder::Desc }
    );

    state.set_mode(NerMode::Section);
    state.set_page_range(5);
    assert_eq!(state.endpoint(), Endpoint::Pages { start: 48, end: 52, filter: TypeFilter::Only(NerType::Event) });
}

#[test]
fn slider_is_clamped() {
    let mut state = NerState::new(10, 1);
    state.set_slider(0);
    assert_eq!(state.slider_value, 1);
    state.set_slider(11);
    assert_eq!(state.slider_value, 10);
}

#[test]
fn toggle_order_flips() {
    let mut state = NerState::default();
    state.toggle_order();
    assert_eq!(state.order, RecurrenceOrder::Asc);
    state.toggle_order();
    assert_eq!(state.order, RecurrenceOrder::Desc);
}

// =============================================================
// Request sequencing
// =============================================================

#[test]
fn latest_response_is_applied() {
    let mut state = NerState::default();
    let seq = state.begin_request();
    assert!(state.loading);
    assert!(state.finish_request(seq, Ok(sample_document())));
    assert!(!state.loading);
    assert!(state.document.is_some());
}

#[test]
fn stale_response_is_discarded() {
    let mut state = NerState::default();
    let first = state.begin_request();
    let second = state.begin_request();
    assert!(!state.finish_request(first, Ok(sample_document())));
    assert!(state.loading);
    assert!(state.document.is_none());
    assert!(state.finish_request(second, Err("tag request failed: 500 Internal Server Error".into())));
    assert_eq!(state.error.as_deref(), Some("tag request failed: 500 Internal Server Error"));
}

#[test]
fn begin_request_clears_previous_error() {
    let mut state = NerState::default();
    let seq = state.begin_request();
    state.finish_request(seq, Err("boom".into()));
    state.begin_request();
    assert!(state.error.is_none());
}

// =============================================================
// Derived lists
// =============================================================

#[test]
fn page_entries_filter_by_type_and_drop_empty_pages() {
    let mut state = NerState::default();
    state.document = Some(sample_document());
    state.set_filter(TypeFilter::Only(NerType::Person));
    let pages = state.page_entries();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].tags, vec![tag(NerType::Person, "Schiller", 1)]);
}

#[test]
fn page_entries_apply_text_query() {
    let mut state = NerState::default();
    state.document = Some(sample_document());
    state.query = "JEN".into();
    let pages = state.page_entries();
    assert_eq!(pages.iter().map(|p| p.page_order).collect::<Vec<_>>(), vec![Some(1), Some(3)]);
}

#[test]
fn summaries_rank_and_filter() {
    let mut state = NerState::default();
    state.document = Some(sample_document());
    let all = state.summaries();
    assert_eq!(all[0].value, "Jena");
    assert_eq!(all[0].count, 3);

    state.set_filter(TypeFilter::Only(NerType::Person));
    let people = state.summaries();
    assert_eq!(people.iter().map(|s| s.value.as_str()).collect::<Vec<_>>(), vec!["Goethe", "Schiller"]);

    state.toggle_order();
    assert_eq!(state.summaries()[0].value, "Schiller");
}

#[test]
fn derived_lists_empty_without_document() {
    let state = NerState::default();
    assert!(state.page_entries().is_empty());
    assert!(state.summaries().is_empty());
}
