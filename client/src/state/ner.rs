//! NER facetting widget state: mode, filters, page window and request tracking.
//!
//! DESIGN
//! ======
//! The widget issues one tag request per distinct [`Endpoint`]. Each request
//! is tagged with a sequence number from [`NerState::begin_request`]; a
//! response is only applied when its number is still the latest, so a slow
//! answer to a superseded query never overwrites a newer one.

#[cfg(test)]
#[path = "ner_test.rs"]
mod ner_test;

use tags::{Endpoint, PageTags, RecurrenceOrder, TagDocument, TagSummary, TypeFilter, aggregate, filter_by_value};

/// Page range sizes offered in the range selector.
pub const PAGE_RANGES: [u32; 4] = [5, 10, 25, 50];

/// Range used until the user picks one.
pub const DEFAULT_PAGE_RANGE: u32 = 10;

/// How the widget lists tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NerMode {
    /// Whole record, grouped into page ranges.
    #[default]
    Overview,
    /// Tags ranked by how often they recur across the record.
    Recurrence,
    /// Tags on a window of pages around the slider position.
    Section,
}

/// Inclusive page interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

/// Window of `range` pages centred on `value`, kept within `[1, total]`.
///
/// `start = max(1, value - range / 2)` and `end = min(total, start + range - 1)`;
/// when the window would run past `total`, `start` moves back so the window
/// still spans `range` pages where the record allows.
#[must_use]
pub fn page_window(value: u32, range: u32, total: u32) -> PageWindow {
    let total = total.max(1);
    let range = range.max(1);
    let value = value.clamp(1, total);

    let mut start = value.saturating_sub(range / 2).max(1);
    let end = start.saturating_add(range - 1).min(total);
    if end - start + 1 < range {
        start = (end + 1).saturating_sub(range).max(1);
    }
    PageWindow { start, end }
}

/// Reactive state of the NER facetting sidebar.
#[derive(Clone, Debug, PartialEq)]
pub struct NerState {
    pub mode: NerMode,
    pub filter: TypeFilter,
    pub order: RecurrenceOrder,
    pub page_range: u32,
    /// Slider position (page number) for [`NerMode::Section`].
    pub slider_value: u32,
    pub total_pages: u32,
    /// Free-text filter applied to tag values.
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub document: Option<TagDocument>,
    seq: u64,
}

impl Default for NerState {
    fn default() -> Self {
        Self {
            mode: NerMode::Overview,
            filter: TypeFilter::All,
            order: RecurrenceOrder::Desc,
            page_range: DEFAULT_PAGE_RANGE,
            slider_value: 1,
            total_pages: 1,
            query: String::new(),
            loading: false,
            error: None,
            document: None,
            seq: 0,
        }
    }
}

impl NerState {
    /// State for a record of `total_pages` pages opened at `current_page`.
    #[must_use]
    pub fn new(total_pages: u32, current_page: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self { total_pages, slider_value: current_page.clamp(1, total_pages), ..Self::default() }
    }

    /// Apply values restored from local storage. Invalid values are ignored.
    pub fn restore(&mut self, page_range: Option<u32>, filter: Option<&str>) {
        if let Some(range) = page_range.filter(|r| *r > 0) {
            self.page_range = range;
        }
        if let Some(filter) = filter.and_then(|f| f.parse::<TypeFilter>().ok()) {
            self.filter = filter;
        }
    }

    /// Query matching the current mode and filters.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self.mode {
            NerMode::Overview => Endpoint::Ranges { range: self.page_range, filter: self.filter },
            NerMode::Recurrence => Endpoint::Recurrence { filter: self.filter, order: self.order },
            NerMode::Section => {
                let window = self.window();
                Endpoint::Pages { start: window.start, end: window.end, filter: self.filter }
            }
        }
    }

    /// Page window around the slider.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        page_window(self.slider_value, self.page_range, self.total_pages)
    }

    pub fn set_mode(&mut self, mode: NerMode) {
        self.mode = mode;
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
    }

    pub fn set_page_range(&mut self, range: u32) {
        self.page_range = range.max(1);
    }

    pub fn set_slider(&mut self, value: u32) {
        self.slider_value = value.clamp(1, self.total_pages.max(1));
    }

    pub fn toggle_order(&mut self) {
        self.order = match self.order {
            RecurrenceOrder::Asc => RecurrenceOrder::Desc,
            RecurrenceOrder::Desc => RecurrenceOrder::Asc,
        };
    }

    /// Mark a new request as in flight and return its sequence number.
    pub fn begin_request(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.seq
    }

    /// Whether `seq` belongs to the latest request.
    #[must_use]
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    /// Apply a finished request. Returns false and changes nothing when the
    /// response belongs to a superseded request.
    pub fn finish_request(&mut self, seq: u64, result: Result<TagDocument, String>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(doc) => {
                self.document = Some(doc);
                self.error = None;
            }
            Err(message) => {
                self.document = None;
                self.error = Some(message);
            }
        }
        true
    }

    /// Page entries that carry at least one tag of the selected type.
    #[must_use]
    pub fn page_entries(&self) -> Vec<PageTags> {
        let Some(doc) = &self.document else {
            return Vec::new();
        };
        let needle = self.query.trim().to_lowercase();
        doc.pages
            .iter()
            .map(|page| PageTags {
                tags: page
                    .tags
                    .iter()
                    .filter(|t| self.filter.matches(t.kind))
                    .filter(|t| needle.is_empty() || t.value.to_lowercase().contains(&needle))
                    .cloned()
                    .collect(),
                ..page.clone()
            })
            .filter(|page| !page.tags.is_empty())
            .collect()
    }

    /// Aggregated tags of the selected type matching the text filter.
    #[must_use]
    pub fn summaries(&self) -> Vec<TagSummary> {
        let Some(doc) = &self.document else {
            return Vec::new();
        };
        let mut all = aggregate(doc);
        all.retain(|s| self.filter.matches(s.kind));
        if self.order == RecurrenceOrder::Asc {
            all.reverse();
        }
        filter_by_value(&all, &self.query).into_iter().cloned().collect()
    }
}
