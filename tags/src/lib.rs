//! Named-entity tag model and REST endpoint layout.
//!
//! This crate owns the JSON shape returned by the NER tag service and the URL
//! templates used to query it. It is shared by the browser `client` and has
//! no browser dependencies so it can be tested natively.
//!
//! Every endpoint returns a [`TagDocument`]: a `pages` array where each entry
//! is either a single page (`pageOrder`) or a page range (`firstPage` /
//! `lastPage`) together with the tags found there.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when decoding tag responses or parsing persisted filter values.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The response body is not a valid tag document.
    #[error("failed to decode tag response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The tag service answered with a non-success HTTP status.
    #[error("tag request failed: {status} {status_text}")]
    Http { status: u16, status_text: String },
    /// A tag type name is not one of the known entity types.
    #[error("invalid tag type: {0}")]
    InvalidType(String),
    /// A recurrence order is neither `asc` nor `desc`.
    #[error("invalid recurrence order: {0}")]
    InvalidOrder(String),
}

impl TagError {
    #[must_use]
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http { status, status_text: status_text.into() }
    }
}

/// Entity type of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NerType {
    #[serde(alias = "PERSON")]
    Person,
    #[serde(alias = "LOCATION")]
    Location,
    #[serde(alias = "CORPORATION")]
    Corporation,
    #[serde(alias = "EVENT")]
    Event,
    #[serde(alias = "MISC")]
    Misc,
}

impl NerType {
    /// All entity types in display order.
    pub const ALL: [Self; 5] = [Self::Person, Self::Location, Self::Corporation, Self::Event, Self::Misc];

    /// Lowercase name used in URLs and storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Location => "location",
            Self::Corporation => "corporation",
            Self::Event => "event",
            Self::Misc => "misc",
        }
    }
}

impl fmt::Display for NerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NerType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TagError::InvalidType(s.to_owned()))
    }
}

/// Type restriction applied to a query. `All` is written as `-` in URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(NerType),
}

impl TypeFilter {
    /// Path segment for this filter.
    #[must_use]
    pub fn as_segment(self) -> &'static str {
        match self {
            Self::All => "-",
            Self::Only(t) => t.as_str(),
        }
    }

    #[must_use]
    pub fn matches(self, kind: NerType) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => t == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

impl FromStr for TypeFilter {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "-" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// Sort order of the recurrence endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecurrenceOrder {
    Asc,
    #[default]
    Desc,
}

impl RecurrenceOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for RecurrenceOrder {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(TagError::InvalidOrder(s.to_owned())),
        }
    }
}

/// One tag occurrence as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "type")]
    pub kind: NerType,
    pub value: String,
    /// Number of occurrences within the enclosing page entry.
    #[serde(default = "one")]
    pub counter: u32,
}

fn one() -> u32 {
    1
}

/// Wire form of a tag before its type name is checked.
#[derive(Deserialize)]
struct RawTag {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default = "one")]
    counter: u32,
}

/// Decode a tag list, dropping tags whose type is not a known entity type.
fn known_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawTag>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|t| match t.kind.parse::<NerType>() {
            Ok(kind) => Some(Tag { kind, value: t.value, counter: t.counter }),
            Err(err) => {
                log::debug!("skipping tag {:?}: {err}", t.value);
                None
            }
        })
        .collect())
}

/// Tags found on a single page or within a page range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
    #[serde(default, deserialize_with = "known_tags")]
    pub tags: Vec<Tag>,
}

impl PageTags {
    /// First page covered by this entry.
    #[must_use]
    pub fn first(&self) -> Option<u32> {
        self.first_page.or(self.page_order)
    }

    /// Last page covered by this entry.
    #[must_use]
    pub fn last(&self) -> Option<u32> {
        self.last_page.or(self.page_order).or(self.first_page)
    }

    /// Human-readable page label: `"7"` for a single page, `"1 - 10"` for a range.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) if a != b => format!("{a} - {b}"),
            (Some(a), _) | (None, Some(a)) => a.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Response body shared by all tag endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDocument {
    #[serde(default)]
    pub pages: Vec<PageTags>,
}

impl TagDocument {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Decode`] when `raw` is not a tag document.
    pub fn decode(raw: &str) -> Result<Self, TagError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Total number of tag entries across all pages.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.pages.iter().map(|p| p.tags.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_count() == 0
    }
}

/// One of the tag service queries, without base URL and record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Every tag of the record, page by page.
    All,
    /// Tags grouped into consecutive page ranges of `range` pages.
    Ranges { range: u32, filter: TypeFilter },
    /// Tags of one type, page by page.
    ByType { filter: TypeFilter },
    /// Tags ordered by how often they recur across the record.
    Recurrence { filter: TypeFilter, order: RecurrenceOrder },
    /// Tags on pages `start..=end`.
    Pages { start: u32, end: u32, filter: TypeFilter },
}

impl Endpoint {
    /// Full URL of this query for record `pi` on the server at `base`.
    #[must_use]
    pub fn url(&self, base: &str, pi: &str) -> String {
        let root = format!("{}/rest/ner/tags", base.trim_end_matches('/'));
        match self {
            Self::All => format!("{root}/{pi}/"),
            Self::Ranges { range, filter } => format!("{root}/ranges/{range}/{filter}/{pi}/"),
            Self::ByType { filter } => format!("{root}/{filter}/{pi}/"),
            Self::Recurrence { filter, order } => format!("{root}/recurrence/{filter}/{}/{pi}/", order.as_str()),
            Self::Pages { start, end, filter } => format!("{root}/{start}/{end}/{filter}/{pi}/"),
        }
    }
}

/// Counters of one `(type, value)` pair summed across a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSummary {
    pub kind: NerType,
    pub value: String,
    pub count: u32,
    /// First page of every entry the tag occurs in, ascending and deduplicated.
    pub pages: Vec<u32>,
}

/// Sum counters per `(type, value)` across all pages.
///
/// The result is sorted by descending count, then by value, then by type.
#[must_use]
pub fn aggregate(doc: &TagDocument) -> Vec<TagSummary> {
    let mut by_key: BTreeMap<(NerType, &str), TagSummary> = BTreeMap::new();
    for page in &doc.pages {
        for tag in &page.tags {
            let entry = by_key.entry((tag.kind, tag.value.as_str())).or_insert_with(|| TagSummary {
                kind: tag.kind,
                value: tag.value.clone(),
                count: 0,
                pages: Vec::new(),
            });
            entry.count = entry.count.saturating_add(tag.counter);
            if let Some(p) = page.first() {
                entry.pages.push(p);
            }
        }
    }

    let mut out: Vec<TagSummary> = by_key.into_values().collect();
    for summary in &mut out {
        summary.pages.sort_unstable();
        summary.pages.dedup();
    }
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)).then(a.kind.cmp(&b.kind)));
    out
}

/// Summaries whose value contains `query`, ignoring case. An empty query keeps everything.
#[must_use]
pub fn filter_by_value<'a>(tags: &'a [TagSummary], query: &str) -> Vec<&'a TagSummary> {
    let needle = query.trim().to_lowercase();
    tags.iter().filter(|t| needle.is_empty() || t.value.to_lowercase().contains(&needle)).collect()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
