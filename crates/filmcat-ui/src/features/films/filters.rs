//! Film filter state and its URL query-string form.
//!
//! # Design
//! - The URL is the source of truth: the page parses it on every location
//!   change and writes it back on apply/page change.
//! - Only non-default values are serialized, in a fixed parameter order, so
//!   equal filter states always produce equal URLs.
//! - Ranges are clamped into their bounds and reordered so `min <= max`.

use crate::core::logic::{encode_pairs, join_ids, parse_id_list, parse_query};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Fixed number of films requested per page.
pub const PAGE_SIZE: u32 = 9;

/// Inclusive bounds of a numeric range filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeBounds {
    /// Smallest allowed value.
    pub floor: u32,
    /// Largest allowed value.
    pub ceil: u32,
}

/// Rating scale bounds.
pub const RATING_BOUNDS: RangeBounds = RangeBounds { floor: 0, ceil: 100 };
/// Duration bounds in minutes.
pub const DURATION_BOUNDS: RangeBounds = RangeBounds { floor: 0, ceil: 300 };

/// A `[min, max]` range kept inside its bounds with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeFilter {
    min: u32,
    max: u32,
    bounds: RangeBounds,
}

impl RangeFilter {
    /// Full range covering all of `bounds`.
    #[must_use]
    pub const fn full(bounds: RangeBounds) -> Self {
        Self {
            min: bounds.floor,
            max: bounds.ceil,
            bounds,
        }
    }

    /// Build a range, clamping both ends and swapping them when inverted.
    #[must_use]
    pub fn new(min: u32, max: u32, bounds: RangeBounds) -> Self {
        let min = min.clamp(bounds.floor, bounds.ceil);
        let max = max.clamp(bounds.floor, bounds.ceil);
        Self {
            min: min.min(max),
            max: min.max(max),
            bounds,
        }
    }

    /// Lower end.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Upper end.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Bounds this range is clamped to.
    #[must_use]
    pub const fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    fn min_is_default(&self) -> bool {
        self.min == self.bounds.floor
    }

    fn max_is_default(&self) -> bool {
        self.max == self.bounds.ceil
    }
}

/// Field the film list is ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    /// Alphabetical by title.
    Title,
    /// By aggregate rating.
    Rating,
    /// By release date.
    ReleaseDate,
    /// By running time.
    Duration,
}

impl SortField {
    /// Every sortable field, in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Title, Self::Rating, Self::ReleaseDate, Self::Duration]
    }

    /// Wire name used in `sort_by`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::ReleaseDate => "release_date",
            Self::Duration => "duration",
        }
    }

    /// Parse a `sort_by` value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|field| field.as_str() == raw.trim())
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending (default).
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire name used in `order`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse an `order` value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// How the current filters should be fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchPlan {
    /// Free-text search; every other filter is ignored.
    Search(String),
    /// Structured listing with the given request query.
    List(String),
}

/// Criteria used to query the film catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilmFilters {
    /// Selected genre ids.
    pub genre_ids: BTreeSet<u32>,
    /// Selected actor ids.
    pub actor_ids: BTreeSet<u32>,
    /// Producer name filter.
    pub producer: String,
    /// Rating range on the 0–100 scale.
    pub rating: RangeFilter,
    /// Duration range in minutes.
    pub duration: RangeFilter,
    /// Earliest release date.
    pub min_date: Option<NaiveDate>,
    /// Latest release date.
    pub max_date: Option<NaiveDate>,
    /// Sort field; `None` leaves ordering to the API.
    pub sort_by: Option<SortField>,
    /// Sort direction.
    pub order: SortOrder,
    /// Free-text search.
    pub query: String,
    /// One-based page number.
    pub page: u32,
}

impl Default for FilmFilters {
    fn default() -> Self {
        Self {
            genre_ids: BTreeSet::new(),
            actor_ids: BTreeSet::new(),
            producer: String::new(),
            rating: RangeFilter::full(RATING_BOUNDS),
            duration: RangeFilter::full(DURATION_BOUNDS),
            min_date: None,
            max_date: None,
            sort_by: None,
            order: SortOrder::Desc,
            query: String::new(),
            page: 1,
        }
    }
}

impl FilmFilters {
    /// Parse a location query string. Unknown keys, invalid values and
    /// `page_size` are ignored.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let mut filters = Self::default();
        let (mut min_rating, mut max_rating) = (RATING_BOUNDS.floor, RATING_BOUNDS.ceil);
        let (mut min_duration, mut max_duration) = (DURATION_BOUNDS.floor, DURATION_BOUNDS.ceil);
        for (key, value) in parse_query(raw) {
            match key.as_str() {
                "page" => {
                    filters.page = value.trim().parse().ok().filter(|page| *page >= 1).unwrap_or(1);
                }
                "genre_ids" => filters.genre_ids = parse_id_list(&value),
                "actor_ids" => filters.actor_ids = parse_id_list(&value),
                "producer" => filters.producer = value.trim().to_string(),
                "min_rating" => min_rating = parse_bound(&value, min_rating),
                "max_rating" => max_rating = parse_bound(&value, max_rating),
                "min_duration" => min_duration = parse_bound(&value, min_duration),
                "max_duration" => max_duration = parse_bound(&value, max_duration),
                "min_date" => filters.min_date = parse_date(&value),
                "max_date" => filters.max_date = parse_date(&value),
                "sort_by" => filters.sort_by = SortField::parse(&value),
                "order" => filters.order = SortOrder::parse(&value).unwrap_or_default(),
                "query" => filters.query = value.trim().to_string(),
                _ => {}
            }
        }
        filters.rating = RangeFilter::new(min_rating, max_rating, RATING_BOUNDS);
        filters.duration = RangeFilter::new(min_duration, max_duration, DURATION_BOUNDS);
        filters.set_dates(filters.min_date, filters.max_date);
        filters
    }

    /// URL query for the list view: non-default values only, `page` when > 1.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs = self.filter_pairs();
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        encode(&pairs)
    }

    /// Request query for the list endpoint: non-default filters plus paging.
    #[must_use]
    pub fn api_query(&self) -> String {
        let mut pairs = self.filter_pairs();
        pairs.push(("page", self.page.to_string()));
        pairs.push(("page_size", PAGE_SIZE.to_string()));
        encode(&pairs)
    }

    /// Decide between free-text search and the structured listing.
    #[must_use]
    pub fn fetch_plan(&self) -> FetchPlan {
        let text = self.query.trim();
        if text.is_empty() {
            FetchPlan::List(self.api_query())
        } else {
            FetchPlan::Search(text.to_string())
        }
    }

    /// Copy of these filters positioned at `page` (at least 1).
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Whether any criterion differs from the defaults (paging aside).
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.with_page(1) != Self::default()
    }

    /// Set the producer filter, dropping surrounding whitespace.
    pub fn set_producer(&mut self, producer: &str) {
        producer.trim().clone_into(&mut self.producer);
    }

    /// Set the rating range, clamped and ordered.
    pub fn set_rating(&mut self, min: u32, max: u32) {
        self.rating = RangeFilter::new(min, max, RATING_BOUNDS);
    }

    /// Set the duration range, clamped and ordered.
    pub fn set_duration(&mut self, min: u32, max: u32) {
        self.duration = RangeFilter::new(min, max, DURATION_BOUNDS);
    }

    /// Set the release-date range, swapping inverted ends.
    pub fn set_dates(&mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) {
        match (min, max) {
            (Some(start), Some(end)) if start > end => {
                self.min_date = Some(end);
                self.max_date = Some(start);
            }
            _ => {
                self.min_date = min;
                self.max_date = max;
            }
        }
    }

    /// Flip the sort direction.
    pub fn toggle_order(&mut self) {
        self.order = self.order.toggle();
    }

    fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.genre_ids.is_empty() {
            pairs.push(("genre_ids", join_ids(&self.genre_ids)));
        }
        if !self.actor_ids.is_empty() {
            pairs.push(("actor_ids", join_ids(&self.actor_ids)));
        }
        let producer = self.producer.trim();
        if !producer.is_empty() {
            pairs.push(("producer", producer.to_string()));
        }
        if !self.rating.min_is_default() {
            pairs.push(("min_rating", self.rating.min().to_string()));
        }
        if !self.rating.max_is_default() {
            pairs.push(("max_rating", self.rating.max().to_string()));
        }
        if let Some(date) = self.min_date {
            pairs.push(("min_date", date.to_string()));
        }
        if let Some(date) = self.max_date {
            pairs.push(("max_date", date.to_string()));
        }
        if !self.duration.min_is_default() {
            pairs.push(("min_duration", self.duration.min().to_string()));
        }
        if !self.duration.max_is_default() {
            pairs.push(("max_duration", self.duration.max().to_string()));
        }
        if let Some(field) = self.sort_by {
            pairs.push(("sort_by", field.as_str().to_string()));
        }
        if self.order != SortOrder::default() {
            pairs.push(("order", self.order.as_str().to_string()));
        }
        let query = self.query.trim();
        if !query.is_empty() {
            pairs.push(("query", query.to_string()));
        }
        pairs
    }
}

fn encode(pairs: &[(&'static str, String)]) -> String {
    encode_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}

fn parse_bound(raw: &str, fallback: u32) -> u32 {
    raw.trim().parse().unwrap_or(fallback)
}

/// Parse a `YYYY-MM-DD` date, ignoring any time component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn empty_query_yields_defaults() {
        let filters = FilmFilters::from_query("");
        assert_eq!(filters, FilmFilters::default());
        assert_eq!(filters.page, 1);
        assert_eq!(filters.order, SortOrder::Desc);
        assert_eq!(filters.to_query(), "");
    }

    #[test]
    fn rating_range_serializes_without_duration() {
        let mut filters = FilmFilters::default();
        filters.set_rating(30, 80);
        assert_eq!(filters.to_query(), "min_rating=30&max_rating=80");
    }

    #[test]
    fn defaults_never_appear_in_query() {
        let mut filters = FilmFilters::default();
        filters.set_duration(0, 300);
        filters.producer = "   ".to_string();
        filters.order = SortOrder::Desc;
        let query = filters.to_query();
        for key in ["min_duration", "max_duration", "producer", "order", "page", "page_size"] {
            assert!(!query.contains(key), "{key} leaked into {query:?}");
        }
    }

    #[test]
    fn non_default_values_round_trip_in_fixed_order() {
        let mut filters = FilmFilters::default();
        filters.genre_ids = [5, 2].into_iter().collect();
        filters.actor_ids = [9].into_iter().collect();
        filters.producer = "Mosfilm".to_string();
        filters.set_rating(10, 100);
        filters.set_dates(Some(date("1970-01-01")), Some(date("1989-12-31")));
        filters.set_duration(60, 180);
        filters.sort_by = Some(SortField::ReleaseDate);
        filters.order = SortOrder::Asc;
        filters.page = 3;

        let query = filters.to_query();
        assert_eq!(
            query,
            "genre_ids=2%2C5&actor_ids=9&producer=Mosfilm&min_rating=10&min_date=1970-01-01\
             &max_date=1989-12-31&min_duration=60&max_duration=180&sort_by=release_date\
             &order=asc&page=3"
        );
        assert_eq!(FilmFilters::from_query(&query), filters);
    }

    #[test]
    fn parsing_tolerates_invalid_values() {
        let filters = FilmFilters::from_query(
            "?page=0&page_size=50&min_rating=abc&max_rating=500&order=sideways&sort_by=mood\
             &min_date=not-a-date&genre_ids=1,x,3&unknown=1",
        );
        assert_eq!(filters.page, 1);
        assert_eq!(filters.rating, RangeFilter::new(0, 100, RATING_BOUNDS));
        assert_eq!(filters.order, SortOrder::Desc);
        assert_eq!(filters.sort_by, None);
        assert_eq!(filters.min_date, None);
        assert_eq!(filters.genre_ids.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn ranges_clamp_and_reorder() {
        let range = RangeFilter::new(250, 40, DURATION_BOUNDS);
        assert_eq!((range.min(), range.max()), (40, 250));
        let range = RangeFilter::new(120, 90, RATING_BOUNDS);
        assert_eq!((range.min(), range.max()), (90, 100));

        let filters = FilmFilters::from_query("min_date=2000-05-01&max_date=1999-01-01T00:00:00Z");
        assert_eq!(filters.min_date, Some(date("1999-01-01")));
        assert_eq!(filters.max_date, Some(date("2000-05-01")));
    }

    #[test]
    fn plus_decodes_to_space_in_free_text() {
        let filters = FilmFilters::from_query("query=star+wars");
        assert_eq!(filters.query, "star wars");
        assert_eq!(filters.fetch_plan(), FetchPlan::Search("star wars".to_string()));
    }

    #[test]
    fn api_query_always_carries_paging() {
        let filters = FilmFilters::default();
        assert_eq!(filters.api_query(), "page=1&page_size=9");
        let mut filters = FilmFilters::from_query("genre_ids=4&page=2");
        assert_eq!(
            filters.fetch_plan(),
            FetchPlan::List("genre_ids=4&page=2&page_size=9".to_string())
        );
        filters.query = "  ".to_string();
        assert!(matches!(filters.fetch_plan(), FetchPlan::List(_)));
    }

    #[test]
    fn with_page_keeps_other_filters() {
        let filters = FilmFilters::from_query("producer=Lenfilm&order=asc");
        let next = filters.with_page(2);
        assert_eq!(next.to_query(), "producer=Lenfilm&order=asc&page=2");
        assert_eq!(filters.with_page(0).page, 1);
        assert!(filters.is_filtered());
        assert!(!FilmFilters::default().with_page(4).is_filtered());
    }

    #[test]
    fn padded_text_survives_url_round_trip() {
        let mut filters = FilmFilters::default();
        filters.set_producer("  Mosfilm ");
        assert_eq!(filters.producer, "Mosfilm");
        assert_eq!(FilmFilters::from_query(&filters.to_query()), filters);

        let parsed = FilmFilters::from_query("producer=+Lenfilm+&query=%20solaris%20");
        assert_eq!(parsed.producer, "Lenfilm");
        assert_eq!(parsed.query, "solaris");
        assert_eq!(FilmFilters::from_query(&parsed.to_query()), parsed);
    }

    #[test]
    fn order_toggles() {
        let mut filters = FilmFilters::default();
        filters.toggle_order();
        assert_eq!(filters.order, SortOrder::Asc);
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortField::parse("rating"), Some(SortField::Rating));
    }
}
