//! Core types for movie search and metadata aggregation.

use serde::{Deserialize, Serialize};

/// Title categories the provider can filter a search by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    /// Feature film
    Movie,
    /// TV series
    Series,
    /// Single TV episode
    Episode,
}

impl TitleKind {
    /// Wire value for the provider's `type` query parameter.
    pub fn as_query_param(self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "series",
            TitleKind::Episode => "episode",
        }
    }
}

impl std::str::FromStr for TitleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(TitleKind::Movie),
            "series" => Ok(TitleKind::Series),
            "episode" => Ok(TitleKind::Episode),
            _ => Err(format!("Invalid title kind: {s}")),
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_param())
    }
}

/// Parameters for one aggregated title search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Title text to search for
    pub title: String,
    /// Raw year filter; forwarded to the provider only when it is all digits
    pub year: Option<String>,
    /// Optional title category filter
    pub kind: Option<TitleKind>,
    /// Inclusive lower bound of the IMDb rating filter
    pub min_rating: f64,
    /// Inclusive upper bound of the IMDb rating filter
    pub max_rating: f64,
}

impl SearchQuery {
    /// Creates a query for `title` with no year, kind, or rating constraints.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            kind: None,
            min_rating: 0.0,
            max_rating: 10.0,
        }
    }

    /// Sets the year filter.
    #[must_use]
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the title category filter.
    #[must_use]
    pub fn kind(mut self, kind: TitleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts results to ratings within `[min, max]` inclusive.
    #[must_use]
    pub fn rating_range(mut self, min: f64, max: f64) -> Self {
        self.min_rating = min;
        self.max_rating = max;
        self
    }

    /// True when the rating range actually excludes anything.
    ///
    /// The full `[0, 10]` span disables rating filtering, and with it the
    /// per-result detail lookups during aggregation.
    pub fn filters_by_rating(&self) -> bool {
        !(self.min_rating <= 0.0 && self.max_rating >= 10.0)
    }
}

/// Minimal search record from the provider's title-search endpoint.
///
/// Display fields fall back to the empty string when the provider omits
/// them; a missing `imdbID` marks the hit as unusable for enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    /// Provider identifier for the title
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    /// Display title
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Release year or year range, as the provider formats it
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Title category (`movie`, `series`, ...)
    #[serde(rename = "Type", default)]
    pub kind: String,
    /// Poster image URL
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

/// Full provider record for a single title.
///
/// Every field is optional: the provider substitutes `"N/A"` rather than
/// omitting keys, but malformed records must never abort a search. The
/// per-source rating entries stay in wire form for
/// [`crate::ratings::transform_ratings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Provider identifier
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    /// Display title
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    /// Release year or year range
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    /// Title category
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    /// Runtime as the provider formats it, e.g. `"142 min"`
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    /// Genre list as a comma-separated string
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    /// Director credit
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    /// Main cast as a comma-separated string
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    /// Plot summary
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    /// Poster image URL
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    /// Aggregated rating as the provider formats it (possibly `"N/A"`)
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    /// Per-source rating entries in wire form
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<serde_json::Value>,
}

/// Validated parameters for a single search-page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Title text forwarded to the provider
    pub title: String,
    /// 1-based page number
    pub page: u32,
    /// Year filter, present only when the raw input survived validation
    pub year: Option<String>,
    /// Title category filter
    pub kind: Option<TitleKind>,
}

impl PageRequest {
    /// Builds the request for `page`, applying the query's filter rules.
    ///
    /// The year is forwarded only when it is non-empty and all ASCII
    /// digits after trimming; anything else is dropped silently rather
    /// than failing the search.
    pub fn for_query(query: &SearchQuery, page: u32) -> Self {
        let year = query
            .year
            .as_deref()
            .map(str::trim)
            .filter(|y| !y.is_empty() && y.bytes().all(|b| b.is_ascii_digit()))
            .map(str::to_string);

        Self {
            title: query.title.clone(),
            page,
            year,
            kind: query.kind,
        }
    }
}

/// One decoded page of title-search results.
///
/// The provider answers failures as well-formed JSON, so a fetched page is
/// either a list of hits or an explicit rejection; transport problems
/// surface as [`crate::errors::FetchError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPage {
    /// Page carrying hits plus the provider's reported total match count.
    Hits {
        /// Hits on this page, in provider order
        hits: Vec<RawHit>,
        /// Total matches the provider claims across all pages; zero when
        /// the reported value is missing or unparseable
        total_results: u32,
    },
    /// Well-formed provider failure, e.g. `"Movie not found!"`.
    Rejected {
        /// Provider's error message
        message: String,
    },
}

/// A search hit as returned to the caller, optionally merged with its
/// detail record.
///
/// `rating_numeric` is present exactly when `rating_display` held a
/// numeric-parseable value; a result never carries one without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResult {
    /// Provider identifier
    pub imdb_id: Option<String>,
    /// Display title
    pub title: String,
    /// Release year or year range
    pub year: String,
    /// Title category
    pub kind: String,
    /// Poster URL; the detail record's poster once enrichment ran
    pub poster: Option<String>,
    /// Plot summary (enriched results only)
    pub plot: Option<String>,
    /// Director credit (enriched results only)
    pub director: Option<String>,
    /// Main cast (enriched results only)
    pub actors: Option<String>,
    /// Genre list (enriched results only)
    pub genre: Option<String>,
    /// Runtime (enriched results only)
    pub runtime: Option<String>,
    /// Aggregated rating exactly as the provider returned it
    pub rating_display: Option<String>,
    /// Parsed numeric rating
    pub rating_numeric: Option<f64>,
}

impl EnrichedResult {
    /// Wraps a raw hit without detail data.
    ///
    /// Used on the fast path where the rating filter is disabled and no
    /// detail lookups run; all detail and rating fields stay absent.
    pub fn raw(hit: RawHit) -> Self {
        Self {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            kind: hit.kind,
            poster: hit.poster,
            plot: None,
            director: None,
            actors: None,
            genre: None,
            runtime: None,
            rating_display: None,
            rating_numeric: None,
        }
    }

    /// Merges a hit with its detail record and already-parsed rating.
    ///
    /// The detail record's poster replaces the search hit's when present,
    /// matching the richer image the provider serves on its detail
    /// endpoint.
    pub fn enriched(hit: RawHit, detail: DetailRecord, rating: f64) -> Self {
        Self {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            kind: hit.kind,
            poster: detail.poster.or(hit.poster),
            plot: detail.plot,
            director: detail.director,
            actors: detail.actors,
            genre: detail.genre,
            runtime: detail.runtime,
            rating_display: detail.imdb_rating,
            rating_numeric: Some(rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn hit(id: &str) -> RawHit {
        RawHit {
            imdb_id: Some(id.to_string()),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            kind: "movie".to_string(),
            poster: Some("http://img.example/search.jpg".to_string()),
        }
    }

    #[test]
    fn test_title_kind_parsing() {
        assert_eq!(TitleKind::from_str("movie").unwrap(), TitleKind::Movie);
        assert_eq!(TitleKind::from_str("Series").unwrap(), TitleKind::Series);
        assert_eq!(TitleKind::from_str("EPISODE").unwrap(), TitleKind::Episode);
        assert!(TitleKind::from_str("documentary").is_err());
    }

    #[test]
    fn test_filters_by_rating_full_span_is_inactive() {
        let query = SearchQuery::new("dune");
        assert!(!query.filters_by_rating());

        let query = SearchQuery::new("dune").rating_range(-1.0, 11.0);
        assert!(!query.filters_by_rating());
    }

    #[test]
    fn test_filters_by_rating_narrowed_span_is_active() {
        assert!(SearchQuery::new("dune").rating_range(0.1, 10.0).filters_by_rating());
        assert!(SearchQuery::new("dune").rating_range(0.0, 9.9).filters_by_rating());
        assert!(SearchQuery::new("dune").rating_range(7.0, 9.0).filters_by_rating());
    }

    #[test]
    fn test_page_request_keeps_valid_year() {
        let query = SearchQuery::new("dune").year(" 2021 ");
        let request = PageRequest::for_query(&query, 1);

        assert_eq!(request.year.as_deref(), Some("2021"));
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_page_request_drops_invalid_year() {
        for bad_year in ["", "  ", "20x1", "twenty", "2021a"] {
            let query = SearchQuery::new("dune").year(bad_year);
            let request = PageRequest::for_query(&query, 1);

            assert_eq!(request.year, None, "year {bad_year:?} should be dropped");
        }
    }

    #[test]
    fn test_page_request_forwards_kind() {
        let query = SearchQuery::new("dune").kind(TitleKind::Series);
        let request = PageRequest::for_query(&query, 2);

        assert_eq!(request.kind, Some(TitleKind::Series));
        assert_eq!(request.page, 2);
    }

    #[test]
    fn test_raw_hit_decodes_provider_fields() {
        let json = r#"{
            "Title": "Dune",
            "Year": "2021",
            "imdbID": "tt1160419",
            "Type": "movie",
            "Poster": "http://img.example/dune.jpg"
        }"#;

        let hit: RawHit = serde_json::from_str(json).unwrap();

        assert_eq!(hit.imdb_id.as_deref(), Some("tt1160419"));
        assert_eq!(hit.title, "Dune");
        assert_eq!(hit.year, "2021");
        assert_eq!(hit.kind, "movie");
        assert_eq!(hit.poster.as_deref(), Some("http://img.example/dune.jpg"));
    }

    #[test]
    fn test_raw_hit_tolerates_missing_fields() {
        let hit: RawHit = serde_json::from_str("{}").unwrap();

        assert_eq!(hit.imdb_id, None);
        assert_eq!(hit.title, "");
        assert_eq!(hit.year, "");
        assert_eq!(hit.kind, "");
        assert_eq!(hit.poster, None);
    }

    #[test]
    fn test_detail_record_decodes_ratings_list() {
        let json = r#"{
            "Title": "Inception",
            "imdbRating": "8.8",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.8/10"}
            ]
        }"#;

        let record: DetailRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.imdb_rating.as_deref(), Some("8.8"));
        assert_eq!(record.ratings.len(), 1);
        assert_eq!(record.title.as_deref(), Some("Inception"));
        assert_eq!(record.director, None);
    }

    #[test]
    fn test_raw_result_carries_no_detail_fields() {
        let result = EnrichedResult::raw(hit("tt1375666"));

        assert_eq!(result.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(result.title, "Inception");
        assert_eq!(result.poster.as_deref(), Some("http://img.example/search.jpg"));
        assert_eq!(result.plot, None);
        assert_eq!(result.rating_display, None);
        assert_eq!(result.rating_numeric, None);
    }

    #[test]
    fn test_enriched_result_prefers_detail_poster() {
        let detail = DetailRecord {
            poster: Some("http://img.example/detail.jpg".to_string()),
            plot: Some("A thief who steals corporate secrets.".to_string()),
            imdb_rating: Some("8.8".to_string()),
            ..DetailRecord::default()
        };

        let result = EnrichedResult::enriched(hit("tt1375666"), detail, 8.8);

        assert_eq!(result.poster.as_deref(), Some("http://img.example/detail.jpg"));
        assert_eq!(result.rating_display.as_deref(), Some("8.8"));
        assert_eq!(result.rating_numeric, Some(8.8));
        assert_eq!(result.plot.as_deref(), Some("A thief who steals corporate secrets."));
    }

    #[test]
    fn test_enriched_result_falls_back_to_hit_poster() {
        let detail = DetailRecord {
            imdb_rating: Some("8.8".to_string()),
            ..DetailRecord::default()
        };

        let result = EnrichedResult::enriched(hit("tt1375666"), detail, 8.8);

        assert_eq!(result.poster.as_deref(), Some("http://img.example/search.jpg"));
    }
}
