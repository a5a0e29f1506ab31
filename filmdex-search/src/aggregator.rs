//! Aggregated movie search: paginated fetch, enrichment, rating filter.

use std::sync::Arc;

use filmdex_core::FilmdexConfig;
use filmdex_core::pacing::{FixedDelayPacer, RequestPacer};

use crate::errors::{FetchError, SearchError};
use crate::providers::{MovieProvider, OmdbClient};
use crate::types::{EnrichedResult, PageRequest, RawHit, SearchPage, SearchQuery};

/// Hits the provider returns per search page; drives the early paging stop.
pub const PROVIDER_PAGE_SIZE: u32 = 10;

/// Hard cap on pages requested per search.
pub const MAX_SEARCH_PAGES: u32 = 2;

/// Candidate collection stops once this many raw hits have accumulated.
pub const MAX_INITIAL_CANDIDATES: usize = 20;

/// Upper bound on results returned to the caller.
pub const MAX_RESULTS: usize = 15;

/// Aggregated movie search over a metadata provider.
///
/// Collects up to two pages of raw hits, enriches each hit with its detail
/// record when a rating filter is active, and caps the result list at
/// [`MAX_RESULTS`]. Detail lookups run strictly sequentially with a pacing
/// pause after every attempt.
#[derive(Debug, Clone)]
pub struct MovieSearch {
    provider: Arc<dyn MovieProvider>,
    pacer: Arc<dyn RequestPacer>,
}

impl MovieSearch {
    /// Creates a search pipeline over the given provider and pacer.
    pub fn new(provider: Arc<dyn MovieProvider>, pacer: Arc<dyn RequestPacer>) -> Self {
        Self { provider, pacer }
    }

    /// Creates the production pipeline: OMDb client plus fixed-delay pacing.
    ///
    /// # Errors
    /// - `FetchError::Unexpected` - OMDb client construction failed
    pub fn from_config(config: &FilmdexConfig) -> Result<Self, FetchError> {
        let provider = OmdbClient::new(config.provider.clone())?;

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(FixedDelayPacer::new(config.search.detail_pacing)),
        ))
    }

    /// Runs the full search pipeline for `query`.
    ///
    /// Returns an empty list for an empty title or a provider with no
    /// matches, and at most [`MAX_RESULTS`] results otherwise. A failure
    /// on the first page aborts the search; later page failures only stop
    /// candidate collection.
    ///
    /// # Errors
    /// - `SearchError::MissingApiKey` - Provider has no credential (checked before any request)
    /// - `SearchError::SearchFailed` - First search page could not be fetched
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<EnrichedResult>, SearchError> {
        if !self.provider.is_configured() {
            return Err(SearchError::MissingApiKey);
        }

        if query.title.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.collect_candidates(query).await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        if !query.filters_by_rating() {
            // Wide-open rating range: the raw hits are enough, skip the
            // per-item detail lookups entirely.
            return Ok(candidates
                .into_iter()
                .take(MAX_RESULTS)
                .map(EnrichedResult::raw)
                .collect());
        }

        Ok(self.enrich_and_filter(query, candidates).await)
    }

    /// Collects raw hits across up to [`MAX_SEARCH_PAGES`] pages.
    async fn collect_candidates(&self, query: &SearchQuery) -> Result<Vec<RawHit>, SearchError> {
        let mut candidates: Vec<RawHit> = Vec::new();
        let mut reported_total = 0u32;

        for page in 1..=MAX_SEARCH_PAGES {
            if page > 1 && candidates.len() >= MAX_INITIAL_CANDIDATES {
                break;
            }

            let request = PageRequest::for_query(query, page);

            match self.provider.search_page(&request).await {
                Ok(SearchPage::Hits {
                    hits,
                    total_results,
                }) => {
                    candidates.extend(hits);
                    if page == 1 {
                        reported_total = total_results;
                    }
                    // The provider has nothing beyond this page.
                    if reported_total <= page * PROVIDER_PAGE_SIZE {
                        break;
                    }
                }
                Ok(SearchPage::Rejected { message }) => {
                    // A well-formed miss for this page; later pages may
                    // still answer.
                    tracing::debug!(
                        "Search page {page} rejected for '{}': {message}",
                        query.title
                    );
                }
                Err(error) if page == 1 => {
                    tracing::warn!("Search failed for '{}': {error}", query.title);
                    return Err(match error {
                        FetchError::MissingApiKey => SearchError::MissingApiKey,
                        other => SearchError::SearchFailed {
                            query: query.title.clone(),
                            reason: other.to_string(),
                        },
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        "Search page {page} failed for '{}', keeping {} hits: {error}",
                        query.title,
                        candidates.len()
                    );
                    break;
                }
            }
        }

        Ok(candidates)
    }

    /// Enriches candidates one at a time, filtering by the rating range.
    async fn enrich_and_filter(
        &self,
        query: &SearchQuery,
        candidates: Vec<RawHit>,
    ) -> Vec<EnrichedResult> {
        let mut results = Vec::new();

        for hit in candidates {
            if results.len() >= MAX_RESULTS {
                break;
            }

            let Some(imdb_id) = hit.imdb_id.clone() else {
                tracing::debug!("Skipping search hit without an IMDb id: '{}'", hit.title);
                continue;
            };

            let detail = self.provider.movie_by_id(&imdb_id).await;
            // Pacing covers every detail attempt, including lookups that
            // returned nothing or fall outside the rating range.
            self.pacer.pause().await;

            let Some(detail) = detail else {
                continue;
            };

            match parse_rating(detail.imdb_rating.as_deref()) {
                Some(rating) if query.min_rating <= rating && rating <= query.max_rating => {
                    results.push(EnrichedResult::enriched(hit, detail, rating));
                }
                Some(rating) => {
                    tracing::debug!("Excluding {imdb_id}: rating {rating} outside range");
                }
                None => {
                    tracing::debug!("Excluding {imdb_id}: no parseable rating");
                }
            }
        }

        results.truncate(MAX_RESULTS);
        results
    }
}

/// Parses the provider's display rating into a float.
///
/// The provider substitutes the literal `"N/A"` when no rating exists;
/// that and any other unparseable text count as no rating.
fn parse_rating(display: Option<&str>) -> Option<f64> {
    let raw = display?;
    if raw == "N/A" {
        return None;
    }
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::providers::MockProvider;
    use crate::types::RawHit;

    fn hit(id: &str, title: &str) -> RawHit {
        RawHit {
            imdb_id: Some(id.to_string()),
            title: title.to_string(),
            year: "2020".to_string(),
            kind: "movie".to_string(),
            poster: None,
        }
    }

    fn pipeline(provider: MockProvider) -> (Arc<MockProvider>, MovieSearch) {
        let provider = Arc::new(provider);
        let search = MovieSearch::new(
            provider.clone(),
            Arc::new(FixedDelayPacer::new(Duration::ZERO)),
        );
        (provider, search)
    }

    #[tokio::test]
    async fn test_search_without_credential_fails_fast() {
        let (provider, search) = pipeline(MockProvider::unconfigured());

        let result = search.search(&SearchQuery::new("dune")).await;

        assert!(matches!(result, Err(SearchError::MissingApiKey)));
        assert!(provider.page_requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_title_returns_empty() {
        let (provider, search) = pipeline(MockProvider::new());

        let results = search.search(&SearchQuery::new("")).await.unwrap();

        assert!(results.is_empty());
        assert!(provider.page_requests().is_empty());
    }

    #[tokio::test]
    async fn test_full_range_skips_detail_lookups() {
        let provider = MockProvider::new();
        provider.push_page(Ok(SearchPage::Hits {
            hits: vec![hit("tt001", "Dune"), hit("tt002", "Dune: Part Two")],
            total_results: 2,
        }));
        let (provider, search) = pipeline(provider);

        let results = search.search(&SearchQuery::new("dune")).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Dune");
        assert_eq!(results[0].rating_display, None);
        assert_eq!(results[0].rating_numeric, None);
        assert!(provider.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_pages_produce_empty_result() {
        let provider = MockProvider::new();
        provider.push_page(Ok(SearchPage::Rejected {
            message: "Movie not found!".to_string(),
        }));
        provider.push_page(Ok(SearchPage::Rejected {
            message: "Movie not found!".to_string(),
        }));
        let (provider, search) = pipeline(provider);

        let results = search.search(&SearchQuery::new("zzzzz")).await.unwrap();

        assert!(results.is_empty());
        // A rejected first page does not stop paging.
        let requests = provider.page_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].page, 1);
        assert_eq!(requests[1].page, 2);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(Some("8.3")), Some(8.3));
        assert_eq!(parse_rating(Some(" 7.2 ")), Some(7.2));
        assert_eq!(parse_rating(Some("N/A")), None);
        assert_eq!(parse_rating(Some("not-a-number")), None);
        assert_eq!(parse_rating(Some("")), None);
        assert_eq!(parse_rating(None), None);
    }
}
