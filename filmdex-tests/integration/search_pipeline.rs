//! End-to-end search pipeline scenarios with scripted providers.
//!
//! Each scenario asserts the caller-visible results together with the
//! exact page, detail, and pacing call counts the pipeline produced.

use std::sync::Arc;

use filmdex_core::pacing::CountingPacer;
use filmdex_search::aggregator::MovieSearch;
use filmdex_search::errors::{FetchError, SearchError};
use filmdex_search::providers::MockProvider;
use filmdex_search::types::{DetailRecord, RawHit, SearchPage, SearchQuery, TitleKind};

fn hit(id: &str, title: &str) -> RawHit {
    RawHit {
        imdb_id: Some(id.to_string()),
        title: title.to_string(),
        year: "2020".to_string(),
        kind: "movie".to_string(),
        poster: Some(format!("http://img.example/{id}-search.jpg")),
    }
}

fn hits(range: std::ops::Range<usize>) -> Vec<RawHit> {
    range
        .map(|n| hit(&format!("tt{n:04}"), &format!("Movie {n}")))
        .collect()
}

fn detail(id: &str, rating: &str) -> DetailRecord {
    DetailRecord {
        imdb_id: Some(id.to_string()),
        title: Some(format!("Title {id}")),
        year: Some("2020".to_string()),
        kind: Some("movie".to_string()),
        runtime: Some("120 min".to_string()),
        genre: Some("Drama".to_string()),
        director: Some("Jane Director".to_string()),
        actors: Some("Actor A, Actor B".to_string()),
        plot: Some("Something happens.".to_string()),
        poster: Some(format!("http://img.example/{id}-detail.jpg")),
        imdb_rating: Some(rating.to_string()),
        ratings: Vec::new(),
    }
}

struct Scenario {
    provider: Arc<MockProvider>,
    pacer: Arc<CountingPacer>,
    search: MovieSearch,
}

fn scenario(provider: MockProvider) -> Scenario {
    let provider = Arc::new(provider);
    let pacer = Arc::new(CountingPacer::new());
    let search = MovieSearch::new(provider.clone(), pacer.clone());

    Scenario {
        provider,
        pacer,
        search,
    }
}

#[tokio::test]
async fn test_enrichment_merges_detail_fields() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: vec![hit("tt0001", "Movie 1")],
        total_results: 1,
    }));
    provider.insert_detail("tt0001", detail("tt0001", "8.0"));
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.imdb_id.as_deref(), Some("tt0001"));
    assert_eq!(result.title, "Movie 1");
    assert_eq!(result.plot.as_deref(), Some("Something happens."));
    assert_eq!(result.director.as_deref(), Some("Jane Director"));
    assert_eq!(result.genre.as_deref(), Some("Drama"));
    assert_eq!(result.runtime.as_deref(), Some("120 min"));
    assert_eq!(result.rating_display.as_deref(), Some("8.0"));
    assert_eq!(result.rating_numeric, Some(8.0));
    // Detail poster replaces the search hit's poster.
    assert_eq!(
        result.poster.as_deref(),
        Some("http://img.example/tt0001-detail.jpg")
    );

    assert_eq!(s.provider.page_requests().len(), 1);
    assert_eq!(s.provider.detail_calls(), vec!["tt0001".to_string()]);
    assert_eq!(s.pacer.pauses(), 1);
}

#[tokio::test]
async fn test_rating_filter_excludes_out_of_range_and_unparseable() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(1..6),
        total_results: 5,
    }));
    provider.insert_detail("tt0001", detail("tt0001", "9.0"));
    provider.insert_detail("tt0002", detail("tt0002", "7.5"));
    provider.insert_detail("tt0003", detail("tt0003", "5.0"));
    provider.insert_detail("tt0004", detail("tt0004", "N/A"));
    provider.insert_detail("tt0005", detail("tt0005", "unrated"));
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.5);
    let results = s.search.search(&query).await.unwrap();

    let ids: Vec<_> = results
        .iter()
        .map(|r| r.imdb_id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["tt0001".to_string(), "tt0002".to_string()]);

    // Every candidate was looked up and paced, accepted or not.
    assert_eq!(s.provider.detail_calls().len(), 5);
    assert_eq!(s.pacer.pauses(), 5);
    assert_eq!(s.provider.page_requests().len(), 1);
}

#[tokio::test]
async fn test_rating_bounds_are_inclusive() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(1..4),
        total_results: 3,
    }));
    provider.insert_detail("tt0001", detail("tt0001", "7.0"));
    provider.insert_detail("tt0002", detail("tt0002", "9.0"));
    provider.insert_detail("tt0003", detail("tt0003", "6.9"));
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    let ids: Vec<_> = results
        .iter()
        .map(|r| r.imdb_id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["tt0001".to_string(), "tt0002".to_string()]);
}

#[tokio::test]
async fn test_caps_results_at_fifteen() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(0..10),
        total_results: 24,
    }));
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(10..20),
        total_results: 24,
    }));
    for n in 0..20 {
        let id = format!("tt{n:04}");
        provider.insert_detail(&id, detail(&id, "8.0"));
    }
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 15);
    // Both pages were fetched, but enrichment stopped at the cap.
    assert_eq!(s.provider.page_requests().len(), 2);
    assert_eq!(s.provider.detail_calls().len(), 15);
    assert_eq!(s.pacer.pauses(), 15);
    assert_eq!(results[0].imdb_id.as_deref(), Some("tt0000"));
    assert_eq!(results[14].imdb_id.as_deref(), Some("tt0014"));
}

#[tokio::test]
async fn test_full_range_skips_enrichment_and_pacing() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(0..10),
        total_results: 24,
    }));
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(10..20),
        total_results: 24,
    }));
    let s = scenario(provider);

    let results = s.search.search(&SearchQuery::new("movie")).await.unwrap();

    assert_eq!(results.len(), 15);
    assert!(results.iter().all(|r| r.rating_display.is_none()));
    assert!(results.iter().all(|r| r.rating_numeric.is_none()));
    assert!(results.iter().all(|r| r.plot.is_none()));
    assert!(s.provider.detail_calls().is_empty());
    assert_eq!(s.pacer.pauses(), 0);
}

#[tokio::test]
async fn test_detail_miss_consumes_candidate_without_filling_slot() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: vec![hit("tt0001", "Movie 1"), hit("tt0002", "Movie 2")],
        total_results: 2,
    }));
    // No record registered for tt0001: the lookup comes back empty.
    provider.insert_detail("tt0002", detail("tt0002", "8.0"));
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].imdb_id.as_deref(), Some("tt0002"));
    // The failed lookup still counted as an attempt and was paced.
    assert_eq!(s.provider.detail_calls().len(), 2);
    assert_eq!(s.pacer.pauses(), 2);
}

#[tokio::test]
async fn test_candidates_without_id_are_skipped_without_lookup() {
    let provider = MockProvider::new();
    let mut page_hits = vec![hit("tt0001", "Movie 1")];
    page_hits[0].imdb_id = None;
    page_hits.push(hit("tt0002", "Movie 2"));
    provider.push_page(Ok(SearchPage::Hits {
        hits: page_hits,
        total_results: 2,
    }));
    provider.insert_detail("tt0002", detail("tt0002", "8.0"));
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(s.provider.detail_calls(), vec!["tt0002".to_string()]);
    assert_eq!(s.pacer.pauses(), 1);
}

#[tokio::test]
async fn test_small_total_stops_after_one_page() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(1..6),
        total_results: 5,
    }));
    for n in 1..6 {
        let id = format!("tt{n:04}");
        provider.insert_detail(&id, detail(&id, "8.0"));
    }
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 5);
    let requests = s.provider.page_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].page, 1);
}

#[tokio::test]
async fn test_candidate_cap_skips_second_page() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(0..20),
        total_results: 30,
    }));
    let s = scenario(provider);

    let results = s.search.search(&SearchQuery::new("movie")).await.unwrap();

    assert_eq!(results.len(), 15);
    assert_eq!(s.provider.page_requests().len(), 1);
}

#[tokio::test]
async fn test_page_one_transport_failure_fails_search() {
    let provider = MockProvider::new();
    provider.push_page(Err(FetchError::Network {
        reason: "connection refused".to_string(),
    }));
    let s = scenario(provider);

    let error = s
        .search
        .search(&SearchQuery::new("dune"))
        .await
        .unwrap_err();

    match error {
        SearchError::SearchFailed { query, reason } => {
            assert_eq!(query, "dune");
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected SearchFailed, got {other:?}"),
    }
    assert_eq!(s.provider.page_requests().len(), 1);
    assert_eq!(s.pacer.pauses(), 0);
}

#[tokio::test]
async fn test_page_two_transport_failure_keeps_first_page() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: hits(1..6),
        total_results: 25,
    }));
    provider.push_page(Err(FetchError::Timeout {
        timeout: std::time::Duration::from_secs(15),
    }));
    for n in 1..6 {
        let id = format!("tt{n:04}");
        provider.insert_detail(&id, detail(&id, "8.0"));
    }
    let s = scenario(provider);

    let query = SearchQuery::new("movie").rating_range(7.0, 9.0);
    let results = s.search.search(&query).await.unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(s.provider.page_requests().len(), 2);
}

#[tokio::test]
async fn test_year_and_kind_are_forwarded() {
    let provider = MockProvider::new();
    provider.push_page(Ok(SearchPage::Hits {
        hits: Vec::new(),
        total_results: 0,
    }));
    let s = scenario(provider);

    let query = SearchQuery::new("dune").year(" 2021 ").kind(TitleKind::Series);
    let results = s.search.search(&query).await.unwrap();

    assert!(results.is_empty());
    let requests = s.provider.page_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].title, "dune");
    assert_eq!(requests[0].year.as_deref(), Some("2021"));
    assert_eq!(requests[0].kind, Some(TitleKind::Series));
}

#[tokio::test]
async fn test_missing_credential_means_zero_traffic() {
    let s = scenario(MockProvider::unconfigured());

    let error = s
        .search
        .search(&SearchQuery::new("dune"))
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::MissingApiKey));
    assert!(s.provider.page_requests().is_empty());
    assert!(s.provider.detail_calls().is_empty());
    assert_eq!(s.pacer.pauses(), 0);
}
