//! Wire-level tests of the OMDb client against a mock HTTP server.
//!
//! Verifies the exact query parameters per endpoint, tagged-response
//! decoding, and the mapping of transport failures.

use std::time::Duration;

use filmdex_core::config::ProviderConfig;
use filmdex_search::errors::FetchError;
use filmdex_search::providers::{MovieProvider, OmdbClient};
use filmdex_search::types::{PageRequest, SearchPage, SearchQuery, TitleKind};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        ..ProviderConfig::default()
    }
}

fn client_for(server: &MockServer) -> OmdbClient {
    OmdbClient::new(test_config(server)).unwrap()
}

#[tokio::test]
async fn test_search_page_sends_expected_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("s", "batman"))
        .and(query_param("page", "1"))
        .and(query_param("y", "2005"))
        .and(query_param("type", "movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "True",
            "totalResults": "2",
            "Search": [
                {
                    "Title": "Batman Begins",
                    "Year": "2005",
                    "imdbID": "tt0372784",
                    "Type": "movie",
                    "Poster": "http://img.example/bb.jpg"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new("batman").year("2005").kind(TitleKind::Movie);
    let page = client
        .search_page(&PageRequest::for_query(&query, 1))
        .await
        .unwrap();

    match page {
        SearchPage::Hits {
            hits,
            total_results,
        } => {
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].imdb_id.as_deref(), Some("tt0372784"));
            assert_eq!(total_results, 2);
        }
        SearchPage::Rejected { message } => panic!("unexpected rejection: {message}"),
    }
}

#[tokio::test]
async fn test_search_page_rejection_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new("zzzzz");
    let page = client
        .search_page(&PageRequest::for_query(&query, 1))
        .await
        .unwrap();

    assert_eq!(
        page,
        SearchPage::Rejected {
            message: "Movie not found!".to_string()
        }
    );
}

#[tokio::test]
async fn test_search_page_unparseable_total_counts_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "True",
            "totalResults": "many",
            "Search": [
                {"Title": "Dune", "Year": "2021", "imdbID": "tt1160419", "Type": "movie"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .search_page(&PageRequest::for_query(&SearchQuery::new("dune"), 1))
        .await
        .unwrap();

    assert!(matches!(
        page,
        SearchPage::Hits {
            total_results: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn test_search_page_http_error_maps_to_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .search_page(&PageRequest::for_query(&SearchQuery::new("dune"), 1))
        .await;

    assert!(matches!(result, Err(FetchError::Network { .. })));
}

#[tokio::test]
async fn test_search_page_malformed_body_maps_to_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .search_page(&PageRequest::for_query(&SearchQuery::new("dune"), 1))
        .await;

    assert!(matches!(result, Err(FetchError::Unexpected { .. })));
}

#[tokio::test]
async fn test_search_page_timeout_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "True", "Search": [], "totalResults": "0"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ProviderConfig {
        search_timeout: Duration::from_millis(50),
        ..test_config(&server)
    };
    let client = OmdbClient::new(config).unwrap();

    let result = client
        .search_page(&PageRequest::for_query(&SearchQuery::new("dune"), 1))
        .await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_detail_request_sends_expected_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("i", "tt0372784"))
        .and(query_param("plot", "short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "True",
            "Title": "Batman Begins",
            "Year": "2005",
            "imdbID": "tt0372784",
            "Type": "movie",
            "imdbRating": "8.2",
            "Director": "Christopher Nolan",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.2/10"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client.movie_by_id("tt0372784").await.unwrap();

    assert_eq!(record.title.as_deref(), Some("Batman Begins"));
    assert_eq!(record.imdb_rating.as_deref(), Some("8.2"));
    assert_eq!(record.director.as_deref(), Some("Christopher Nolan"));
    assert_eq!(record.ratings.len(), 1);
}

#[tokio::test]
async fn test_detail_provider_errors_return_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", "tt0000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&server)
        .await;

    // The generic placeholder error is suppressed from logs but still
    // yields no record.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", "tt0000002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Error getting data."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(client.movie_by_id("tt0000001").await.is_none());
    assert!(client.movie_by_id("tt0000002").await.is_none());
}

#[tokio::test]
async fn test_detail_http_error_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(client.movie_by_id("tt0372784").await.is_none());
}

#[tokio::test]
async fn test_detail_timeout_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "True", "Title": "Slow"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ProviderConfig {
        detail_timeout: Duration::from_millis(50),
        ..test_config(&server)
    };
    let client = OmdbClient::new(config).unwrap();

    assert!(client.movie_by_id("tt0372784").await.is_none());
}

#[tokio::test]
async fn test_no_requests_without_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ProviderConfig {
        api_key: None,
        ..test_config(&server)
    };
    let client = OmdbClient::new(config).unwrap();

    assert!(!client.is_configured());
    assert!(client.movie_by_id("tt0372784").await.is_none());

    let search_result = client
        .search_page(&PageRequest::for_query(&SearchQuery::new("dune"), 1))
        .await;
    assert!(matches!(search_result, Err(FetchError::MissingApiKey)));

    let title_result = client.find_by_title("Dune", None).await;
    assert!(matches!(title_result, Err(FetchError::MissingApiKey)));
}

#[tokio::test]
async fn test_find_by_title_requests_full_plot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("t", "Inception"))
        .and(query_param("plot", "full"))
        .and(query_param("y", "2010"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "True",
            "Title": "Inception",
            "Year": "2010",
            "imdbID": "tt1375666",
            "imdbRating": "8.8",
            "Plot": "A thief who steals corporate secrets through dream-sharing.",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.8/10"},
                {"Source": "Rotten Tomatoes", "Value": "87%"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .find_by_title("Inception", Some("2010"))
        .await
        .unwrap()
        .expect("record should be found");

    assert_eq!(record.imdb_id.as_deref(), Some("tt1375666"));

    let ratings = record.transformed_ratings();
    assert_eq!(ratings["Internet Movie Database"], "88");
    assert_eq!(ratings["Rotten Tomatoes"], "87");
}

#[tokio::test]
async fn test_find_by_title_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client.find_by_title("No Such Movie", None).await.unwrap();

    assert!(record.is_none());
}
