//! OMDb API client: paginated title search and per-title detail lookup.

use std::time::Duration;

use async_trait::async_trait;
use filmdex_core::config::ProviderConfig;
use serde::Deserialize;
use url::Url;

use super::MovieProvider;
use crate::errors::FetchError;
use crate::types::{DetailRecord, PageRequest, RawHit, SearchPage};

/// Error message OMDb serves for transient internal failures.
///
/// It carries no information beyond "try again", so it is the one
/// provider error the client does not log. The lookup still yields no
/// record.
const GENERIC_PROVIDER_ERROR: &str = "Error getting data.";

/// Plot length requested with by-id detail lookups.
const DETAIL_PLOT: &str = "short";

/// Plot length requested with single-title lookups.
const TITLE_PLOT: &str = "full";

/// OMDb-backed implementation of [`MovieProvider`].
///
/// The API key travels as a query parameter on every request; without one
/// no request is sent at all.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: Url,
    config: ProviderConfig,
}

impl OmdbClient {
    /// Creates a client from provider configuration.
    ///
    /// # Errors
    /// - `FetchError::Unexpected` - Base URL is invalid or the HTTP client could not be built
    pub fn new(config: ProviderConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::Unexpected {
            reason: format!("Invalid base URL '{}': {e}", config.base_url),
        })?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| FetchError::Unexpected {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Looks up a single title record with the full-length plot.
    ///
    /// Returns `Ok(None)` when the provider answers with a well-formed
    /// failure such as `"Movie not found!"`.
    ///
    /// # Errors
    /// - `FetchError::MissingApiKey` - No credential configured
    /// - `FetchError::Timeout` - Request deadline exceeded
    /// - `FetchError::Network` - Transport or HTTP status failure
    /// - `FetchError::Unexpected` - Response could not be decoded
    pub async fn find_by_title(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Option<DetailRecord>, FetchError> {
        let api_key = self.api_key()?;
        let params = title_params(api_key, title, year);

        let response: DetailResponse = self
            .request_json(&params, self.config.detail_timeout)
            .await?;

        match response.into_record() {
            Ok(record) => Ok(Some(record)),
            Err(message) => {
                tracing::warn!("OMDb API error for title '{title}': {message}");
                Ok(None)
            }
        }
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network {
                reason: format!("HTTP {status}"),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| classify_decode_error(e, timeout))
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn search_page(&self, request: &PageRequest) -> Result<SearchPage, FetchError> {
        let api_key = self.api_key()?;
        let params = page_params(api_key, request);

        tracing::debug!(
            "Requesting search page {} for '{}'",
            request.page,
            request.title
        );

        let response: SearchResponse = self
            .request_json(&params, self.config.search_timeout)
            .await?;

        Ok(response.into_page())
    }

    async fn movie_by_id(&self, imdb_id: &str) -> Option<DetailRecord> {
        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!("OMDb API key missing; skipping detail lookup for {imdb_id}");
                return None;
            }
        };
        let params = detail_params(api_key, imdb_id);

        let outcome = self
            .request_json::<DetailResponse>(&params, self.config.detail_timeout)
            .await;

        let response = match outcome {
            Ok(response) => response,
            Err(FetchError::Timeout { timeout }) => {
                tracing::warn!("Timeout fetching movie {imdb_id} after {timeout:?}");
                return None;
            }
            Err(error) => {
                tracing::warn!("Request failed fetching movie {imdb_id}: {error}");
                return None;
            }
        };

        match response.into_record() {
            Ok(record) => Some(record),
            Err(message) => {
                if message != GENERIC_PROVIDER_ERROR {
                    tracing::warn!("OMDb API error for {imdb_id}: {message}");
                }
                None
            }
        }
    }
}

fn classify_transport_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { timeout }
    } else {
        FetchError::Network {
            reason: error.to_string(),
        }
    }
}

fn classify_decode_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { timeout }
    } else {
        FetchError::Unexpected {
            reason: format!("JSON decoding failed: {error}"),
        }
    }
}

fn page_params(api_key: &str, request: &PageRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("apikey", api_key.to_string()),
        ("s", request.title.clone()),
        ("page", request.page.to_string()),
    ];

    if let Some(year) = &request.year {
        params.push(("y", year.clone()));
    }
    if let Some(kind) = request.kind {
        params.push(("type", kind.as_query_param().to_string()));
    }

    params
}

fn detail_params(api_key: &str, imdb_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("apikey", api_key.to_string()),
        ("i", imdb_id.to_string()),
        ("plot", DETAIL_PLOT.to_string()),
    ]
}

fn title_params(api_key: &str, title: &str, year: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("apikey", api_key.to_string()),
        ("t", title.to_string()),
        ("plot", TITLE_PLOT.to_string()),
    ];

    if let Some(year) = year {
        params.push(("y", year.to_string()));
    }

    params
}

/// Raw search-endpoint payload before tagged-union decoding.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    hits: Vec<RawHit>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

impl SearchResponse {
    fn into_page(self) -> SearchPage {
        if self.response.as_deref() == Some("True") {
            SearchPage::Hits {
                hits: self.hits,
                total_results: parse_total(self.total_results.as_deref()),
            }
        } else {
            SearchPage::Rejected {
                message: self.error.unwrap_or_else(|| "Unknown error".to_string()),
            }
        }
    }
}

/// Raw detail-endpoint payload before tagged-union decoding.
#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    record: DetailRecord,
}

impl DetailResponse {
    fn into_record(self) -> Result<DetailRecord, String> {
        if self.response.as_deref() == Some("True") {
            Ok(self.record)
        } else {
            Err(self.error.unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}

/// Lenient parse of the provider's stringly-typed total match count.
fn parse_total(raw: Option<&str>) -> u32 {
    raw.and_then(|t| t.trim().parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SearchQuery, TitleKind};

    #[test]
    fn test_page_params_with_all_filters() {
        let query = SearchQuery::new("batman")
            .year("2005")
            .kind(TitleKind::Movie);
        let request = PageRequest::for_query(&query, 2);

        let params = page_params("k", &request);

        assert_eq!(
            params,
            vec![
                ("apikey", "k".to_string()),
                ("s", "batman".to_string()),
                ("page", "2".to_string()),
                ("y", "2005".to_string()),
                ("type", "movie".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_params_minimal() {
        let query = SearchQuery::new("batman");
        let request = PageRequest::for_query(&query, 1);

        let params = page_params("k", &request);

        assert_eq!(
            params,
            vec![
                ("apikey", "k".to_string()),
                ("s", "batman".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_detail_params_request_short_plot() {
        let params = detail_params("k", "tt0372784");

        assert_eq!(
            params,
            vec![
                ("apikey", "k".to_string()),
                ("i", "tt0372784".to_string()),
                ("plot", "short".to_string()),
            ]
        );
    }

    #[test]
    fn test_title_params_request_full_plot() {
        let params = title_params("k", "Inception", Some("2010"));

        assert_eq!(
            params,
            vec![
                ("apikey", "k".to_string()),
                ("t", "Inception".to_string()),
                ("plot", "full".to_string()),
                ("y", "2010".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_total_lenient() {
        assert_eq!(parse_total(Some("24")), 24);
        assert_eq!(parse_total(Some(" 24 ")), 24);
        assert_eq!(parse_total(Some("abc")), 0);
        assert_eq!(parse_total(Some("")), 0);
        assert_eq!(parse_total(None), 0);
    }

    #[test]
    fn test_search_response_success_decodes_to_hits() {
        let json = r#"{
            "Response": "True",
            "totalResults": "24",
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie"}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();

        match response.into_page() {
            SearchPage::Hits {
                hits,
                total_results,
            } => {
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].imdb_id.as_deref(), Some("tt0372784"));
                assert_eq!(total_results, 24);
            }
            SearchPage::Rejected { message } => panic!("unexpected rejection: {message}"),
        }
    }

    #[test]
    fn test_search_response_failure_decodes_to_rejection() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response.into_page(),
            SearchPage::Rejected {
                message: "Movie not found!".to_string()
            }
        );
    }

    #[test]
    fn test_search_response_missing_status_is_rejection() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();

        assert_eq!(
            response.into_page(),
            SearchPage::Rejected {
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_detail_response_success_flattens_record() {
        let json = r#"{
            "Response": "True",
            "Title": "Inception",
            "imdbID": "tt1375666",
            "imdbRating": "8.8",
            "Director": "Christopher Nolan",
            "Ratings": [{"Source": "Metacritic", "Value": "74/100"}]
        }"#;

        let response: DetailResponse = serde_json::from_str(json).unwrap();
        let record = response.into_record().unwrap();

        assert_eq!(record.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(record.imdb_rating.as_deref(), Some("8.8"));
        assert_eq!(record.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(record.ratings.len(), 1);
    }

    #[test]
    fn test_detail_response_failure_carries_message() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let response: DetailResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response.into_record().unwrap_err(),
            "Incorrect IMDb ID.".to_string()
        );
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let config = ProviderConfig {
            base_url: "not a url".to_string(),
            ..ProviderConfig::default()
        };

        assert!(OmdbClient::new(config).is_err());
    }
}
