//! Error types for search and provider operations.

use std::time::Duration;

use thiserror::Error;

/// Errors from a single provider HTTP request.
///
/// Provider-side failures that arrive as well-formed JSON are data, not
/// errors: they decode to [`crate::types::SearchPage::Rejected`] or an
/// absent detail record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key is configured, so the request was never sent.
    #[error("OMDb API key is not configured")]
    MissingApiKey,

    /// Request exceeded its deadline.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The deadline that was exceeded
        timeout: Duration,
    },

    /// Transport-level failure, including non-success HTTP status codes.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// Response arrived but could not be decoded.
    #[error("Unexpected provider response: {reason}")]
    Unexpected {
        /// The reason the response was rejected
        reason: String,
    },
}

/// Errors that abort an aggregated search.
///
/// The pipeline absorbs per-item detail failures and provider rejections;
/// only a missing credential or an unfetchable first page fail the whole
/// search. Both are distinguishable from the empty result list.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API key is configured; detected before any network traffic.
    #[error("OMDb API key is not configured")]
    MissingApiKey,

    /// The first page could not be fetched, so no results exist at all.
    #[error("Search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },
}
