//! Provider implementations for movie search and detail lookup.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::types::{DetailRecord, PageRequest, SearchPage};

pub mod omdb;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use omdb::OmdbClient;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockProvider;

/// Trait for movie metadata providers.
///
/// Implementations back the search pipeline with paginated title search
/// and per-id detail lookup (the real OMDb API, mock providers for
/// testing).
#[async_trait]
pub trait MovieProvider: Send + Sync + std::fmt::Debug {
    /// Whether an access credential is available.
    ///
    /// The aggregator refuses to start a search without one.
    fn is_configured(&self) -> bool;

    /// Fetches one page of title-search results.
    ///
    /// Provider-side failures that arrive as well-formed responses decode
    /// to [`SearchPage::Rejected`] rather than an error.
    ///
    /// # Errors
    /// - `FetchError::MissingApiKey` - No credential configured
    /// - `FetchError::Timeout` - Request deadline exceeded
    /// - `FetchError::Network` - Transport or HTTP status failure
    /// - `FetchError::Unexpected` - Response could not be decoded
    async fn search_page(&self, request: &PageRequest) -> Result<SearchPage, FetchError>;

    /// Fetches the full record for one IMDb id.
    ///
    /// Every failure mode collapses to `None`: detail lookup problems are
    /// logged and must never abort the surrounding search.
    async fn movie_by_id(&self, imdb_id: &str) -> Option<DetailRecord>;
}
