//! Filmdex Search - Movie search aggregation over OMDb

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Collects paginated title matches from the provider, enriches them with
//! per-title detail records, filters by IMDb rating, and caps the result
//! list for display.

pub mod aggregator;
pub mod errors;
pub mod providers;
pub mod ratings;
pub mod types;

// Re-export main types
pub use aggregator::{MAX_RESULTS, MovieSearch};
pub use errors::{FetchError, SearchError};
pub use providers::{MovieProvider, OmdbClient};
pub use ratings::transform_ratings;
pub use types::{DetailRecord, EnrichedResult, RawHit, SearchPage, SearchQuery, TitleKind};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
