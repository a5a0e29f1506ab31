//! Mock provider implementation for testing.
//!
//! Page outcomes are scripted ahead of time and every call is recorded,
//! so pipeline tests can assert exact request and pacing counts.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::MovieProvider;
use crate::errors::FetchError;
use crate::types::{DetailRecord, PageRequest, SearchPage};

/// Mock provider with scripted responses and recorded calls.
#[derive(Debug)]
pub struct MockProvider {
    configured: bool,
    pages: Mutex<VecDeque<Result<SearchPage, FetchError>>>,
    details: Mutex<HashMap<String, DetailRecord>>,
    page_requests: Mutex<Vec<PageRequest>>,
    detail_calls: Mutex<Vec<String>>,
}

#[allow(clippy::missing_panics_doc)]
impl MockProvider {
    /// Creates a configured provider with no scripted responses.
    pub fn new() -> Self {
        Self {
            configured: true,
            ..Self::unconfigured()
        }
    }

    /// Creates a provider that reports no credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            pages: Mutex::new(VecDeque::new()),
            details: Mutex::new(HashMap::new()),
            page_requests: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues the outcome for the next search-page call.
    pub fn push_page(&self, outcome: Result<SearchPage, FetchError>) {
        self.pages.lock().unwrap().push_back(outcome);
    }

    /// Registers the detail record served for `imdb_id`.
    pub fn insert_detail(&self, imdb_id: &str, record: DetailRecord) {
        self.details
            .lock()
            .unwrap()
            .insert(imdb_id.to_string(), record);
    }

    /// Page requests seen so far, in call order.
    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests.lock().unwrap().clone()
    }

    /// Detail ids requested so far, in call order.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieProvider for MockProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search_page(&self, request: &PageRequest) -> Result<SearchPage, FetchError> {
        self.page_requests.lock().unwrap().push(request.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted outcome for page request {request:?}"))
    }

    async fn movie_by_id(&self, imdb_id: &str) -> Option<DetailRecord> {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        self.details.lock().unwrap().get(imdb_id).cloned()
    }
}
