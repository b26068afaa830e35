//! Fetch seam between list controllers and the backend REST API.
//!
//! The backend answers list requests in one of two shapes: an envelope
//! `{"data": [...], "pagination": {"total", "totalPages", "page"}}` or a bare
//! array. Both are accepted; the normalizer fills in pagination defaults for
//! the bare shape.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::fetch::errors::{FetchError, FetchResult};
use crate::query::{FilterValue, QueryState};

pub mod errors;
#[cfg(feature = "http")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Parameters of one list request, as they appear on the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchParams {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub filters: BTreeMap<String, FilterValue>,
}

impl FetchParams {
    /// Renders the request's query pairs, filters included.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        for (name, value) in &self.filters {
            pairs.push((name.clone(), value.to_query_value()));
        }
        pairs
    }
}

impl From<&QueryState> for FetchParams {
    fn from(query: &QueryState) -> Self {
        Self {
            page: query.page(),
            limit: query.page_size(),
            search: Some(query.search_term().to_string()).filter(|s| !s.is_empty()),
            filters: query.filters().clone(),
        }
    }
}

/// One page of results in controller-normalized form.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

#[derive(Deserialize)]
struct WirePagination {
    total: usize,
    #[serde(rename = "totalPages")]
    total_pages: usize,
    page: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePage<T> {
    Envelope {
        data: Vec<T>,
        pagination: Option<WirePagination>,
    },
    Bare(Vec<T>),
}

impl<T: DeserializeOwned> ResultPage<T> {
    /// Decodes either wire shape. `requested_page` backfills a missing `page`
    /// field; reported pagination always wins over anything computed locally.
    pub fn from_wire(value: serde_json::Value, requested_page: usize) -> FetchResult<Self> {
        let wire: WirePage<T> =
            serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(match wire {
            WirePage::Envelope {
                data,
                pagination: Some(p),
            } => Self {
                total: p.total,
                total_pages: p.total_pages,
                page: p.page.unwrap_or(requested_page),
                items: data,
            },
            WirePage::Envelope {
                data,
                pagination: None,
            }
            | WirePage::Bare(data) => Self {
                total: data.len(),
                total_pages: 1,
                page: 1,
                items: data,
            },
        })
    }
}

/// Read side of one REST resource collection.
#[async_trait]
pub trait ResourceFetcher<T>: Send + Sync {
    async fn fetch(&self, params: &FetchParams) -> FetchResult<ResultPage<T>>;
}

/// Write side of one REST resource collection. Mutations are plain
/// request/response calls; callers refresh their list afterwards.
#[async_trait]
pub trait ResourceWriter<N, U>: Send + Sync {
    async fn create(&self, payload: &N) -> FetchResult<()>;
    async fn update(&self, id: i64, payload: &U) -> FetchResult<()>;
    async fn delete(&self, id: i64) -> FetchResult<()>;
}
