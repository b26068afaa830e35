//! Query State for one list view and its canonical change-detection key.
//!
//! A controller owns exactly one [`QueryState`]. Comparing raw filter maps is
//! unreliable for change detection (two rebuilds of the same map are equal in
//! content but not in identity); the canonical [`QueryKey`] serialization is
//! what decides whether a state transition warrants a fetch.
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a list operation is rejected at the controller boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Filter name is not part of this resource's schema.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
    /// Filter value does not match the declared kind.
    #[error("invalid value for filter {name}: expected {expected}")]
    InvalidFilterValue {
        name: String,
        expected: &'static str,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Scalar value a filter constraint can take.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Renders the value the way it appears in a request query string.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Value domain a declared filter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Numeric constraint: entity ids, status codes, priority codes.
    Int,
    /// Free-form text constraint.
    Text,
}

impl FilterKind {
    const fn expected(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Text => "text",
        }
    }
}

/// One recognized filter of a resource.
#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    pub name: &'static str,
    pub kind: FilterKind,
}

impl FilterSpec {
    pub const fn new(name: &'static str, kind: FilterKind) -> Self {
        Self { name, kind }
    }
}

/// The set of filters one resource recognizes.
///
/// Filter names and value kinds are declared per resource instead of trusting
/// arbitrary string keys; anything outside the schema is rejected before it
/// reaches Query State.
#[derive(Clone, Copy, Debug)]
pub struct FilterSchema {
    specs: &'static [FilterSpec],
}

impl FilterSchema {
    pub const fn new(specs: &'static [FilterSpec]) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &'static [FilterSpec] {
        self.specs
    }

    /// Validates a filter assignment against the schema. `None` values are
    /// always accepted: clearing a recognized constraint is never an error.
    pub fn validate(&self, name: &str, value: Option<&FilterValue>) -> QueryResult<()> {
        let spec = self
            .specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| QueryError::UnknownFilter(name.to_string()))?;

        match (spec.kind, value) {
            (_, None) => Ok(()),
            (FilterKind::Int, Some(FilterValue::Int(_))) => Ok(()),
            (FilterKind::Text, Some(FilterValue::Text(_))) => Ok(()),
            (kind, Some(_)) => Err(QueryError::InvalidFilterValue {
                name: name.to_string(),
                expected: kind.expected(),
            }),
        }
    }
}

/// Allowed page sizes for a list view plus the fallback default.
#[derive(Clone, Debug)]
pub struct PageSizes {
    allowed: Vec<usize>,
    default: usize,
}

impl PageSizes {
    /// Builds the allowed set. The default is forced into the set so
    /// normalization always has a valid fallback.
    pub fn new(allowed: impl Into<Vec<usize>>, default: usize) -> Self {
        let mut allowed = allowed.into();
        if !allowed.contains(&default) {
            allowed.push(default);
            allowed.sort_unstable();
        }
        Self { allowed, default }
    }

    pub fn allowed(&self) -> &[usize] {
        &self.allowed
    }

    pub fn default_size(&self) -> usize {
        self.default
    }

    /// Maps an arbitrary requested size onto the allowed set: members pass
    /// through unchanged, anything else falls back to the default.
    pub fn normalize(&self, requested: usize) -> usize {
        if self.allowed.contains(&requested) {
            requested
        } else {
            self.default
        }
    }
}

impl Default for PageSizes {
    fn default() -> Self {
        Self::new(vec![10, 20, 50, 100], 10)
    }
}

/// Canonical serialization of a [`QueryState`], used purely for change
/// detection. Equal keys mean equal states; the string form is never parsed
/// back or used as a cache address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single source of truth for one list view.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState {
    page: usize,
    page_size: usize,
    filters: BTreeMap<String, FilterValue>,
    search_term: String,
}

/// Serialized form behind [`QueryState::key`]. The filter map is a `BTreeMap`,
/// so the rendering is deterministic regardless of insertion order.
#[derive(Serialize)]
struct KeyRepr<'a> {
    page: usize,
    page_size: usize,
    filters: &'a BTreeMap<String, FilterValue>,
    search: &'a str,
}

impl QueryState {
    pub fn new(initial_page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: initial_page_size,
            filters: BTreeMap::new(),
            search_term: String::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    /// Explicit page navigation. The only mutation that leaves `page` alone
    /// is this one; `max_page` comes from the latest known result page.
    pub fn set_page(&mut self, page: usize, max_page: usize) {
        self.page = page.clamp(1, max_page.max(1));
    }

    /// Adopts a server-reported page number without clamping.
    pub fn adopt_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, sizes: &PageSizes, requested: usize) {
        self.page_size = sizes.normalize(requested);
        self.page = 1;
    }

    /// Sets or clears one filter constraint. `None` and empty text both mean
    /// "no constraint".
    pub fn set_filter(&mut self, name: &str, value: Option<FilterValue>) {
        let value = value.filter(|v| !matches!(v, FilterValue::Text(s) if s.trim().is_empty()));
        match value {
            Some(v) => {
                self.filters.insert(name.to_string(), v);
            }
            None => {
                self.filters.remove(name);
            }
        }
        self.page = 1;
    }

    /// Commits a search term (already debounced by the caller).
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.page = 1;
    }

    /// Canonical change-detection key for the current state.
    pub fn key(&self) -> QueryKey {
        let repr = KeyRepr {
            page: self.page,
            page_size: self.page_size,
            filters: &self.filters,
            search: &self.search_term,
        };
        // Serialization of this shape cannot fail: string keys, scalar leaves.
        let rendered = serde_json::to_string(&repr).unwrap_or_default();
        QueryKey(rendered)
    }
}
