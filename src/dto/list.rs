//! View-model published by a list controller to its page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::query::FilterValue;

/// What an empty list means to the page rendering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EmptyState {
    /// The backend answered and nothing matched the current constraints.
    NoResults,
    /// The fetch failed; the page shows the error and a retry affordance.
    Failed,
}

/// One immutable snapshot of a list view's state.
///
/// Controllers publish a fresh snapshot through a watch channel on every
/// state transition; the page renders whatever it last observed.
#[derive(Clone, Debug, Serialize)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// Windowed page-link strip; empty when no pagination control renders.
    pub pages: Vec<Option<usize>>,
    /// Live text of the search box, which may not be committed yet.
    pub search_input: String,
    /// Committed filter constraints.
    pub filters: BTreeMap<String, FilterValue>,
}

impl<T> ListSnapshot<T> {
    pub(crate) fn initial(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            page: 1,
            page_size,
            total: 0,
            total_pages: 1,
            pages: Vec::new(),
            search_input: String::new(),
            filters: BTreeMap::new(),
        }
    }

    /// Distinguishes "no results for this filter" from "failed to load".
    /// `None` while loading or while items are present.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.loading || !self.items.is_empty() {
            None
        } else if self.error.is_some() {
            Some(EmptyState::Failed)
        } else {
            Some(EmptyState::NoResults)
        }
    }
}
