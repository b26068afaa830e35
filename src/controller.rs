//! The generic list-state controller behind every admin list page.
//!
//! One controller owns the Query State of one list view: pagination, typed
//! filters, and the debounced search term. It issues at most one canonical
//! fetch per committed query-key transition, suppresses duplicates for
//! identical keys, and discards responses that were superseded while in
//! flight, so the page never renders an older key's result after a newer
//! one. There is no caching, no automatic retry, and no request
//! cancellation; a superseded response costs a wasted round trip and
//! nothing else.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;

use crate::DEFAULT_DEBOUNCE_MS;
use crate::dto::list::ListSnapshot;
use crate::fetch::errors::FetchResult;
use crate::fetch::{FetchParams, ResourceFetcher, ResultPage};
use crate::pagination::page_links;
use crate::query::{FilterSchema, FilterValue, PageSizes, QueryKey, QueryResult, QueryState};

/// Tuning knobs for one controller instance.
#[derive(Clone, Debug)]
pub struct ListConfig {
    pub page_sizes: PageSizes,
    /// How long search input must pause before it commits.
    pub debounce: Duration,
}

impl ListConfig {
    pub fn with_default_page_size(default: usize) -> Self {
        Self {
            page_sizes: PageSizes::new(vec![10, 20, 50, 100], default),
            ..Self::default()
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_sizes: PageSizes::default(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// Marker for the one canonical outstanding request.
struct InFlight {
    generation: u64,
}

struct Inner<T> {
    query: QueryState,
    snapshot: ListSnapshot<T>,
    /// `total_pages` from the last applied result; drives page clamping.
    total_pages: usize,
    /// Bumped on every keystroke; a debounce timer only commits if it still
    /// holds the generation it was started with.
    debounce_generation: u64,
    /// Bumped on every issued fetch; a resolution only applies if the
    /// in-flight marker still holds its generation.
    fetch_generation: u64,
    inflight: Option<InFlight>,
    /// Key of the most recently issued fetch, settled or not. Re-issuing it
    /// requires an explicit `refresh`.
    last_issued: Option<QueryKey>,
}

/// List-state controller, generic over the item type.
///
/// Cheap to clone; all clones share the same state. Constructing one inside
/// a Tokio runtime immediately issues the fetch for the default Query State.
pub struct ListController<T> {
    inner: Arc<Mutex<Inner<T>>>,
    tx: Arc<watch::Sender<ListSnapshot<T>>>,
    fetcher: Arc<dyn ResourceFetcher<T>>,
    config: Arc<ListConfig>,
    schema: FilterSchema,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tx: Arc::clone(&self.tx),
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
            schema: self.schema,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ListController<T> {
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher<T>>,
        schema: FilterSchema,
        config: ListConfig,
    ) -> Self {
        let query = QueryState::new(config.page_sizes.default_size());
        let snapshot = ListSnapshot::initial(query.page_size());
        let (tx, _) = watch::channel(snapshot.clone());

        let controller = Self {
            inner: Arc::new(Mutex::new(Inner {
                query,
                snapshot,
                total_pages: 1,
                debounce_generation: 0,
                fetch_generation: 0,
                inflight: None,
                last_issued: None,
            })),
            tx: Arc::new(tx),
            fetcher,
            config: Arc::new(config),
            schema,
        };
        controller.issue_fetch(false);
        controller
    }

    /// Observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.tx.borrow().clone()
    }

    pub fn filter_schema(&self) -> FilterSchema {
        self.schema
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Records a keystroke. The term shows up in the snapshot immediately so
    /// the input stays responsive, but only commits to Query State after the
    /// debounce window passes without another keystroke. Committing trims
    /// the term and resets the page to 1.
    pub fn set_search(&self, term: &str) {
        let generation = {
            let mut inner = self.lock();
            inner.debounce_generation += 1;
            inner.snapshot.search_input = term.to_string();
            self.publish(&inner);
            inner.debounce_generation
        };

        let this = self.clone();
        let term = term.to_string();
        let delay = self.config.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.commit_search(generation, &term);
        });
    }

    fn commit_search(&self, generation: u64, term: &str) {
        {
            let mut inner = self.lock();
            if inner.debounce_generation != generation {
                // A newer keystroke restarted the window.
                return;
            }
            inner.query.set_search(term);
        }
        self.issue_fetch(false);
    }

    /// Sets or clears one filter constraint, immediately. The assignment is
    /// validated against the resource's filter schema; recognized mutations
    /// reset the page to 1.
    pub fn set_filter(&self, name: &str, value: Option<FilterValue>) -> QueryResult<()> {
        self.schema.validate(name, value.as_ref())?;
        {
            let mut inner = self.lock();
            inner.query.set_filter(name, value);
        }
        self.issue_fetch(false);
        Ok(())
    }

    /// Navigates to a page, clamped to `[1, total_pages]`. Leaves the rest
    /// of the Query State alone.
    pub fn set_page(&self, page: usize) {
        {
            let mut inner = self.lock();
            let max = inner.total_pages;
            inner.query.set_page(page, max);
        }
        self.issue_fetch(false);
    }

    /// Switches the page size. Sizes outside the allowed set fall back to
    /// the configured default; resets the page to 1.
    pub fn set_page_size(&self, requested: usize) {
        {
            let mut inner = self.lock();
            inner.query.set_page_size(&self.config.page_sizes, requested);
        }
        self.issue_fetch(false);
    }

    /// Re-issues the current key even if unchanged. Called after mutations
    /// so the list reflects server truth, and by the manual retry affordance
    /// after a failure.
    pub fn refresh(&self) {
        self.issue_fetch(true);
    }

    /// Applies a deep-linked state in one commit: a single fetch for the
    /// final key, no debounce, intermediate states never issued.
    pub fn restore(&self, edit: impl FnOnce(&mut QueryState, &PageSizes)) {
        {
            let mut inner = self.lock();
            edit(&mut inner.query, &self.config.page_sizes);
            inner.snapshot.search_input = inner.query.search_term().to_string();
        }
        self.issue_fetch(false);
    }

    fn issue_fetch(&self, force: bool) {
        let (params, generation) = {
            let mut inner = self.lock();
            let key = inner.query.key();
            if !force && inner.last_issued.as_ref() == Some(&key) {
                // Same key as the one in flight or already displayed.
                return;
            }

            inner.fetch_generation += 1;
            let generation = inner.fetch_generation;
            inner.inflight = Some(InFlight { generation });
            inner.last_issued = Some(key);
            inner.snapshot.loading = true;
            inner.snapshot.error = None;
            Self::sync_query_fields(&mut inner);
            self.publish(&inner);
            (FetchParams::from(&inner.query), generation)
        };

        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.fetcher.fetch(&params).await;
            this.resolve(generation, outcome);
        });
    }

    fn resolve(&self, generation: u64, outcome: FetchResult<ResultPage<T>>) {
        let mut inner = self.lock();
        match &inner.inflight {
            Some(marker) if marker.generation == generation => {}
            _ => {
                // Superseded while in flight; the newer request's
                // resolution owns the view now.
                log::debug!("discarding superseded list response");
                return;
            }
        }
        inner.inflight = None;
        inner.snapshot.loading = false;

        match outcome {
            Ok(page) => {
                inner.total_pages = page.total_pages.max(1);
                if page.page != inner.query.page() {
                    // The server adjusted the page (e.g. clamped an
                    // overflow); adopt it so the next mutation diffs
                    // against reality.
                    inner.query.adopt_page(page.page);
                    inner.last_issued = Some(inner.query.key());
                }
                inner.snapshot.items = page.items;
                inner.snapshot.total = page.total;
                inner.snapshot.error = None;
            }
            Err(err) => {
                log::error!("list fetch failed: {err}");
                inner.snapshot.error = Some(err.to_string());
                inner.snapshot.items = Vec::new();
                inner.snapshot.total = 0;
                inner.total_pages = 1;
            }
        }
        inner.snapshot.total_pages = inner.total_pages;
        Self::sync_query_fields(&mut inner);
        self.publish(&inner);
    }

    /// Mirrors committed Query State into the snapshot and recomputes the
    /// page-link strip.
    fn sync_query_fields(inner: &mut Inner<T>) {
        inner.snapshot.page = inner.query.page();
        inner.snapshot.page_size = inner.query.page_size();
        inner.snapshot.filters = inner.query.filters().clone();
        inner.snapshot.pages = page_links(inner.query.page(), inner.total_pages);
    }

    fn publish(&self, inner: &Inner<T>) {
        self.tx.send_replace(inner.snapshot.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // A poisoned lock means a task panicked mid-update; the last
        // consistent state is still the best thing to show.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::MockFetcher;
    use crate::query::{FilterKind, FilterSpec};

    const SCHEMA: FilterSchema = FilterSchema::new(&[FilterSpec::new("status", FilterKind::Int)]);

    fn page(items: Vec<i64>) -> ResultPage<i64> {
        let total = items.len();
        ResultPage {
            items,
            total,
            total_pages: 1,
            page: 1,
        }
    }

    #[tokio::test]
    async fn construction_issues_exactly_one_fetch() {
        let mut fetcher = MockFetcher::<i64>::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(page(vec![1, 2, 3])));

        let list = ListController::new(Arc::new(fetcher), SCHEMA, ListConfig::default());
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        assert_eq!(list.snapshot().items, vec![1, 2, 3]);
        assert!(!list.snapshot().loading);
    }

    #[tokio::test]
    async fn subscribers_observe_loading_then_items() {
        let mut fetcher = MockFetcher::<i64>::new();
        fetcher.expect_fetch().returning(|_| Ok(page(vec![7])));

        let list = ListController::new(Arc::new(fetcher), SCHEMA, ListConfig::default());
        let mut rx = list.subscribe();

        rx.wait_for(|s| !s.loading && !s.items.is_empty())
            .await
            .expect("controller dropped");
        assert_eq!(list.snapshot().items, vec![7]);
    }
}
