//! State behind the search results view.

pub mod history;

use tracing::{debug, info, warn};

use crate::api::SpaceApi;
use crate::filters::{self, Chip, FilterState, Indicator};
use crate::models::SearchResult;
use crate::pagination::{self, PageWindow, Paginator};
use crate::query::{CriteriaKey, QueryStateStore, SearchCriteria};
use crate::range;

pub use history::{MemoryHistory, Navigator};

pub const SEARCH_PATH: &str = "/search";

/// Search term the landing page uses to show the view without results.
pub const EMPTY_SEARCH_TERM: &str = "empty";

/// Number of result cards shown per fetch.
pub const MAX_RESULTS: usize = 9;

/// Criteria, indicator chips and fetched results of one search view.
#[derive(Debug, Clone)]
pub struct SearchSession {
    store: QueryStateStore,
    catalog: Vec<Indicator>,
    chips: Vec<Chip>,
    results: Vec<SearchResult>,
}

impl SearchSession {
    pub fn new(query: &str) -> Self {
        Self::with_catalog(query, filters::default_indicators())
    }

    pub fn with_catalog(query: &str, catalog: Vec<Indicator>) -> Self {
        let store = QueryStateStore::from_query(query);
        let chips = filters::chips(store.criteria(), &catalog);
        Self {
            store,
            catalog,
            chips,
            results: Vec::new(),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        self.store.criteria()
    }

    pub fn store(&self) -> &QueryStateStore {
        &self.store
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Filter panel seeded from the current criteria.
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_criteria(self.store.criteria(), &self.catalog)
    }

    /// Apply one criteria change and replace the current history entry.
    pub fn update_search(
        &mut self,
        key: CriteriaKey,
        value: Option<&str>,
        navigator: &mut dyn Navigator,
    ) -> &SearchCriteria {
        self.store.update(key, value);
        self.after_change(navigator)
    }

    pub fn apply_filters(
        &mut self,
        state: &FilterState,
        navigator: &mut dyn Navigator,
    ) -> &SearchCriteria {
        self.store.apply_filters(&state.build_payload(None));
        self.after_change(navigator)
    }

    pub fn page_window(&self, total_count: u64) -> PageWindow {
        let criteria = self.store.criteria();
        Paginator::new(SEARCH_PATH, self.store.params()).window(
            total_count,
            criteria.page_size,
            criteria.page_number,
        )
    }

    /// Range label for the same page the pagination window shows.
    pub fn range_label(&self, total_count: u64) -> Option<String> {
        let criteria = self.store.criteria();
        let last_page = pagination::total_pages(total_count, criteria.page_size).max(1);
        let page = criteria.page_number.clamp(1, last_page);
        range::range_label(page, criteria.page_size, total_count)
    }

    /// Re-fetch results for the current criteria.
    ///
    /// Blank searches clear the list without a request. A failed request is
    /// logged and also clears the list.
    pub async fn refresh(&mut self, api: &dyn SpaceApi) -> &[SearchResult] {
        let term = &self.store.criteria().search_term;
        if term.is_empty() || term == EMPTY_SEARCH_TERM {
            debug!("No search term, skipping fetch");
            self.results.clear();
            return &self.results;
        }

        match api.search_spaces(self.store.criteria()).await {
            Ok(response) => {
                self.results = response
                    .data
                    .iter()
                    .take(MAX_RESULTS)
                    .map(SearchResult::from_raw)
                    .collect();
                info!("Showing {} search results", self.results.len());
            }
            Err(e) => {
                warn!("Search request failed: {}", e);
                self.results.clear();
            }
        }
        &self.results
    }

    fn after_change(&mut self, navigator: &mut dyn Navigator) -> &SearchCriteria {
        navigator.replace(SEARCH_PATH, &self.store.serialize());
        self.chips = filters::chips(self.store.criteria(), &self.catalog);
        self.store.criteria()
    }
}
