//! Paginated search-and-fetch controller shared by every collection list.

use std::time::Duration;

use crate::client::http::DEFAULT_TIMEOUT;
use crate::client::{QueryClient, TransportResult};
use crate::controller::{Generation, Resolution, with_ceiling};
use crate::domain::collection::CollectionConfig;
use crate::domain::page::{Page, Record};
use crate::domain::query::Query;
use crate::domain::state::{ControllerState, ErrorInfo};
use crate::domain::types::PageIndex;

/// Route of the list view showing one-based `page`.
///
/// The route token is zero-based while the query page is one-based.
pub fn list_route(config: &CollectionConfig, page: PageIndex) -> String {
    format!("/{}/page/{}", config.collection, page.route_token())
}

/// A list query issued by a trigger, awaiting its outcome.
#[derive(Debug, Clone)]
pub struct ListFetch {
    pub generation: Generation,
    pub query: Query,
}

pub struct ListController<C> {
    config: &'static CollectionConfig,
    client: C,
    ceiling: Duration,
    state: ControllerState<Page<Record>>,
    filter: String,
    route: String,
    generation: Generation,
    mounted: bool,
}

impl<C: QueryClient> ListController<C> {
    pub fn new(config: &'static CollectionConfig, client: C) -> Self {
        Self {
            config,
            client,
            ceiling: DEFAULT_TIMEOUT,
            state: ControllerState::Loading,
            filter: String::new(),
            route: list_route(config, PageIndex::FIRST),
            generation: Generation::default(),
            mounted: true,
        }
    }

    /// Seeds the filter text used by the mount query. Ignored for collections
    /// without a search field.
    #[must_use]
    pub fn with_filter(mut self, text: impl Into<String>) -> Self {
        if self.config.has_search() {
            self.filter = text.into();
        }
        self
    }

    #[must_use]
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Mount trigger. `route_token` is the zero-based page segment of the
    /// route; absent or unparsable tokens select the first page.
    pub fn mount(&mut self, route_token: Option<&str>) -> ListFetch {
        let token = route_token
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0);
        self.mounted = true;
        self.issue(PageIndex::from_route_token(token))
    }

    /// Page change trigger: re-queries `page` with the current filter and
    /// rewrites the route to the page's zero-based token.
    pub fn change_page(&mut self, page: PageIndex) -> ListFetch {
        self.issue(page)
    }

    /// Filter change trigger: every change re-queries the first page with the
    /// new text. No debouncing.
    pub fn change_filter(&mut self, text: impl Into<String>) -> ListFetch {
        if self.config.has_search() {
            self.filter = text.into();
        }
        self.issue(PageIndex::FIRST)
    }

    fn issue(&mut self, page: PageIndex) -> ListFetch {
        self.generation = self.generation.next();
        self.route = list_route(self.config, page);
        self.state = ControllerState::Loading;

        let query = Query::for_list(self.config, &self.filter, page);
        log::debug!(
            "Issuing {} page {} (generation {})",
            self.config.collection,
            page,
            self.generation.get()
        );

        ListFetch {
            generation: self.generation,
            query,
        }
    }

    /// Performs the remote call for `fetch` under the timeout ceiling without
    /// touching controller state.
    pub async fn perform(&self, fetch: &ListFetch) -> TransportResult<Page<Record>> {
        with_ceiling(self.ceiling, self.client.run_query(&fetch.query)).await
    }

    /// Applies the outcome of `fetch` if it is still the current trigger.
    pub fn resolve(
        &mut self,
        fetch: &ListFetch,
        outcome: TransportResult<Page<Record>>,
    ) -> Resolution {
        if !self.mounted || fetch.generation != self.generation {
            log::debug!(
                "Discarding stale {} response (generation {}, current {})",
                self.config.collection,
                fetch.generation.get(),
                self.generation.get()
            );
            return Resolution::Stale;
        }

        self.state = match outcome {
            Ok(page) => ControllerState::Ready(page),
            Err(err) => {
                log::error!("Failed to list {}: {err}", self.config.collection);
                ControllerState::Failed(ErrorInfo::from(&err))
            }
        };
        Resolution::Applied
    }

    /// Performs and resolves `fetch`, returning the resulting state.
    pub async fn run(&mut self, fetch: ListFetch) -> &ControllerState<Page<Record>> {
        let outcome = self.perform(&fetch).await;
        self.resolve(&fetch, outcome);
        &self.state
    }

    /// Ends the view's lifetime; any outcome still in flight is discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation = self.generation.next();
    }

    pub fn state(&self) -> &ControllerState<Page<Record>> {
        &self.state
    }

    pub fn config(&self) -> &'static CollectionConfig {
        self.config
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Route the view is synchronized to.
    pub fn route(&self) -> &str {
        &self.route
    }
}
