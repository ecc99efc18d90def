//! Single-record fetch controller used by every detail view.

use std::time::Duration;

use crate::client::http::DEFAULT_TIMEOUT;
use crate::client::{QueryClient, TransportResult};
use crate::controller::{Generation, Resolution, with_ceiling};
use crate::domain::collection::CollectionConfig;
use crate::domain::page::Record;
use crate::domain::query::DetailRequest;
use crate::domain::state::{ControllerState, ErrorInfo};
use crate::domain::types::RecordId;

/// Route of the detail view for `id`.
pub fn detail_route(config: &CollectionConfig, id: &str) -> String {
    format!("/{}/{}", config.collection, id)
}

#[derive(Debug, Clone)]
pub struct DetailFetch {
    pub generation: Generation,
    pub request: DetailRequest,
}

pub struct DetailController<C> {
    config: &'static CollectionConfig,
    client: C,
    ceiling: Duration,
    state: ControllerState<Record>,
    generation: Generation,
    mounted: bool,
}

impl<C: QueryClient> DetailController<C> {
    pub fn new(config: &'static CollectionConfig, client: C) -> Self {
        Self {
            config,
            client,
            ceiling: DEFAULT_TIMEOUT,
            state: ControllerState::Loading,
            generation: Generation::default(),
            mounted: true,
        }
    }

    #[must_use]
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Mount trigger, re-issued whenever the identifier in the route changes.
    pub fn mount(&mut self, id: RecordId) -> DetailFetch {
        self.mounted = true;
        self.generation = self.generation.next();
        self.state = ControllerState::Loading;

        log::debug!(
            "Fetching {} {id} (generation {})",
            self.config.collection,
            self.generation.get()
        );

        DetailFetch {
            generation: self.generation,
            request: DetailRequest::for_detail(self.config, id),
        }
    }

    pub async fn perform(&self, fetch: &DetailFetch) -> TransportResult<Vec<Record>> {
        with_ceiling(self.ceiling, self.client.get_by_id(&fetch.request)).await
    }

    /// Applies the outcome of `fetch` if it is still current. Zero matches
    /// fail the view with `404 Not Found`, the same path as a transport error.
    pub fn resolve(
        &mut self,
        fetch: &DetailFetch,
        outcome: TransportResult<Vec<Record>>,
    ) -> Resolution {
        if !self.mounted || fetch.generation != self.generation {
            log::debug!(
                "Discarding stale {} {} response",
                self.config.collection,
                fetch.request.id
            );
            return Resolution::Stale;
        }

        self.state = match outcome {
            Ok(records) => match records.into_iter().next() {
                Some(record) => ControllerState::Ready(record),
                None => {
                    log::info!("{} {} not found", self.config.collection, fetch.request.id);
                    ControllerState::Failed(ErrorInfo::not_found())
                }
            },
            Err(err) => {
                log::error!(
                    "Failed to fetch {} {}: {err}",
                    self.config.collection,
                    fetch.request.id
                );
                ControllerState::Failed(ErrorInfo::from(&err))
            }
        };
        Resolution::Applied
    }

    pub async fn run(&mut self, fetch: DetailFetch) -> &ControllerState<Record> {
        let outcome = self.perform(&fetch).await;
        self.resolve(&fetch, outcome);
        &self.state
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation = self.generation.next();
    }

    pub fn state(&self) -> &ControllerState<Record> {
        &self.state
    }

    pub fn config(&self) -> &'static CollectionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::TransportError;
    use crate::domain::collection::Collection;
    use crate::domain::page::Page;
    use crate::domain::query::{MatchExpr, Query};

    struct SingleRecordClient;

    impl QueryClient for SingleRecordClient {
        async fn run_query(&self, _query: &Query) -> TransportResult<Page<Record>> {
            Err(TransportError::Network("unused".to_string()))
        }

        async fn get_by_id(&self, request: &DetailRequest) -> TransportResult<Vec<Record>> {
            if request.id.as_str() == "known" {
                let record = serde_json::from_value(json!({"id": "known", "name": "Falcon 9"}))
                    .map_err(TransportError::from)?;
                Ok(vec![record])
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn id(raw: &str) -> RecordId {
        RecordId::new(raw).expect("valid id")
    }

    #[tokio::test]
    async fn known_id_becomes_ready() {
        let mut controller =
            DetailController::new(Collection::Rockets.config(), SingleRecordClient);
        let fetch = controller.mount(id("known"));

        let state = controller.run(fetch).await;

        assert_eq!(state.ready().and_then(Record::id), Some("known"));
    }

    #[tokio::test]
    async fn unknown_id_fails_with_not_found() {
        let mut controller =
            DetailController::new(Collection::Rockets.config(), SingleRecordClient);
        let fetch = controller.mount(id("missing"));

        let state = controller.run(fetch).await;

        assert_eq!(state.error(), Some(&ErrorInfo::not_found()));
    }

    #[test]
    fn mount_requests_detail_relations_by_id() {
        let mut controller = DetailController::new(Collection::Cores.config(), SingleRecordClient);

        let fetch = controller.mount(id("5e9e289df35918033d3b2623"));

        assert_eq!(fetch.request.populate, vec!["launches".to_string()]);
        assert_eq!(
            crate::domain::query::Filter::id_equals(&fetch.request.id).get("_id"),
            Some(&MatchExpr::Equals("5e9e289df35918033d3b2623".to_string()))
        );
    }

    #[test]
    fn remount_for_new_id_discards_previous_lookup() {
        let mut controller = DetailController::new(Collection::Cores.config(), SingleRecordClient);
        let first = controller.mount(id("a"));
        let second = controller.mount(id("b"));

        assert_eq!(
            controller.resolve(&first, Ok(Vec::new())),
            Resolution::Stale
        );
        assert!(controller.state().is_loading());
        assert_eq!(
            controller.resolve(&second, Ok(Vec::new())),
            Resolution::Applied
        );
        assert_eq!(controller.state().error(), Some(&ErrorInfo::not_found()));
    }

    #[test]
    fn detail_route_uses_collection_segment() {
        assert_eq!(
            detail_route(Collection::LaunchPads.config(), "5e9e4501f509094ba4566f84"),
            "/launchpads/5e9e4501f509094ba4566f84"
        );
    }
}
