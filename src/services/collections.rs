//! Loads collection list and detail pages through their controllers.

use std::time::Duration;

use crate::client::QueryClient;
use crate::controller::{DetailController, ErrorRouter, Generation, ListController, Navigation};
use crate::domain::collection::Collection;
use crate::domain::state::{ControllerState, ErrorInfo};
use crate::domain::types::RecordId;
use crate::dto::collections::{DetailPageData, ListPageData};
use crate::services::{ServiceError, ServiceResult};

fn parse_collection(segment: &str) -> ServiceResult<Collection> {
    segment.parse().map_err(|_| {
        log::warn!("Unknown collection requested: {segment}");
        ServiceError::UnknownCollection(segment.to_string())
    })
}

fn settle<T, U>(
    router: &mut ErrorRouter,
    generation: Generation,
    state: &ControllerState<T>,
    ready: impl FnOnce(&T) -> U,
) -> ServiceResult<U> {
    if let Some(Navigation::Error(info)) = router.observe(generation, state) {
        return Err(ServiceError::Failed(info));
    }
    state.ready().map(ready).ok_or(ServiceError::Unsettled)
}

/// Loads one page of `collection` for the list view.
///
/// `token` is the zero-based page segment of the route and `search` the
/// filter text carried in the query string.
pub async fn load_list_page<C>(
    client: C,
    collection: &str,
    token: Option<&str>,
    search: Option<&str>,
    ceiling: Duration,
) -> ServiceResult<ListPageData>
where
    C: QueryClient,
{
    let config = parse_collection(collection)?.config();
    let mut controller = ListController::new(config, client)
        .with_filter(search.unwrap_or_default())
        .with_ceiling(ceiling);
    let mut router = ErrorRouter::new();

    let fetch = controller.mount(token);
    let generation = fetch.generation;
    let filter = controller.filter().to_string();
    let route = controller.route().to_string();
    let state = controller.run(fetch).await;

    settle(&mut router, generation, state, |page| {
        ListPageData::new(config, page, &filter, &route)
    })
}

/// Loads the record `id` of `collection` for the detail view.
pub async fn load_detail_page<C>(
    client: C,
    collection: &str,
    id: &str,
    ceiling: Duration,
) -> ServiceResult<DetailPageData>
where
    C: QueryClient,
{
    let config = parse_collection(collection)?.config();
    let id = RecordId::new(id).map_err(|err| {
        log::warn!("Invalid {collection} id `{id}`: {err}");
        ServiceError::Failed(ErrorInfo::not_found())
    })?;

    let mut controller = DetailController::new(config, client).with_ceiling(ceiling);
    let mut router = ErrorRouter::new();

    let fetch = controller.mount(id);
    let generation = fetch.generation;
    let state = controller.run(fetch).await;

    settle(&mut router, generation, state, |record| {
        DetailPageData::new(config, record)
    })
}
