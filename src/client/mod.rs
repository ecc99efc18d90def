//! Transport to the remote query service.
//!
//! Both operations are single-shot: no retry and no caching. Every call
//! reaches the remote service and any failure is returned to the caller
//! unchanged.

use std::future::Future;
use std::sync::Arc;

use crate::domain::page::{Page, Record};
use crate::domain::query::{DetailRequest, Query};

pub mod errors;
pub mod http;
pub mod wire;

pub use errors::{TransportError, TransportResult};
pub use http::HttpQueryClient;

pub trait QueryClient {
    /// Fetches one page of `query.collection`.
    fn run_query(&self, query: &Query) -> impl Future<Output = TransportResult<Page<Record>>>;

    /// Fetches the record matching `request.id`; the result holds zero or one
    /// element.
    fn get_by_id(
        &self,
        request: &DetailRequest,
    ) -> impl Future<Output = TransportResult<Vec<Record>>>;
}

impl<T: QueryClient + ?Sized> QueryClient for &T {
    fn run_query(&self, query: &Query) -> impl Future<Output = TransportResult<Page<Record>>> {
        (**self).run_query(query)
    }

    fn get_by_id(
        &self,
        request: &DetailRequest,
    ) -> impl Future<Output = TransportResult<Vec<Record>>> {
        (**self).get_by_id(request)
    }
}

impl<T: QueryClient + ?Sized> QueryClient for Arc<T> {
    fn run_query(&self, query: &Query) -> impl Future<Output = TransportResult<Page<Record>>> {
        (**self).run_query(query)
    }

    fn get_by_id(
        &self,
        request: &DetailRequest,
    ) -> impl Future<Output = TransportResult<Vec<Record>>> {
        (**self).get_by_id(request)
    }
}
