//! JSON bodies of `POST /{collection}/query`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::client::errors::{TransportError, TransportResult};
use crate::domain::page::{Page, Record};
use crate::domain::query::{DetailRequest, Filter, MatchExpr, Query};
use crate::domain::types::{PageIndex, PageSize};

/// Request body understood by the remote query endpoint.
#[derive(Debug, Serialize, PartialEq)]
pub struct QueryBody {
    pub query: Map<String, Value>,
    pub options: QueryOptions,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub populate: Vec<String>,
}

/// Paginated response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocs {
    pub docs: Vec<Record>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub has_prev_page: bool,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub total_docs: Option<usize>,
}

fn encode_filter(filter: &Filter) -> Map<String, Value> {
    filter
        .iter()
        .map(|(field, expr)| {
            let value = match expr {
                MatchExpr::Equals(value) => Value::String(value.clone()),
                MatchExpr::ContainsIgnoreCase(text) => json!({
                    "$regex": regex::escape(text),
                    "$options": "i",
                }),
            };
            (field.clone(), value)
        })
        .collect()
}

impl From<&Query> for QueryBody {
    fn from(query: &Query) -> Self {
        Self {
            query: encode_filter(&query.filter),
            options: QueryOptions {
                page: Some(query.page.get()),
                limit: Some(query.page_size.get()),
                populate: query.populate.clone(),
            },
        }
    }
}

impl From<&DetailRequest> for QueryBody {
    fn from(request: &DetailRequest) -> Self {
        Self {
            query: encode_filter(&Filter::id_equals(&request.id)),
            options: QueryOptions {
                populate: request.populate.clone(),
                ..QueryOptions::default()
            },
        }
    }
}

impl PaginatedDocs {
    /// Converts the body into a [`Page`], falling back to the requested page
    /// and size when the server omits them.
    pub fn into_page(self, query: &Query) -> TransportResult<Page<Record>> {
        let page = match self.page {
            Some(page) => PageIndex::new(page)
                .map_err(|err| TransportError::Decode(format!("page: {err}")))?,
            None => query.page,
        };
        let page_size = match self.limit {
            Some(limit) => PageSize::new(limit)
                .map_err(|err| TransportError::Decode(format!("limit: {err}")))?,
            None => query.page_size,
        };

        Ok(Page {
            items: self.docs,
            page,
            page_size,
            has_previous: self.has_prev_page,
            has_next: self.has_next_page,
            total_pages: self.total_pages,
            total_items: self.total_docs,
        })
    }
}
