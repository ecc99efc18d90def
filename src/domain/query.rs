//! Remote query descriptions: paginated list queries and single-record lookups.

use std::collections::BTreeMap;

use crate::domain::collection::{Collection, CollectionConfig};
use crate::domain::types::{PageIndex, PageSize, RecordId};

/// How a single field is matched by the remote service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchExpr {
    /// Field equals the value verbatim.
    Equals(String),
    /// Field contains the value, ignoring case.
    ContainsIgnoreCase(String),
}

/// Mapping of field name to match expression. Ordered so the encoded request
/// body is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter(BTreeMap<String, MatchExpr>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring filter on `field`. Blank text yields an
    /// empty filter so records missing the field are not excluded.
    pub fn contains(field: &str, text: &str) -> Self {
        let mut filter = Self::new();
        if !text.trim().is_empty() {
            filter.insert(field, MatchExpr::ContainsIgnoreCase(text.to_string()));
        }
        filter
    }

    /// Identifier equality filter used by detail lookups.
    pub fn id_equals(id: &RecordId) -> Self {
        let mut filter = Self::new();
        filter.insert("_id", MatchExpr::Equals(id.to_string()));
        filter
    }

    pub fn insert(&mut self, field: impl Into<String>, expr: MatchExpr) {
        self.0.insert(field.into(), expr);
    }

    pub fn get(&self, field: &str) -> Option<&MatchExpr> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MatchExpr)> {
        self.0.iter()
    }
}

/// One paginated list query against a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub collection: Collection,
    pub filter: Filter,
    pub page: PageIndex,
    pub page_size: PageSize,
    pub populate: Vec<String>,
}

impl Query {
    /// Builds the list query for `config`, applying the collection's search
    /// field and relation expansion. `text` is ignored for collections
    /// without a search field.
    pub fn for_list(config: &CollectionConfig, text: &str, page: PageIndex) -> Self {
        let filter = match config.search_field {
            Some(field) => Filter::contains(field, text),
            None => Filter::new(),
        };

        Self {
            collection: config.collection,
            filter,
            page,
            page_size: PageSize::new(config.page_size).unwrap_or_default(),
            populate: config.list_populate.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lookup of one record by identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub collection: Collection,
    pub id: RecordId,
    pub populate: Vec<String>,
}

impl DetailRequest {
    pub fn for_detail(config: &CollectionConfig, id: RecordId) -> Self {
        Self {
            collection: config.collection,
            id,
            populate: config
                .detail_populate
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
