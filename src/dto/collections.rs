//! DTOs shaped for the collection list and detail templates.

use serde::Serialize;
use serde_json::Value;

use crate::controller::detail::detail_route;
use crate::domain::collection::{Collection, CollectionConfig};
use crate::domain::page::{Page, Record, scalar_to_string};
use crate::dto::cards::{CardView, format_date, render_card};
use crate::pagination::PaginationControl;

/// Fields shown as the detail page title, in order of preference.
const TITLE_FIELDS: &[&str] = &["name", "full_name", "serial"];

/// Fields never listed among a record's details.
const HIDDEN_FIELDS: &[&str] = &["id", "_id", "__v"];

/// Everything the list template needs for one page of a collection.
#[derive(Debug, Clone, Serialize)]
pub struct ListPageData {
    pub collection: Collection,
    pub title: &'static str,
    pub cards: Vec<CardView>,
    pub pagination: PaginationControl,
    pub search_enabled: bool,
    pub search_query: String,
    /// Target of the search form: the first page of the collection.
    pub search_action: String,
    pub route: String,
}

impl ListPageData {
    pub fn new(
        config: &'static CollectionConfig,
        page: &Page<Record>,
        search_query: &str,
        route: &str,
    ) -> Self {
        let collection = config.collection;
        let search = config.has_search().then_some(search_query);
        Self {
            collection,
            title: collection.title(),
            cards: page
                .items
                .iter()
                .map(|record| render_card(collection, record))
                .collect(),
            pagination: PaginationControl::new(config, page, search),
            search_enabled: config.has_search(),
            search_query: search.unwrap_or_default().to_string(),
            search_action: format!("/{collection}/page/0"),
            route: route.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldDisplay {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RelatedItem {
    pub href: String,
    pub title: String,
}

/// Expanded records of one relation, linking to their own detail pages.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RelatedSection {
    pub title: String,
    pub items: Vec<RelatedItem>,
}

/// Aggregated data required to render a record's detail page.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPageData {
    pub collection: Collection,
    pub collection_title: &'static str,
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub fields: Vec<FieldDisplay>,
    pub related: Vec<RelatedSection>,
    pub webcast: Option<String>,
    pub back: String,
}

impl DetailPageData {
    pub fn new(config: &'static CollectionConfig, record: &Record) -> Self {
        let collection = config.collection;
        let relations = config.detail_populate;

        let fields = record
            .fields()
            .filter(|(key, _)| {
                !HIDDEN_FIELDS.contains(&key.as_str()) && !relations.contains(&key.as_str())
            })
            .filter_map(|(key, value)| {
                field_value(key, value).map(|value| FieldDisplay {
                    label: humanize(key),
                    value,
                })
            })
            .collect();

        let related = relations
            .iter()
            .filter_map(|relation| related_section(relation, record))
            .collect();

        Self {
            collection,
            collection_title: collection.title(),
            id: record.id().unwrap_or_default().to_string(),
            title: TITLE_FIELDS
                .iter()
                .find_map(|field| record.display_at(field))
                .unwrap_or_else(|| record.id().unwrap_or("N/A").to_string()),
            image: render_card(collection, record).image,
            fields,
            related,
            webcast: record.str_at("links.webcast").map(str::to_string),
            back: format!("/{collection}/page/0"),
        }
    }
}

fn related_section(relation: &str, record: &Record) -> Option<RelatedSection> {
    let target = Collection::from_relation(relation)?;
    let items: Vec<RelatedItem> = record
        .related(relation)
        .iter()
        .filter_map(|related| {
            let id = related.id()?;
            Some(RelatedItem {
                href: detail_route(target.config(), id),
                title: TITLE_FIELDS
                    .iter()
                    .find_map(|field| related.display_at(field))
                    .unwrap_or_else(|| id.to_string()),
            })
        })
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(RelatedSection {
        title: humanize(relation),
        items,
    })
}

/// Display value of a top-level field. Dates are formatted, scalar arrays are
/// joined and nested objects are left out.
fn field_value(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(raw) if key.ends_with("_utc") => Some(format_date(raw)),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => scalar_to_string(other).filter(|s| !s.is_empty()),
    }
}

/// `home_port` -> `Home port`.
fn humanize(key: &str) -> String {
    let words = key.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
