//! Shared fixtures for integration tests: sample documents, an in-memory
//! query client and a fake remote query API served over HTTP.
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use regex::RegexBuilder;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use spacexplorer::client::wire::PaginatedDocs;
use spacexplorer::client::{QueryClient, TransportResult};
use spacexplorer::domain::collection::Collection;
use spacexplorer::domain::page::{Page, Record};
use spacexplorer::domain::query::{DetailRequest, Filter, MatchExpr, Query};

/// Slices `docs` the way the remote service paginates: at least one page,
/// and pages past the end are empty.
pub fn paginate(docs: Vec<Value>, page: usize, limit: usize) -> Value {
    let total = docs.len();
    let total_pages = total.div_ceil(limit).max(1);
    let items: Vec<Value> = docs
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    json!({
        "docs": items,
        "totalDocs": total,
        "limit": limit,
        "page": page,
        "totalPages": total_pages,
        "hasPrevPage": page > 1,
        "hasNextPage": page < total_pages,
        "prevPage": if page > 1 { json!(page - 1) } else { Value::Null },
        "nextPage": if page < total_pages { json!(page + 1) } else { Value::Null },
    })
}

pub fn cores(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            json!({
                "id": format!("core-{i:03}"),
                "serial": format!("B{}", 1000 + i),
                "status": if i % 2 == 0 { "active" } else { "lost" },
                "launches": [],
            })
        })
        .collect()
}

pub fn payloads() -> Vec<Value> {
    [
        "FalconSAT-2",
        "Falcon 9 Test Flight",
        "Starlink-1",
        "Crew Dragon (Demo-2)",
        "Tesla Roadster",
        "FALCON EYE 2",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| {
        json!({
            "id": format!("payload-{i}"),
            "name": name,
            "type": "Satellite",
            "orbit": "LEO",
            "reused": false,
            "launch": {
                "id": format!("launch-{i}"),
                "name": format!("Launch {i}"),
                "date_utc": "2020-03-07T04:50:31.000Z",
            },
        })
    })
    .collect()
}

pub fn ships() -> Vec<Value> {
    vec![json!({
        "id": "ship-1",
        "name": "GO Ms Tree",
        "type": "High Speed Craft",
        "home_port": "Port Canaveral",
        "active": false,
        "launches": [{"id": "launch-0", "name": "Launch 0"}],
    })]
}

fn field_str<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    let key = if field == "_id" { "id" } else { field };
    doc.get(key).and_then(Value::as_str)
}

fn matches_filter(doc: &Value, filter: &Filter) -> bool {
    filter.iter().all(|(field, expr)| {
        let Some(value) = field_str(doc, field) else {
            return false;
        };
        match expr {
            MatchExpr::Equals(expected) => value == expected,
            MatchExpr::ContainsIgnoreCase(text) => {
                value.to_lowercase().contains(&text.to_lowercase())
            }
        }
    })
}

/// In-memory stand-in for the remote service.
#[derive(Default)]
pub struct MemoryApi {
    collections: HashMap<Collection, Vec<Value>>,
    hang: bool,
    calls: Cell<usize>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, collection: Collection, docs: Vec<Value>) -> Self {
        self.collections.insert(collection, docs);
        self
    }

    /// Never answers any call.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn select(&self, collection: Collection, filter: &Filter) -> Vec<Value> {
        self.collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl QueryClient for MemoryApi {
    async fn run_query(&self, query: &Query) -> TransportResult<Page<Record>> {
        self.calls.set(self.calls.get() + 1);
        if self.hang {
            std::future::pending::<()>().await;
        }
        let docs = self.select(query.collection, &query.filter);
        let body = paginate(docs, query.page.get(), query.page_size.get());
        let docs: PaginatedDocs = serde_json::from_value(body)?;
        docs.into_page(query)
    }

    async fn get_by_id(&self, request: &DetailRequest) -> TransportResult<Vec<Record>> {
        self.calls.set(self.calls.get() + 1);
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.select(request.collection, &Filter::id_equals(&request.id))
            .into_iter()
            .take(1)
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }
}

/// How the fake API answers queries against one collection.
#[derive(Clone, Debug)]
pub enum Behavior {
    Serve(Vec<Value>),
    Status(u16),
    Garbage,
    Slow(Duration, Vec<Value>),
}

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: Map<String, Value>,
    #[serde(default)]
    options: QueryRequestOptions,
}

#[derive(Default, Deserialize)]
struct QueryRequestOptions {
    page: Option<usize>,
    limit: Option<usize>,
}

fn regex_matches(doc: &Value, field: &str, spec: &Map<String, Value>) -> Result<bool, String> {
    let pattern = spec
        .get("$regex")
        .and_then(Value::as_str)
        .ok_or("missing $regex")?;
    let insensitive = spec
        .get("$options")
        .and_then(Value::as_str)
        .is_some_and(|o| o.contains('i'));
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(insensitive)
        .build()
        .map_err(|e| e.to_string())?;
    Ok(field_str(doc, field).is_some_and(|value| regex.is_match(value)))
}

fn evaluate(docs: &[Value], query: &Map<String, Value>) -> Result<Vec<Value>, String> {
    let mut selected = Vec::new();
    for doc in docs {
        let mut keep = true;
        for (field, condition) in query {
            keep &= match condition {
                Value::String(expected) => field_str(doc, field) == Some(expected.as_str()),
                Value::Object(spec) => regex_matches(doc, field, spec)?,
                other => return Err(format!("unsupported condition {other}")),
            };
        }
        if keep {
            selected.push(doc.clone());
        }
    }
    Ok(selected)
}

async fn handle_query(
    path: web::Path<String>,
    body: web::Json<QueryRequest>,
    behaviors: web::Data<Arc<HashMap<String, Behavior>>>,
) -> HttpResponse {
    let docs = match behaviors.get(path.as_str()) {
        None => Vec::new(),
        Some(Behavior::Serve(docs)) => docs.clone(),
        Some(Behavior::Status(code)) => {
            let status = actix_web::http::StatusCode::from_u16(*code)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            return HttpResponse::build(status).json(json!({"error": "failure"}));
        }
        Some(Behavior::Garbage) => {
            return HttpResponse::Ok()
                .content_type("application/json")
                .body("<html>not json</html>");
        }
        Some(Behavior::Slow(delay, docs)) => {
            actix_web::rt::time::sleep(*delay).await;
            docs.clone()
        }
    };

    let selected = match evaluate(&docs, &body.query) {
        Ok(selected) => selected,
        Err(message) => return HttpResponse::InternalServerError().json(json!({"error": message})),
    };
    let page = body.options.page.unwrap_or(1).max(1);
    let limit = body.options.limit.unwrap_or(10).max(1);
    HttpResponse::Ok().json(paginate(selected, page, limit))
}

/// Fake remote query API listening on an ephemeral local port.
pub struct FakeApi {
    behaviors: HashMap<String, Behavior>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    pub fn with(mut self, collection: Collection, behavior: Behavior) -> Self {
        self.behaviors.insert(collection.as_str().to_string(), behavior);
        self
    }

    /// Starts the server on the current actix runtime and returns its base URL.
    pub fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local address").port();
        let behaviors = Arc::new(self.behaviors);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(behaviors.clone()))
                .route("/{collection}/query", web::post().to(handle_query))
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        actix_web::rt::spawn(server);

        format!("http://127.0.0.1:{port}")
    }
}

/// Base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
