//! Pages of results and the schemaless records they carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{PageIndex, PageSize};

/// One bounded slice of a collection plus the server's pagination metadata.
///
/// The flags are taken verbatim from the server and never recomputed here:
/// the service may count filtered documents differently from the client.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Records in server order.
    pub items: Vec<T>,
    pub page: PageIndex,
    pub page_size: PageSize,
    pub has_previous: bool,
    pub has_next: bool,
    pub total_pages: Option<usize>,
    pub total_items: Option<usize>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A document returned by the remote service, kept as JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Identifier as exposed by the service (`id`, falling back to `_id`).
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("id")
            .or_else(|| self.0.get("_id"))
            .and_then(Value::as_str)
    }

    /// Looks up a dot-separated path such as `links.patch.small`. Numeric
    /// segments index into arrays.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Renders a scalar at `path` for display, or `None` for missing, null and
    /// structured values.
    pub fn display_at(&self, path: &str) -> Option<String> {
        scalar_to_string(self.get(path)?)
    }

    /// Number of elements of the array at `path`, zero when absent.
    pub fn len_at(&self, path: &str) -> usize {
        self.get(path).and_then(Value::as_array).map_or(0, Vec::len)
    }

    /// Records expanded inline under `relation`: a single object or an array
    /// of objects. Unexpanded references (plain id strings) are skipped.
    pub fn related(&self, relation: &str) -> Vec<Record> {
        match self.0.get(relation) {
            Some(Value::Object(map)) => vec![Record(map.clone())],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(Record))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Display form of a JSON scalar.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        _ => None,
    }
}
