//! Job documents and dotted-path field extraction.
//!
//! Jobs arrive from the listings feed as arbitrary JSON objects. Nothing about their
//! shape is trusted: any relation may be null, arrays may be empty, and leaves may be
//! numbers where strings were expected. Extraction therefore walks the raw
//! `serde_json::Value` tree and keeps only string leaves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A job posting as a nested document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job(Map<String, Value>);

impl Job {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value at `key` if it is a non-empty string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Display form of `id` for logs; ids may be strings or numbers upstream.
    pub fn id_label(&self) -> String {
        match self.0.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Resolves `path` and returns every string leaf it reaches, in document order.
    pub fn extract(&self, path: &str) -> Vec<&str> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut out = Vec::new();
        walk_object(&self.0, &segments, &mut out);
        out
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

fn walk_object<'a>(object: &'a Map<String, Value>, segments: &[&str], out: &mut Vec<&'a str>) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if let Some(child) = object.get(*head) {
        walk(child, rest, out);
    }
}

/// `value` is the node reached after consuming a key; `rest` is what remains of the path.
fn walk<'a>(value: &'a Value, rest: &[&str], out: &mut Vec<&'a str>) {
    match value {
        Value::Null => {}
        // Arrays branch: every element continues with the same remaining segments.
        Value::Array(items) => {
            for item in items {
                walk(item, rest, out);
            }
        }
        Value::String(s) if rest.is_empty() => out.push(s.as_str()),
        Value::Object(map) if !rest.is_empty() => walk_object(map, rest, out),
        // Non-string leaves, and scalars with path left to walk, contribute nothing.
        _ => {}
    }
}
