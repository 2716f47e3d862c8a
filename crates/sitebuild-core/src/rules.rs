//! Field accessor rules
//!
//! Tracker exports have no fixed schema. Each output field is described by
//! a [`FieldRule`]: an ordered list of candidate keys, the first *truthy*
//! one wins. Supporting a new spelling means adding a key to a table, not
//! another branch in a normalizer.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sitebuild_core::rules::FieldRule;
//!
//! const TITLE: FieldRule = FieldRule::new("title", &["title", "book_title", "name"]);
//!
//! let book = json!({"book_title": "Dune"});
//! assert_eq!(TITLE.text(book.as_object().unwrap()).as_deref(), Some("Dune"));
//! ```

use serde_json::{Map, Value};

/// JSON object as produced by `serde_json`
pub type Object = Map<String, Value>;

/// Ordered candidate keys for one output field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Output field the rule feeds, named in fallback debug logs
    pub field: &'static str,
    /// Candidate keys, highest priority first
    pub keys: &'static [&'static str],
}

impl FieldRule {
    /// Define a rule
    pub const fn new(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self { field, keys }
    }

    /// First truthy value among the candidate keys
    pub fn value<'a>(&self, obj: &'a Object) -> Option<&'a Value> {
        let (i, key, value) = self
            .keys
            .iter()
            .enumerate()
            .find_map(|(i, key)| {
                obj.get(*key)
                    .filter(|v| is_truthy(v))
                    .map(|v| (i, key, v))
            })?;
        if i > 0 {
            tracing::debug!("{}: taken from fallback key '{}'", self.field, key);
        }
        Some(value)
    }

    /// First candidate holding a non-blank string, trimmed.
    ///
    /// Unlike [`FieldRule::value`], a key holding a number or a blank string
    /// does not stop the search.
    pub fn text(&self, obj: &Object) -> Option<String> {
        self.keys.iter().find_map(|key| {
            obj.get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    /// First truthy value rendered as display text
    pub fn display(&self, obj: &Object) -> Option<String> {
        self.value(obj).map(display)
    }

    /// First truthy value coerced to a number
    pub fn number(&self, obj: &Object) -> Option<f64> {
        self.value(obj).and_then(as_number)
    }
}

/// Where the list of records lives inside an export
#[derive(Debug, Clone, Copy)]
pub struct RecordSource {
    /// Keys that may hold the record array, highest priority first
    pub keys: &'static [&'static str],
    /// Whether an empty array under a candidate key still wins
    pub accept_empty: bool,
}

impl RecordSource {
    /// Define a record source where empty arrays fall through to the next key
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            accept_empty: false,
        }
    }

    /// Define a record source where any array under a candidate key wins
    pub const fn any_array(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            accept_empty: true,
        }
    }

    /// Locate the records of an export.
    ///
    /// A top-level array is used as-is. In an object, the first candidate
    /// key holding an array (non-empty unless `accept_empty`) wins; failing
    /// that, the object's values are the records. Any other shape yields
    /// `None`.
    pub fn records<'a>(&self, export: &'a Value) -> Option<Vec<&'a Value>> {
        match export {
            Value::Array(items) => Some(items.iter().collect()),
            Value::Object(obj) => {
                let list = self
                    .keys
                    .iter()
                    .filter_map(|key| obj.get(*key).and_then(Value::as_array))
                    .find(|items| self.accept_empty || !items.is_empty());
                Some(match list {
                    Some(items) => items.iter().collect(),
                    None => obj.values().collect(),
                })
            }
            _ => None,
        }
    }

    /// Like [`RecordSource::records`], keeping only JSON objects
    pub fn objects<'a>(&self, export: &'a Value) -> Option<Vec<&'a Object>> {
        self.records(export)
            .map(|records| records.into_iter().filter_map(Value::as_object).collect())
    }
}

/// Falsy values are skipped during probing: null, `false`, zero, and empty
/// strings, arrays or objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a value as plain text: strings verbatim, integers without a
/// fractional part, everything else as compact JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Coerce a JSON number or numeric string (optionally ending in `%`)
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Truncate toward zero into an integer count
pub fn truncate(value: f64) -> i64 {
    if value.is_finite() { value.trunc() as i64 } else { 0 }
}
