//! Goodreads export -> `_data/reading.yml`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::{FieldRule, Object, RecordSource, as_number, truncate};

/// Tracker prefix of the Goodreads export
pub const SOURCE: &str = "goodreads";

/// Output file name inside `_data/`
pub const OUTPUT: &str = "reading.yml";

const BOOKS: RecordSource = RecordSource::any_array(&["books", "reading", "currently_reading"]);

const TITLE: FieldRule = FieldRule::new("titulo", &["title", "book_title", "name"]);
const AUTHOR_NAME: FieldRule = FieldRule::new("author", &["name", "full_name"]);
const PERCENT: FieldRule = FieldRule::new(
    "progress",
    &["percent", "progress", "percent_complete", "progress_percent"],
);
const CURRENT_PAGE: FieldRule =
    FieldRule::new("current_page", &["current_page", "page_read", "pages_read"]);
const TOTAL_PAGES: FieldRule = FieldRule::new(
    "total_pages",
    &["total_pages", "pages", "page_count", "pages_total"],
);

const UNKNOWN_TITLE: &str = "Título desconocido";
const UNKNOWN_AUTHOR: &str = "Autor desconocido";

/// A book currently being read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book title
    pub titulo: String,
    /// First listed author
    pub author: String,
    /// Percentage read, as a bare number string (the site appends `%`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

/// Normalize a Goodreads export; `None` when its shape is not recognized
pub fn normalize(export: &Value) -> Option<Vec<Book>> {
    let books = BOOKS.objects(export)?;
    Some(books.into_iter().map(book).collect())
}

fn book(obj: &Object) -> Book {
    Book {
        titulo: TITLE.text(obj).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        author: author(obj),
        progress: progress(obj).filter(|p| !p.is_empty()),
    }
}

fn author(obj: &Object) -> String {
    if let Some(author) = obj.get("author").and_then(Value::as_str) {
        return author.trim().to_string();
    }

    let named = match obj.get("authors") {
        Some(Value::Array(list)) => match list.first() {
            Some(Value::String(name)) => Some(name.trim().to_string()),
            Some(Value::Object(person)) => AUTHOR_NAME
                .value(person)
                .and_then(Value::as_str)
                .map(|name| name.trim().to_string()),
            _ => None,
        },
        Some(Value::String(names)) => Some(names.trim().to_string()),
        _ => None,
    };

    named.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

fn progress(obj: &Object) -> Option<String> {
    match PERCENT.value(obj) {
        Some(Value::Number(n)) => {
            return n.as_f64().map(|pct| truncate(pct).to_string());
        }
        Some(Value::String(s)) if !s.trim().is_empty() => {
            return Some(s.trim().replace('%', ""));
        }
        _ => {}
    }

    let current = CURRENT_PAGE.value(obj).filter(|v| v.is_number()).and_then(as_number)?;
    let total = TOTAL_PAGES.value(obj).filter(|v| v.is_number()).and_then(as_number)?;
    (total != 0.0).then(|| truncate(current / total * 100.0).to_string())
}
