//! YAML front matter
//!
//! A document carries a header only when its first line is `---` and a
//! later line is `---` again. Headers are kept as an insertion-ordered
//! [`Mapping`] so rewriting a note never reorders its keys.

use serde_yaml::{Mapping, Value};

use crate::error::Result;

/// Delimiter line opening and closing a header block
pub const DELIMITER: &str = "---";

/// A document split into header and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Parsed header, `None` when the document has no delimited block
    pub header: Option<Mapping>,
    /// Everything after the closing delimiter (or the whole text)
    pub body: String,
}

impl Document {
    /// Split `content` into header and body.
    ///
    /// A header that is not valid YAML, or not a mapping, becomes an empty
    /// mapping; the body is still returned.
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();

        let opens = lines
            .first()
            .is_some_and(|first| first.trim_end() == DELIMITER);
        let close = lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, line)| line.trim() == DELIMITER)
            .map(|(idx, _)| idx);

        let (true, Some(close)) = (opens, close) else {
            return Self {
                header: None,
                body: content.to_string(),
            };
        };

        let header_text = lines[1..close].join("\n");
        let body = lines[close + 1..].join("\n");

        Self {
            header: Some(parse_header(&header_text)),
            body,
        }
    }

    /// Reassemble header and body
    pub fn render(&self) -> Result<String> {
        match &self.header {
            Some(header) => Ok(format!("{}{}", build(header)?, self.body)),
            None => Ok(self.body.clone()),
        }
    }
}

fn parse_header(text: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(map)) => map,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            tracing::warn!("front matter is not a mapping ({:?}); ignoring it", kind(&other));
            Mapping::new()
        }
        Err(e) => {
            tracing::warn!("could not parse front matter: {}", e);
            Mapping::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

/// Serialize a header as a delimited block ending in a newline
pub fn build(header: &Mapping) -> Result<String> {
    let yaml = if header.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(header)?
    };
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Look up a string key
pub fn get<'a>(header: &'a Mapping, key: &str) -> Option<&'a Value> {
    header.get(Value::String(key.to_string()))
}

/// First truthy value among `keys`
pub fn first<'a>(header: &'a Mapping, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| get(header, key).filter(|v| is_truthy(v)))
}

/// Render a scalar header value as text
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => display(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(s) => !s.is_empty(),
        Value::Mapping(m) => !m.is_empty(),
        Value::Tagged(_) => true,
    }
}
