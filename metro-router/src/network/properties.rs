//! Synonym-keyed property lookup.
//!
//! Sources disagree on what to call things: a station name might live under
//! `name`, `Station_Name` or `TITLE`. Keys are matched case-insensitively and
//! each field has an ordered list of synonyms; the first one holding a usable
//! value wins.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::error::NetworkError;
use crate::domain::DEFAULT_LINE;

/// Keys tried, in order, for the station name.
pub const NAME_KEYS: &[&str] = &["name", "station_name", "stop_name", "title"];

/// Keys tried, in order, for line membership.
pub const LINE_KEYS: &[&str] = &["line", "lines", "route", "color"];

/// A property resolved through a synonym list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Line,
}

impl Field {
    /// The synonym keys for this field, in priority order.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Field::Name => NAME_KEYS,
            Field::Line => LINE_KEYS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("station name"),
            Field::Line => f.write_str("line"),
        }
    }
}

/// A feature's property bag with lowercased keys.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, Value>,
}

impl Properties {
    /// Lowercase the keys of a raw property map.
    ///
    /// If two keys differ only in case, the one later in the document wins.
    pub fn from_map(raw: &Map<String, Value>) -> Self {
        let values = raw
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.clone()))
            .collect();
        Self { values }
    }

    /// The first synonym of `field` holding a non-empty value.
    ///
    /// `null`, `false`, `0`, `""`, `[]` and `{}` count as empty.
    pub fn lookup(&self, field: Field) -> Option<&Value> {
        field
            .keys()
            .iter()
            .filter_map(|key| self.values.get(*key))
            .find(|v| is_present(v))
    }

    /// Resolve `field` to text, failing with the list of keys tried.
    ///
    /// Strings are returned as-is; numbers and booleans are rendered.
    pub fn require_str(&self, field: Field) -> Result<String, NetworkError> {
        self.lookup(field)
            .and_then(scalar_text)
            .ok_or(NetworkError::MissingField {
                field,
                tried: field.keys(),
            })
    }

    /// Line labels for this feature.
    ///
    /// A string is split on `,` and `;`; a list has each element rendered.
    /// Falls back to [`DEFAULT_LINE`] when nothing usable is found.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut push = |label: String| {
            if !label.is_empty() && !lines.contains(&label) {
                lines.push(label);
            }
        };

        match self.lookup(Field::Line) {
            Some(Value::String(s)) => {
                for part in s.split([',', ';']) {
                    push(part.trim().to_string());
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    push(element_text(item));
                }
            }
            _ => {}
        }

        if lines.is_empty() {
            lines.push(DEFAULT_LINE.to_string());
        }
        lines
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
