//! Classification of `GetAll` response bodies and the entry walk.
//!
//! The middleware answers `GetAll` with a collection keyed by arbitrary
//! strings, each value an object carrying `id`, `title`, `note` and
//! `pStartTime`. A body is first classified into a [`ListingPayload`]; only
//! a [`ListingPayload::WellFormed`] payload can be turned into records.
//!
//! Entries are walked in own-property order: keys that look like array
//! indices come first in ascending numeric order, every other key follows
//! in the order the body delivered it. Arrays are treated as objects keyed
//! by their indices.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::TypesError;
use crate::project::{Project, ProjectId};

/// A `GetAll` response body, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingPayload {
    /// A keyed collection, entries already in walk order.
    WellFormed(Vec<(String, Value)>),
    /// The body was not JSON or not a keyed collection.
    ParseFailure(String),
}

impl ListingPayload {
    /// Classify a raw response body.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => Self::ParseFailure(format!("body is not JSON: {e}")),
        }
    }

    /// Classify an already decoded JSON body.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::WellFormed(own_property_order(map.into_iter().collect())),
            Value::Array(items) => Self::WellFormed(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            ),
            other => Self::ParseFailure(format!(
                "expected a keyed collection, got {}",
                json_kind(&other)
            )),
        }
    }

    /// Number of entries; zero for a parse failure.
    pub fn len(&self) -> usize {
        match self {
            Self::WellFormed(entries) => entries.len(),
            Self::ParseFailure(_) => 0,
        }
    }

    /// Whether there is nothing to turn into records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Turn every entry into a [`Project`], one record per entry.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::ParseFailure`] for a parse failure, and the
    /// first entry-level error otherwise. No partial collection is returned.
    pub fn into_projects(self) -> Result<Vec<Project>, TypesError> {
        match self {
            Self::WellFormed(entries) => entries
                .iter()
                .map(|(key, entry)| project_from_entry(key, entry))
                .collect(),
            Self::ParseFailure(reason) => Err(TypesError::ParseFailure(reason)),
        }
    }
}

/// Parse a `pStartTime` value into a UTC point in time.
///
/// Accepts an RFC 3339 string, an ISO 8601 date-time without offset (read
/// as UTC), a bare `YYYY-MM-DD` date (midnight UTC), or an integer number
/// of milliseconds since the Unix epoch. Returns `None` for anything else.
pub fn parse_start_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp_text(text.trim()),
        Value::Number(millis) => millis.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Build one record from one collection entry.
fn project_from_entry(key: &str, entry: &Value) -> Result<Project, TypesError> {
    let object = entry.as_object().ok_or_else(|| TypesError::InvalidEntry {
        key: key.to_owned(),
        reason: format!("expected an object, got {}", json_kind(entry)),
    })?;

    let id_value = object.get("id").ok_or_else(|| TypesError::InvalidEntry {
        key: key.to_owned(),
        reason: "missing id".to_owned(),
    })?;
    let id: ProjectId =
        serde_json::from_value(id_value.clone()).map_err(|e| TypesError::InvalidEntry {
            key: key.to_owned(),
            reason: format!("invalid id: {e}"),
        })?;

    let raw_start = object.get("pStartTime").unwrap_or(&Value::Null);
    let start_time = parse_start_time(raw_start).ok_or_else(|| TypesError::InvalidTimestamp {
        key: key.to_owned(),
        value: raw_start.to_string(),
    })?;

    Ok(Project::new(
        id,
        text_field(object.get("title")),
        text_field(object.get("note")),
        start_time,
    ))
}

/// Copy a text field verbatim. Absent or null becomes empty text, any
/// other JSON value keeps its JSON rendering.
fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Reorder object entries into own-property order.
fn own_property_order(entries: Vec<(String, Value)>) -> Vec<(String, Value)> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());
    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.extend(named);
    indexed
}

/// Canonical array-index keys: `0`, `1`, ... with no sign or leading zero.
fn array_index(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
