//! The project record.
//!
//! A [`Project`] is a transient, request-scoped value: it is built from one
//! entry of a `GetAll` response and lives as long as whoever displays it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a project as the middleware hands it out.
///
/// The middleware is free to use numbers or text; both are kept verbatim.
/// Numbers that do not fit an `i64` (floats, integers above `i64::MAX`)
/// are kept as the raw JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    /// A numeric identifier (`"id": 1`).
    Int(i64),
    /// Any other JSON number (`"id": 1.0`, `"id": 18446744073709551615`).
    Number(serde_json::Number),
    /// A textual identifier (`"id": "p-1"`).
    Text(String),
}

/// Largest magnitude at which every whole `f64` is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

impl core::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            // Whole floats render without a fraction, as `1` rather than `1.0`.
            Self::Number(id) => match id.as_f64() {
                Some(value)
                    if !id.is_u64() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT =>
                {
                    write!(f, "{value:.0}")
                }
                _ => write!(f, "{id}"),
            },
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProjectId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

/// One listed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Project {
    /// Identifier, used as the `id` parameter when deleting.
    #[ts(type = "number | string")]
    pub id: ProjectId,
    /// Display title.
    pub title: String,
    /// Free-form note.
    pub note: String,
    /// When the project starts.
    #[serde(rename = "pStartTime")]
    pub start_time: DateTime<Utc>,
}

impl Project {
    /// Build a project record from its parts.
    pub fn new(
        id: impl Into<ProjectId>,
        title: impl Into<String>,
        note: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            note: note.into(),
            start_time,
        }
    }
}
