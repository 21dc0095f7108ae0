use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One portfolio entry as authored in the project data files.
/// Every field is optional in the JSON; absence deserializes to an
/// empty/neutral default so a sparse record never fails to load.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Label → URL. Map order is the display order (serde_json is built
    /// with preserve_order, so insertion order survives the round trip).
    #[serde(default)]
    pub links: Map<String, Value>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Top-level shape of a project data file: `{ "projects": [ ... ] }`.
/// A document without the key is an empty portfolio, not an error.
#[derive(Debug, Deserialize, Default)]
pub struct ProjectDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Project {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Parse the `date` field as an ISO-8601 calendar date.
    /// Unparseable or absent dates yield `None`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}

