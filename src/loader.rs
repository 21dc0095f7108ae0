use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;
use url::Url;

use crate::models::project::{Project, ProjectDocument};

/// Where a data resource lives: a file under the local data directory,
/// or a URL under a remote base.
#[derive(Debug, Clone)]
pub enum Location {
    File(PathBuf),
    Remote(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Network failure, non-success status, or unreadable file.
    #[error("resource unavailable: {location}: {reason}")]
    Unavailable { location: String, reason: String },
    /// Body fetched but not valid JSON, or not the expected shape.
    #[error("parse failure: {location}: {reason}")]
    Parse { location: String, reason: String },
}

impl LoadError {
    fn unavailable(location: &Location, reason: impl fmt::Display) -> Self {
        LoadError::Unavailable {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse(location: &Location, reason: impl fmt::Display) -> Self {
        LoadError::Parse {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Fetch the raw body of a resource.
pub fn fetch(location: &Location) -> Result<String, LoadError> {
    match location {
        Location::File(path) => {
            fs::read_to_string(path).map_err(|e| LoadError::unavailable(location, e))
        }
        Location::Remote(url) => {
            let resp =
                reqwest::blocking::get(url).map_err(|e| LoadError::unavailable(location, e))?;
            if !resp.status().is_success() {
                return Err(LoadError::unavailable(
                    location,
                    format!("HTTP {}", resp.status()),
                ));
            }
            resp.text().map_err(|e| LoadError::unavailable(location, e))
        }
    }
}

/// Fetch and JSON-parse a resource.
pub fn fetch_json(location: &Location) -> Result<serde_json::Value, LoadError> {
    let body = fetch(location)?;
    serde_json::from_str(&body).map_err(|e| LoadError::parse(location, e))
}

/// Ordered-fallback primitive: run `op` against each candidate in turn
/// and return the first success. Failures are logged and swallowed.
pub fn first_success<T, F>(candidates: &[Location], op: F) -> Option<T>
where
    F: Fn(&Location) -> Result<T, LoadError>,
{
    for location in candidates {
        match op(location) {
            Ok(value) => {
                debug!("loaded {}", location);
                return Some(value);
            }
            Err(e) => warn!("skipping candidate: {}", e),
        }
    }
    None
}

/// Candidate data file names for a language, most specific first:
/// language file, English file, legacy unlocalized file.
pub fn candidate_names(lang: &str) -> Vec<String> {
    let mut names = vec![format!("project-data.{}.json", lang)];
    for fallback in ["project-data.en.json", "project-data.json"] {
        if !names.iter().any(|n| n == fallback) {
            names.push(fallback.to_string());
        }
    }
    names
}

/// Resolve a file name against the configured data source. A source
/// starting with http:// or https:// is a remote base; anything else is
/// a local directory.
pub fn resolve(data_source: &str, name: &str) -> Location {
    if data_source.starts_with("http://") || data_source.starts_with("https://") {
        let base = if data_source.ends_with('/') {
            data_source.to_string()
        } else {
            format!("{}/", data_source)
        };
        match Url::parse(&base).and_then(|b| b.join(name)) {
            Ok(url) => Location::Remote(url.to_string()),
            Err(_) => Location::Remote(format!("{}{}", base, name)),
        }
    } else {
        Location::File(Path::new(data_source).join(name))
    }
}

/// Load the project list for a language through the candidate chain.
/// Returns an empty list when every candidate fails; never errors.
pub fn load_projects(data_source: &str, lang: &str) -> Vec<Project> {
    let candidates: Vec<Location> = candidate_names(lang)
        .iter()
        .map(|name| resolve(data_source, name))
        .collect();

    first_success(&candidates, parse_document)
        .map(|doc| doc.projects)
        .unwrap_or_default()
}

fn parse_document(location: &Location) -> Result<ProjectDocument, LoadError> {
    let body = fetch(location)?;
    serde_json::from_str(&body).map_err(|e| LoadError::parse(location, e))
}
