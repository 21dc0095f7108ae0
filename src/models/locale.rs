use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::loader::{self, LoadError, Location};
use crate::render::html_escape;

/// The UI dictionary for one language. Replaced wholesale on every
/// language switch; there is no cross-language merging.
pub struct LocaleStore {
    pub lang: String,
    strings: HashMap<String, String>,
}

impl LocaleStore {
    /// Load the dictionary for `lang` from `<dir>/<lang>.json`, a flat
    /// key → string JSON object. Non-string values are ignored.
    pub fn load(dir: &Path, lang: &str) -> Result<Self, LoadError> {
        let location = Location::File(dir.join(format!("{}.json", lang)));
        let value = loader::fetch_json(&location)?;

        let mut strings = HashMap::new();
        if let Value::Object(map) = value {
            for (key, val) in map {
                if let Value::String(s) = val {
                    strings.insert(key, s);
                }
            }
        }
        debug!("loaded {} strings for language '{}'", strings.len(), lang);

        Ok(LocaleStore {
            lang: lang.to_string(),
            strings,
        })
    }

    /// A store with no translations: every lookup falls back to the key.
    pub fn empty(lang: &str) -> Self {
        LocaleStore {
            lang: lang.to_string(),
            strings: HashMap::new(),
        }
    }

    /// The localized string for `key`, or the key itself when absent.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(|s| s.as_str()).unwrap_or(key)
    }

    /// Replace every `{{t:key}}` placeholder in `html` with the
    /// HTML-escaped localized value. With an empty dictionary the keys
    /// themselves render; malformed placeholders pass through untouched.
    pub fn apply(&self, html: &str) -> String {
        let mut result = String::with_capacity(html.len());
        let mut remaining = html;

        while let Some(start) = remaining.find("{{t:") {
            result.push_str(&remaining[..start]);
            let after = &remaining[start + 4..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    result.push_str(&html_escape(self.lookup(key)));
                    remaining = &after[end + 2..];
                }
                None => {
                    result.push_str(&remaining[start..]);
                    return result;
                }
            }
        }
        result.push_str(remaining);
        result
    }
}

/// Pick the language for a request. Precedence: persisted choice when
/// supported, Accept-Language prefix match (`fr-CA` → `fr`), configured
/// default. Pure function of its inputs.
pub fn detect(
    saved: Option<&str>,
    accept_language: Option<&str>,
    supported: &[String],
    default_lang: &str,
) -> String {
    if let Some(saved) = saved {
        if supported.iter().any(|code| code == saved) {
            return saved.to_string();
        }
    }

    if let Some(header) = accept_language {
        for entry in header.split(',') {
            let tag = entry.split(';').next().unwrap_or("").trim();
            if tag.is_empty() {
                continue;
            }
            for code in supported {
                if tag.eq_ignore_ascii_case(code)
                    || tag
                        .to_ascii_lowercase()
                        .starts_with(&format!("{}-", code.to_ascii_lowercase()))
                {
                    return code.clone();
                }
            }
        }
    }

    default_lang.to_string()
}
