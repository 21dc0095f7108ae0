use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::AppConfig;
use crate::loader;
use crate::models::project::ProjectDocument;

/// Static asset directories that will be created if missing
const STATIC_DIRS: &[&str] = &["site/static", "site/static/css"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, validates the data and locale files,
/// and aborts if the site layout cannot be set up.
pub fn run(cfg: &AppConfig) {
    info!("Vitrine boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let mut dirs: Vec<&str> = STATIC_DIRS.to_vec();
    dirs.push(&cfg.locales_dir);
    dirs.push(&cfg.templates_dir);
    let data_is_local =
        !cfg.data_source.starts_with("http://") && !cfg.data_source.starts_with("https://");
    if data_is_local {
        dirs.push(&cfg.data_source);
    }

    for dir in &dirs {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Project data candidates ─────────────────────
    if data_is_local {
        let mut names: Vec<String> = Vec::new();
        for lang in &cfg.languages {
            for name in loader::candidate_names(lang) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        let mut found = 0u32;
        for name in &names {
            let path = Path::new(&cfg.data_source).join(name);
            if !path.exists() {
                continue;
            }
            found += 1;
            let parses = fs::read_to_string(&path)
                .ok()
                .and_then(|body| serde_json::from_str::<ProjectDocument>(&body).ok());
            if parses.is_none() {
                warn!("  Data file does not parse: {} (candidate will be skipped)", name);
                warnings += 1;
            }
        }

        if found == 0 {
            warn!(
                "  No project data files in {} (portfolio will render empty)",
                cfg.data_source
            );
            warnings += 1;
        }
    } else {
        info!("  Remote data source: {}", cfg.data_source);
    }

    // ── 3. Locale dictionaries ─────────────────────────
    for lang in &cfg.languages {
        let path = Path::new(&cfg.locales_dir).join(format!("{}.json", lang));
        if !path.exists() {
            warn!(
                "  Missing dictionary: {} (UI text for '{}' will fall back to keys)",
                path.display(),
                lang
            );
            warnings += 1;
            continue;
        }
        let parses = fs::read_to_string(&path)
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok());
        if parses.is_none() {
            warn!("  Dictionary does not parse: {}", path.display());
            warnings += 1;
        }
    }

    // ── 4. Static stylesheet ───────────────────────────
    if !Path::new("site/static/css/style.css").exists() {
        warn!("  Missing static asset: site/static/css/style.css (pages will be unstyled)");
        warnings += 1;
    }

    // ── 5. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default server config");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some pages may render incomplete.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
