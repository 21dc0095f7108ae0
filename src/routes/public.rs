use log::{debug, error, warn};
use rocket::http::{Cookie, CookieJar};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::json;

use crate::catalog;
use crate::config::AppConfig;
use crate::loader;
use crate::models::locale::{self, LocaleStore};
use crate::models::project::Project;
use crate::render;

pub const LANG_COOKIE: &str = "lang";
pub const THEME_COOKIE: &str = "theme";

// ── Request guards ─────────────────────────────────────

/// Raw Accept-Language header, used for first-visit language
/// negotiation when no preference cookie is set.
pub struct AcceptLanguage(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AcceptLanguage {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = request
            .headers()
            .get_one("Accept-Language")
            .map(|h| h.to_string());
        Outcome::Success(AcceptLanguage(header))
    }
}

/// Referer header, so the toggle routes can send the visitor back to
/// the page they came from.
pub struct Referer(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Referer {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = request.headers().get_one("Referer").map(|h| h.to_string());
        Outcome::Success(Referer(header))
    }
}

fn back_url(referer: &Referer) -> String {
    referer.0.clone().unwrap_or_else(|| "/".to_string())
}

// ── Portfolio page ─────────────────────────────────────

#[get("/?<tag>")]
pub fn portfolio(
    cfg: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    accept: AcceptLanguage,
    tag: Option<&str>,
) -> RawHtml<String> {
    let saved = cookies.get(LANG_COOKIE).map(|c| c.value().to_string());
    let lang = locale::detect(
        saved.as_deref(),
        accept.0.as_deref(),
        &cfg.languages,
        &cfg.default_lang,
    );
    let theme = cookies
        .get(THEME_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    RawHtml(build_page(cfg, &lang, &theme, tag))
}

/// One orchestration run: dictionary, projects, sort, filter, render.
/// A dictionary failure is logged and the page renders with raw keys;
/// a project-data failure renders an empty grid. Neither aborts the
/// request.
fn build_page(cfg: &AppConfig, lang: &str, theme: &str, tag_param: Option<&str>) -> String {
    let locale_store = match LocaleStore::load(&cfg.locales_path(), lang) {
        Ok(store) => store,
        Err(e) => {
            error!("dictionary load failed: {}", e);
            LocaleStore::empty(lang)
        }
    };

    let mut projects = loader::load_projects(&cfg.data_source, lang);
    if cfg.sort_by_date {
        catalog::sort_by_date_desc(&mut projects);
    }

    let tags = catalog::derive_tags(&projects);

    // Resolve the ?tag= slug back to its label. An unknown slug falls
    // back to the unfiltered view so the bar and the grid stay in step.
    let active = tag_param.and_then(|slug| {
        let found = tags.iter().find(|t| slug::slugify(t) == slug).cloned();
        if found.is_none() {
            debug!("unknown tag filter '{}', showing everything", slug);
        }
        found
    });

    let all_label = locale_store.lookup("filters.all").to_string();
    let filter_label = active.clone().unwrap_or_else(|| all_label.clone());
    let shown = catalog::filter_by_tag(&projects, &filter_label, &all_label);

    let context = json!({
        "settings": cfg.settings(),
        "projects": shown,
        "tags": tags,
        "active_tag": active.as_deref().map(slug::slugify).unwrap_or_default(),
        "languages": cfg.languages.clone(),
        "lang": lang,
        "theme": theme,
    });

    render::render_page(cfg, &locale_store, &context)
}

// ── Language switch ────────────────────────────────────

/// Switch the UI language. The new dictionary must load before the
/// preference cookie is written: a failed switch leaves the previous
/// language fully in place.
#[get("/lang/<code>")]
pub fn switch_language(
    cfg: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    referer: Referer,
    code: &str,
) -> Redirect {
    if !cfg.languages.iter().any(|c| c == code) {
        warn!("unsupported language '{}'", code);
        return Redirect::to(back_url(&referer));
    }

    match LocaleStore::load(&cfg.locales_path(), code) {
        Ok(_) => {
            let mut cookie = Cookie::new(LANG_COOKIE, code.to_string());
            cookie.set_path("/");
            cookies.add(cookie);
        }
        Err(e) => error!("language switch to '{}' failed: {}", code, e),
    }

    Redirect::to(back_url(&referer))
}

// ── Theme toggle ───────────────────────────────────────

#[get("/theme/<mode>")]
pub fn switch_theme(cookies: &CookieJar<'_>, referer: Referer, mode: &str) -> Redirect {
    if mode == "light" || mode == "dark" {
        let mut cookie = Cookie::new(THEME_COOKIE, mode.to_string());
        cookie.set_path("/");
        cookies.add(cookie);
    }
    Redirect::to(back_url(&referer))
}

// ── Project data API ───────────────────────────────────

/// The loaded (and, when enabled, sorted) project list as JSON.
#[get("/api/projects?<lang>")]
pub fn projects_api(
    cfg: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    accept: AcceptLanguage,
    lang: Option<&str>,
) -> Json<Vec<Project>> {
    let lang = match lang {
        Some(code) => code.to_string(),
        None => {
            let saved = cookies.get(LANG_COOKIE).map(|c| c.value().to_string());
            locale::detect(
                saved.as_deref(),
                accept.0.as_deref(),
                &cfg.languages,
                &cfg.default_lang,
            )
        }
    };

    let mut projects = loader::load_projects(&cfg.data_source, &lang);
    if cfg.sort_by_date {
        catalog::sort_by_date_desc(&mut projects);
    }
    Json(projects)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![portfolio, switch_language, switch_theme, projects_api]
}
