use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::AppConfig;
use crate::models::locale::LocaleStore;

/// Built-in page layout, used whenever the templates directory has no
/// `portfolio.html` override. Placeholders are filled by `render_page`;
/// `{{t:...}}` keys are resolved from the active dictionary.
const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}"{{theme_attr}}>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{site_title}}</title>
<link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
<header class="site-header">
<div>
<h1>{{site_title}}</h1>
<p class="caption">{{site_caption}}</p>
</div>
<nav class="site-nav">
{{lang_switcher}}
{{theme_toggle}}
</nav>
</header>
<main>
<h2>{{t:projects.heading}}</h2>
{{filter_bar}}
{{project_grid}}
</main>
<footer class="site-footer">
<p>&copy; {{year}} {{site_title}} &middot; {{t:footer.rights}}</p>
</footer>
</body>
</html>
"#;

/// Render the full portfolio page by filling the layout's placeholders
/// from the context. A custom layout file overrides the built-in one;
/// placeholders the custom layout doesn't know are stripped afterwards,
/// so an incomplete template degrades to missing sections rather than
/// leaking tags.
pub fn render_page(cfg: &AppConfig, locale: &LocaleStore, context: &Value) -> String {
    let layout = load_template(&cfg.templates_dir, "portfolio.html")
        .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());

    let settings = context.get("settings").cloned().unwrap_or_default();
    let sg = |key: &str, def: &str| -> String {
        settings
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(def)
            .to_string()
    };

    let site_name = sg("site_name", "Vitrine");
    let site_caption = sg("site_caption", "");
    let theme = context.get("theme").and_then(|v| v.as_str()).unwrap_or("");
    let theme_attr = match theme {
        "light" | "dark" => format!(" data-theme=\"{}\"", theme),
        _ => String::new(),
    };

    // A card.html override replaces the built-in card markup per card.
    let mut grid_context = context.clone();
    if let Some(card) = load_template(&cfg.templates_dir, "card.html") {
        if let Value::Object(map) = &mut grid_context {
            map.insert("card_template".to_string(), Value::String(card));
        }
    }

    let mut html = layout;
    html = html.replace("{{lang}}", &html_escape(&locale.lang));
    html = html.replace("{{theme_attr}}", &theme_attr);
    html = html.replace("{{site_title}}", &html_escape(&site_name));
    html = html.replace("{{site_caption}}", &html_escape(&site_caption));
    html = html.replace("{{theme_toggle}}", &build_theme_toggle(context));
    html = html.replace("{{lang_switcher}}", &build_lang_switcher(context));
    html = html.replace("{{filter_bar}}", &render_filter_bar(context));
    html = html.replace("{{project_grid}}", &render_project_grid(&grid_context));
    html = html.replace("{{year}}", &chrono::Utc::now().format("%Y").to_string());

    let html = locale.apply(&html);
    strip_unreplaced_placeholders(&html)
}

/// Read a template override from the templates directory. Missing or
/// blank files mean "use the built-in markup".
fn load_template(dir: &str, name: &str) -> Option<String> {
    let path = Path::new(dir).join(name);
    let body = fs::read_to_string(path).ok()?;
    if body.trim().is_empty() {
        return None;
    }
    Some(body)
}

/// Render the card grid. The whole container is rebuilt on every call,
/// so a later render fully replaces an earlier one. An empty project
/// list yields the localized empty-state line and zero cards.
pub fn render_project_grid(context: &Value) -> String {
    let projects = match context.get("projects") {
        Some(Value::Array(projects)) => projects,
        _ => return String::new(),
    };

    if projects.is_empty() {
        return r#"<p class="cards-empty">{{t:projects.empty}}</p>"#.to_string();
    }

    let settings = context.get("settings").cloned().unwrap_or_default();
    let date_format = settings
        .get("date_format")
        .and_then(|v| v.as_str())
        .unwrap_or("%B %d, %Y")
        .to_string();
    let card_template = context
        .get("card_template")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let mut html = String::from(r#"<div class="cards">"#);
    for project in projects {
        html.push_str(&render_card(project, card_template.as_deref(), &date_format));
    }
    html.push_str("</div>");
    html
}

/// Render one project card. With a custom card template the slot
/// placeholders are replaced; otherwise the built-in markup is used.
fn render_card(project: &Value, template: Option<&str>, date_format: &str) -> String {
    let title = project.get("title").and_then(|v| v.as_str()).unwrap_or("");
    let description = project
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let image = project.get("image").and_then(|v| v.as_str()).unwrap_or("");
    let date = project.get("date").and_then(|v| v.as_str()).unwrap_or("");

    let image_html = if image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{src}" alt="{alt} cover" loading="lazy" decoding="async">"#,
            src = html_escape(image),
            alt = html_escape(title),
        )
    };

    let date_html = if date.is_empty() {
        String::new()
    } else {
        format!(
            r#"<time datetime="{raw}">{text}</time>"#,
            raw = html_escape(date),
            text = html_escape(&format_date(date, date_format)),
        )
    };

    // Tag chips, insertion order
    let mut chips = String::new();
    if let Some(Value::Array(tags)) = project.get("tags") {
        for tag in tags {
            if let Some(tag) = tag.as_str() {
                chips.push_str(&format!(
                    r#"<span class="chip">{}</span>"#,
                    html_escape(tag)
                ));
            }
        }
    }

    // Action links, map order = display order, opened in a new context
    let mut actions = String::new();
    if let Some(Value::Object(links)) = project.get("links") {
        for (label, url) in links {
            if let Some(url) = url.as_str() {
                actions.push_str(&format!(
                    r#"<a href="{href}" target="_blank" rel="noopener">{label}</a>"#,
                    href = html_escape(url),
                    label = html_escape(label),
                ));
            }
        }
    }

    if let Some(template) = template {
        let mut card = template.to_string();
        card = card.replace("{{image}}", &image_html);
        card = card.replace("{{title}}", &html_escape(title));
        card = card.replace("{{description}}", &html_escape(description));
        card = card.replace("{{date}}", &date_html);
        card = card.replace("{{chips}}", &chips);
        card = card.replace("{{actions}}", &actions);
        return card;
    }

    format!(
        r#"<article class="card">
    {image}
    <div class="card-body">
        <h3>{title}</h3>
        <p class="desc">{description}</p>
        {date}
        <div class="chips">{chips}</div>
        <div class="actions">{actions}</div>
    </div>
</article>
"#,
        image = image_html,
        title = html_escape(title),
        description = html_escape(description),
        date = date_html,
        chips = chips,
        actions = actions,
    )
}

/// Build the tag filter bar: the "show everything" control first, then
/// one control per derived tag in first-seen order. Exactly one control
/// carries the active class; an empty active slug selects the first.
pub fn render_filter_bar(context: &Value) -> String {
    let tags = match context.get("tags") {
        Some(Value::Array(tags)) => tags,
        _ => return String::new(),
    };

    let active = context
        .get("active_tag")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let mut html = String::from(r#"<nav class="filters">"#);
    html.push_str(&format!(
        r#"<a href="/"{}>{{{{t:filters.all}}}}</a>"#,
        if active.is_empty() { " class=\"active\"" } else { "" },
    ));

    for tag in tags {
        let tag = match tag.as_str() {
            Some(t) => t,
            None => continue,
        };
        let tag_slug = slug::slugify(tag);
        html.push_str(&format!(
            r#"<a href="/?tag={slug}"{class}>{label}</a>"#,
            slug = tag_slug,
            class = if tag_slug == active { " class=\"active\"" } else { "" },
            label = html_escape(tag),
        ));
    }

    html.push_str("</nav>");
    html
}

/// Theme toggle control: links to the opposite of the current theme and
/// mirrors it with the sun/moon glyph. Without a saved preference the
/// stylesheet's color-scheme media query decides, and the toggle
/// behaves as if dark were active.
fn build_theme_toggle(context: &Value) -> String {
    let theme = context.get("theme").and_then(|v| v.as_str()).unwrap_or("");
    let (next, icon) = if theme == "light" {
        ("dark", "\u{2600}\u{fe0f}")
    } else {
        ("light", "\u{1f319}")
    };
    format!(
        r#"<a class="theme-toggle" href="/theme/{next}" rel="nofollow" aria-label="{{{{t:theme.toggle}}}}">{icon}</a>"#,
        next = next,
        icon = icon,
    )
}

/// Language switcher: one control per supported language, the current
/// one marked active.
fn build_lang_switcher(context: &Value) -> String {
    let languages = match context.get("languages") {
        Some(Value::Array(languages)) => languages,
        _ => return String::new(),
    };
    let current = context.get("lang").and_then(|v| v.as_str()).unwrap_or("");

    let mut html = String::from(r#"<nav class="lang-switcher">"#);
    for code in languages {
        let code = match code.as_str() {
            Some(c) => c,
            None => continue,
        };
        html.push_str(&format!(
            r#"<a href="/lang/{code}" rel="nofollow"{class}>{label}</a>"#,
            code = code,
            class = if code == current { " class=\"active\"" } else { "" },
            label = html_escape(&code.to_uppercase()),
        ));
    }
    html.push_str("</nav>");
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format an ISO date for display. Unparseable input falls back to the
/// raw string.
pub fn format_date(raw: &str, fmt: &str) -> String {
    match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(fmt).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Remove any remaining {{placeholder}} tags from rendered HTML, so a
/// custom layout that omits a section degrades cleanly. Uses a simple
/// scan instead of regex to avoid adding a dependency.
pub fn strip_unreplaced_placeholders(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut remaining = input;

    while let Some(start) = remaining.find("{{") {
        let after = &remaining[start + 2..];
        if let Some(end) = after.find("}}") {
            let tag = &after[..end];
            // Only strip if it looks like a valid placeholder
            if !tag.is_empty()
                && tag
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b == b'_' || b == b':' || b == b'.')
            {
                result.push_str(&remaining[..start]);
                remaining = &after[end + 2..];
                continue;
            }
        }
        result.push_str(&remaining[..start + 2]);
        remaining = &remaining[start + 2..];
    }
    result.push_str(remaining);
    result
}
