//! Template engine for component markup.

use minijinja::{Environment, Value};
use serde::Serialize;

/// Template engine using minijinja.
///
/// Templates are registered with an `.html` suffix, so values are
/// HTML-escaped unless marked `| safe`.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in component templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.add_filter("attr", attr_filter);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a template with the given context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(ctx)
    }

    /// Names of all registered templates.
    pub fn names(&self) -> Vec<&str> {
        self.env.templates().map(|(name, _)| name).collect()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape HTML special characters including single quotes.
///
/// Unlike minijinja's own escaping this leaves `/` alone, which keeps URLs
/// in attributes readable.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn attr_filter(value: String) -> Value {
    Value::from_safe_string(html_escape(&value))
}

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", LAYOUT_TEMPLATE),
    ("nav.html", NAV_TEMPLATE),
    ("index.html", INDEX_TEMPLATE),
    ("gallery.html", GALLERY_TEMPLATE),
    ("create.html", CREATE_TEMPLATE),
    ("error_summary.html", ERROR_SUMMARY_TEMPLATE),
];

const LAYOUT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <base href="{{ base_href | attr }}">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="canonical" href="{{ canonical | attr }}">
  <link rel="stylesheet" href="{{ stylesheet | attr }}">
</head>
<body>
  <div class="layout">
    <header class="header">
      {{ nav | safe }}
    </header>
    <main class="main">
      {{ body | safe }}
    </main>
  </div>
</body>
</html>
"##;

const NAV_TEMPLATE: &str = r##"<nav class="nav">
  <a href="{{ home | attr }}" class="nav-logo">{{ site_title }}</a>
  <ul class="nav-list">
  {% for item in items %}
    <li class="nav-item{% if item.active %} active{% endif %}">
      <a href="{{ item.href | attr }}"{% if item.active %} aria-current="page"{% endif %}>{{ item.title }}</a>
    </li>
  {% endfor %}
  </ul>
</nav>"##;

const INDEX_TEMPLATE: &str = r##"<section class="index">
  <h1>{{ title }}</h1>
  {{ gallery | safe }}
</section>"##;

const GALLERY_TEMPLATE: &str = r##"{% if lazy %}<div class="gallery-placeholder" data-lazy-load="true" data-columns="{{ columns }}" aria-busy="true">
  <p>Loading gallery...</p>
</div>{% else %}<div class="gallery-grid grid-cols-{{ columns }}" data-columns="{{ columns }}">
  {% for tile in tiles %}
  <a class="gallery-tile" href="{{ tile.href | attr }}">
    <span class="gallery-tile-title">{{ tile.title }}</span>
  </a>
  {% endfor %}
</div>{% endif %}"##;

const CREATE_TEMPLATE: &str = r##"<section class="create">
  <h1>Create</h1>
  {{ error_summary | safe }}
  <form method="post" action="{{ action | attr }}" class="create-form">
    <label for="prompt">Prompt</label>
    <textarea id="prompt" name="prompt" rows="3" required>{{ prompt }}</textarea>
    <fieldset class="sizes">
      <legend>Size</legend>
      {% for size in sizes %}
      <label class="size-option">
        <input type="radio" name="size" value="{{ size.value }}"{% if size.selected %} checked{% endif %}>
        {{ size.value }}
      </label>
      {% endfor %}
    </fieldset>
    <button type="submit">Generate</button>
  </form>
</section>"##;

const ERROR_SUMMARY_TEMPLATE: &str = r##"<div class="error-summary{% if class %} {{ class }}{% endif %}" role="alert">
  <p class="error-summary-message">{{ message }}</p>
</div>"##;
