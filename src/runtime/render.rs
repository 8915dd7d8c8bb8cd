use super::error::RouterError;
use crate::route::Route;
use minijinja::{AutoEscape, Environment};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Partial used for api routes.
pub const API_PARTIAL: &str = "docsite-api";
/// Partial used for content routes.
pub const CONTENT_PARTIAL: &str = "docsite-content";
/// Partial used when nothing matched.
pub const NOT_FOUND_PARTIAL: &str = "docsite-404";

const DEFAULT_API: &str = r#"<article class="docsite-api" data-route="{{ route.id }}">
<h1>{% if route.name == "_def_" %}{{ title }}{% else %}{{ route.name }}{% endif %}</h1>
{% for symbol in documentation %}<section class="docsite-symbol" id="{{ symbol.name }}">
<h2>{{ symbol.name }}</h2>
{% if symbol.kind %}<span class="docsite-kind">{{ symbol.kind }}</span>
{% endif %}{% if symbol.description %}<p>{{ symbol.description }}</p>
{% endif %}</section>
{% endfor %}</article>"#;

const DEFAULT_CONTENT: &str = r#"<article class="docsite-content" data-route="{{ route.id }}">
{{ content|safe }}
</article>"#;

const DEFAULT_NOT_FOUND: &str = r#"<article class="docsite-404">
<h1>Page not found</h1>
{% if requested %}<p>Nothing in {{ title }} matches <code>{{ requested }}</code>.</p>
{% endif %}</article>"#;

/// What the renderer is asked to show.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Api { route: &'a Route, docs: Option<&'a Value> },
    Content { route: &'a Route, html: &'a str },
    NotFound { requested: Option<&'a str> },
}

impl View<'_> {
    #[must_use]
    pub fn partial(&self) -> &'static str {
        match self {
            View::Api { .. } => API_PARTIAL,
            View::Content { .. } => CONTENT_PARTIAL,
            View::NotFound { .. } => NOT_FOUND_PARTIAL,
        }
    }
}

/// Renders a named partial against a JSON context.
pub trait PartialRenderer {
    fn render_partial(&self, name: &str, context: &Value) -> anyhow::Result<String>;
}

/// The application container views are written into.
pub trait Container {
    fn set_html(&mut self, html: &str);
}

/// In-memory container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlBuffer {
    html: String,
    writes: usize,
}

impl HtmlBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of times the container was replaced.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Container for HtmlBuffer {
    fn set_html(&mut self, html: &str) {
        self.html.clear();
        self.html.push_str(html);
        self.writes += 1;
    }
}

/// Partials rendered with MiniJinja, HTML auto-escaping on.
///
/// Starts with built-in `docsite-api`, `docsite-content` and `docsite-404`
/// partials; any of them can be replaced with [`Self::set_partial`].
#[derive(Debug, Clone)]
pub struct MiniJinjaPartials {
    templates: HashMap<String, String>,
}

impl Default for MiniJinjaPartials {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(API_PARTIAL.to_string(), DEFAULT_API.to_string());
        templates.insert(CONTENT_PARTIAL.to_string(), DEFAULT_CONTENT.to_string());
        templates.insert(NOT_FOUND_PARTIAL.to_string(), DEFAULT_NOT_FOUND.to_string());
        Self { templates }
    }
}

impl MiniJinjaPartials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_partial(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }
}

impl PartialRenderer for MiniJinjaPartials {
    fn render_partial(&self, name: &str, context: &Value) -> anyhow::Result<String> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("unknown partial '{name}'"))?;
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template(name, source)?;
        let tmpl = env.get_template(name)?;
        Ok(tmpl.render(context)?)
    }
}

/// Writes views into a container through a partial renderer.
#[derive(Debug)]
pub struct Renderer<P, C> {
    partials: P,
    container: C,
    title: String,
}

impl<P: PartialRenderer, C: Container> Renderer<P, C> {
    pub fn new(partials: P, container: C, title: impl Into<String>) -> Self {
        Self {
            partials,
            container,
            title: title.into(),
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn partials_mut(&mut self) -> &mut P {
        &mut self.partials
    }

    /// Render `view` and replace the container's contents with the result.
    /// The container is left untouched when rendering fails.
    pub fn render(&mut self, view: View<'_>) -> Result<(), RouterError> {
        let context = match view {
            View::Api { route, docs } => json!({
                "title": self.title,
                "route": route,
                "documentation": docs.cloned().unwrap_or_else(|| json!([])),
            }),
            View::Content { route, html } => json!({
                "title": self.title,
                "route": route,
                "content": html,
            }),
            View::NotFound { requested } => json!({
                "title": self.title,
                "requested": requested,
            }),
        };
        let partial = view.partial();
        let html = self
            .partials
            .render_partial(partial, &context)
            .map_err(|e| RouterError::Render {
                partial: partial.to_string(),
                message: format!("{e:#}"),
            })?;
        self.container.set_html(&html);
        Ok(())
    }
}
