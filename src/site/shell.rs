use crate::config::RoutingConfig;
use crate::route::{Route, RouteTable, BOOTSTRAP_SCRIPT};
use crate::scaffold::{js_string, REDIRECT_STORAGE_KEY};
use askama::Template;

/// One entry of the generated navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub id: String,
    pub href: String,
    pub label: String,
}

impl NavLink {
    fn for_route(route: &Route, config: &RoutingConfig, title: &str) -> Self {
        let label = if route.is_default_api() {
            title.to_string()
        } else {
            route.name.clone()
        };
        Self {
            id: route.id.clone(),
            href: format!("{}{}", config.base, route.path),
            label,
        }
    }
}

/// Template data for the root document of the single-page application.
#[derive(Template)]
#[template(path = "index.html")]
pub struct ShellTemplateData {
    pub title: String,
    pub bootstrap_src: String,
    pub storage_key: String,
    /// Storage key as a JavaScript string literal
    pub storage_key_js: String,
    /// Base path as a JavaScript string literal
    pub base_js: String,
    /// Menu entries in table order
    pub links: Vec<NavLink>,
}

impl ShellTemplateData {
    /// Shell for `table`. A route path left in session storage by a redirect
    /// document is moved back into the address bar before the bootstrap
    /// script runs.
    pub fn new(title: &str, table: &RouteTable, config: &RoutingConfig) -> anyhow::Result<Self> {
        Ok(Self {
            title: title.to_string(),
            bootstrap_src: format!("{}{}", config.base, BOOTSTRAP_SCRIPT),
            storage_key: REDIRECT_STORAGE_KEY.to_string(),
            storage_key_js: js_string(REDIRECT_STORAGE_KEY)?,
            base_js: js_string(&config.base)?,
            links: table
                .iter()
                .map(|r| NavLink::for_route(r, config, title))
                .collect(),
        })
    }
}
