//! # Scaffold Module
//!
//! Host-specific files that make `path`-routed deep links work.
//!
//! With `query` routing every route resolves on the root document and nothing
//! is written. With `path` routing:
//!
//! - **Rewrite hosts** (`apache`, `windows`) get one rewrite-rule document
//!   (`.htaccess` / `web.config`) mapping every sub-path back to the root
//!   document.
//! - **Plain file hosts** (`github`, `static`) get one `index.html` per route,
//!   in the directory implied by the route path. Each one stores the route
//!   path in `sessionStorage` and redirects to the root document, where the
//!   runtime router restores it. Existing documents are never overwritten, so
//!   hand-written pages at a route path survive regeneration. `github` hosts
//!   also get a `404.html` doing the same for arbitrary deep links.
//!
//! Any write failure aborts: a half-written scaffold leaves some deep links
//! working and others broken.

mod templates;

pub use templates::*;

use crate::config::{RoutingConfig, RoutingMethod, ServerType};
use crate::route::{Route, RouteTable};
use crate::runtime::LocationSnapshot;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a scaffold run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Files created or replaced
    pub written: Vec<PathBuf>,
    /// Existing documents left untouched
    pub kept: Vec<PathBuf>,
}

/// Directory a route's redirect document lives in, relative to the output root.
#[must_use]
pub fn route_dir(route: &Route) -> PathBuf {
    route
        .path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .collect()
}

/// Emit navigation scaffolding for `table` under `output_root`.
pub fn write_scaffold(table: &RouteTable, config: &RoutingConfig, output_root: &Path) -> anyhow::Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();
    if config.method != RoutingMethod::Path {
        return Ok(report);
    }

    match config.server {
        ServerType::Apache => {
            write_htaccess(output_root, &config.base, &config.root_document)?;
            report.written.push(output_root.join(".htaccess"));
        }
        ServerType::Windows => {
            write_web_config(output_root, &config.base, &config.root_document)?;
            report.written.push(output_root.join("web.config"));
        }
        ServerType::Github | ServerType::Static => {
            let root_url = config.root_url();
            for route in table.iter() {
                let path = output_root.join(route_dir(route)).join("index.html");
                if write_redirect(&path, &js_string(&route.path)?, &root_url)? {
                    report.written.push(path);
                } else {
                    report.kept.push(path);
                }
            }
            if config.server == ServerType::Github {
                let path = output_root.join("404.html");
                // The browser reports a percent-encoded pathname.
                let base_path = LocationSnapshot::parse(&config.base)?.pathname;
                let stored = format!(
                    "window.location.pathname.substring({}) + window.location.search",
                    base_path.len()
                );
                if write_redirect(&path, &stored, &root_url)? {
                    report.written.push(path);
                } else {
                    report.kept.push(path);
                }
            }
        }
    }

    info!(
        server = %config.server,
        written = report.written.len(),
        kept = report.kept.len(),
        "Scaffold written"
    );
    Ok(report)
}
