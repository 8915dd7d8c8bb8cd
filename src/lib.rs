//! # docsite
//!
//! **docsite** builds static documentation sites: api groups of documented
//! symbols and narrative pages, assembled into a single-page application
//! that routes between them in the browser.
//!
//! ## Overview
//!
//! The interesting part is the route model and its two halves. At build time
//! every documented unit gets a durable identity and an address; the result
//! is a [`route::RouteTable`] embedded in the generated bootstrap script. At
//! runtime a [`runtime::Router`] resolves the current location back into that
//! identity and renders the matching view. Both halves share one
//! [`config::RoutingConfig`], so they always agree on addressing and
//! case-sensitivity.
//!
//! ## Architecture
//!
//! - **[`config`]** - Build configuration, routing options and CLI overrides
//! - **[`route`]** - Routes, the route table and the versioned site artifact
//! - **[`builder`]** - Route table construction and name validation
//! - **[`scaffold`]** - Host files that make `path` deep links work
//! - **[`site`]** - The build pipeline from configuration to output directory
//! - **[`runtime`]** - Location resolution, matching, rendering and the router
//! - **[`content`]** - Directory-backed content fragment store
//! - **[`watch`]** - Rebuild on configuration change
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `docsite-gen` command surface
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(docsite-gen)
//!     participant Config as config::load_config
//!     participant Site as site::build_site
//!     participant Builder as RouteTableBuilder
//!     participant Scaffold as scaffold::write_scaffold
//!     participant FS as File System
//!
//!     CLI->>Config: load_config("docsite.yaml", overrides)
//!     Config-->>CLI: BuildConfig
//!     CLI->>Site: build_site(&config)
//!     Site->>Builder: add_route(name, source_type) per unit
//!     Builder-->>Site: RouteTable or RouteTableError
//!     Site->>FS: content/{name}.html
//!     Site->>FS: js/docsite.bootstrap.js
//!     Site->>FS: index.html
//!     Site->>Scaffold: write_scaffold(table, routing, dest)
//!     Scaffold->>FS: .htaccess / web.config / redirect documents
//! ```
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Browser host
//!     participant Router as runtime::Router
//!     participant Resolver as resolve_candidate
//!     participant Matcher as match_candidate
//!     participant Fetcher as ContentFetcher
//!     participant Renderer as Renderer
//!
//!     Host->>Router: navigate(location)
//!     Router->>Resolver: location + RoutingConfig
//!     Resolver-->>Router: Candidate or None (entrance)
//!     Router->>Matcher: candidate + RouteTable
//!     Matcher-->>Router: Route or None (not found)
//!     Router->>Fetcher: content/{name}.html (content routes)
//!     Fetcher-->>Router: fragment
//!     Router->>Renderer: View
//!     Renderer-->>Host: container HTML, route/render/ready events
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docsite::builder::RouteTableBuilder;
//! use docsite::config::{RoutingConfig, RoutingMethod};
//! use docsite::route::{RouteType, SourceType};
//!
//! let config = RoutingConfig { method: RoutingMethod::Path, ..RoutingConfig::default() };
//! let mut builder = RouteTableBuilder::new(config);
//! builder.add_route("web", SourceType::Doc)?;
//! builder.add_route("guide", SourceType::Text)?;
//! let (table, counts) = builder.finish();
//! assert_eq!(table.get(RouteType::Api, "web").unwrap().path, "api/web/");
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! app:
//!   title: "Acme Docs"
//!   base: "/docs/"
//!   entrance: "content:guide"
//!   server: github
//!   routing:
//!     method: path
//!     case_sensitive: false
//! api:
//!   - sources: [ "doc/core.json" ]
//!   - name: web
//!     sources: [ "doc/web.json" ]
//! content:
//!   - path: docs/guide.md
//! dest: site
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod content;
pub mod logging;
pub mod route;
pub mod runtime;
pub mod scaffold;
pub mod site;
pub mod watch;

pub use builder::{RouteTableBuilder, RouteTableError};
pub use config::{BuildConfig, RoutingConfig, RoutingMethod, ServerType};
pub use route::{Route, RouteTable, RouteType, SiteArtifact, SourceType};
pub use runtime::{Router, RouterError};
pub use site::{build_site, BuildSummary};
