//! # Config Module
//!
//! Build configuration for the documentation generator.
//!
//! A configuration file (YAML or JSON) lists the api groups and narrative
//! files to document and describes how the generated application is routed
//! and hosted. Command-line flags override file values. The result is a
//! [`BuildConfig`] holding the immutable [`RoutingConfig`] that is later
//! embedded in the site artifact.
//!
//! ## Example
//!
//! ```yaml
//! app:
//!   title: "My Docs"
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
//!   - path: README.md
//!   - path: docs/guide.html
//!     name: guide
//! dest: site
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
