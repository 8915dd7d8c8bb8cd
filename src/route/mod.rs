//! # Route Module
//!
//! The route model shared by the generator and the runtime router.
//!
//! A [`Route`] is one addressable unit of the generated application: either an
//! `api` route (a named group of documented symbols) or a `content` route (one
//! rendered narrative fragment). Routes are collected in insertion order into a
//! [`RouteTable`], which together with the [`crate::config::RoutingConfig`]
//! forms the [`SiteArtifact`] embedded in the generated bootstrap script.
//!
//! ## Addressing
//!
//! | Route            | `query` method     | `path` method  |
//! |------------------|--------------------|----------------|
//! | default api      | `?api`             | `api/`         |
//! | api group `web`  | `?api=web`         | `api/web/`     |
//! | content `guide`  | `?content=guide`   | `guide/`       |
//!
//! The artifact carries an explicit [`SCHEMA_VERSION`] so a runtime reading a
//! table produced by an incompatible generator fails loudly instead of
//! silently misrouting.

mod table;
mod types;

pub use table::*;
pub use types::*;
