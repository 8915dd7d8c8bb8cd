//! # Builder Module
//!
//! Build-time construction of the route table.
//!
//! [`RouteTableBuilder::add_route`] is called once per documented unit in
//! discovery order. It normalizes the name according to the case-sensitivity
//! policy, derives the route type from the source type, validates the name
//! and appends an immutable [`crate::route::Route`].
//!
//! ## Rules
//!
//! 1. No two routes share `(type, name)` after normalization.
//! 2. `api` alone or followed by a separator is reserved; only the default api
//!    group maps onto the bare `api` address.
//! 3. `#`, `~`, `&`, `^`, backtick, `'`, `"` and `\` never appear in a name.
//! 4. With `path` routing on a host without server-side rewrites every name
//!    segment must be a safe directory name on that host.
//!
//! Any violation is a [`RouteTableError`] and fails the build.

#[allow(clippy::module_inception)]
mod builder;
mod error;
mod validate;

pub use builder::{RouteCounts, RouteTableBuilder};
pub use error::RouteTableError;
pub use validate::{
    check_characters, check_generated_output, check_host_segments, check_reserved, check_segments, generated_entries,
    validate_name, DISALLOWED_CHARS,
};
