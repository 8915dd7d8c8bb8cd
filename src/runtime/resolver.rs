use super::location::LocationSnapshot;
use crate::config::{RoutingConfig, RoutingMethod};
use crate::route::API_KEYWORD;
use smallvec::SmallVec;
use std::borrow::Cow;

/// Routing information extracted from a location, before table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Lower-cased type keyword as found in the location.
    pub route_type: String,
    /// Route name; `None` addresses the default api group.
    pub name: Option<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(route_type: impl Into<String>, name: Option<String>) -> Self {
        Self {
            route_type: route_type.into().to_ascii_lowercase(),
            name: name.filter(|n| !n.is_empty()),
        }
    }
}

/// Extract a candidate `(type, name)` from `location`.
///
/// Returns `None` when the location carries no routing information (the bare
/// root document); callers fall back to the entrance route. The location is
/// read synchronously; there is no deferred re-read.
#[must_use]
pub fn resolve_candidate(location: &LocationSnapshot, config: &RoutingConfig) -> Option<Candidate> {
    if let Some(stored) = location.stored_route.as_deref().map(str::trim) {
        if !stored.is_empty() {
            return resolve_route_path(stored, config);
        }
    }
    match config.method {
        RoutingMethod::Query => from_query(&location.search),
        RoutingMethod::Path => from_path(&location.pathname, config),
    }
}

/// Resolve a route path as stored in the table (`?api=web`, `api/web/`).
#[must_use]
pub fn resolve_route_path(route_path: &str, config: &RoutingConfig) -> Option<Candidate> {
    let (path, query) = route_path.split_once('?').unwrap_or((route_path, ""));
    let location = LocationSnapshot::new(
        format!("{}{}", config.base, path.trim_start_matches('/')),
        query,
    );
    resolve_candidate(&location, config)
}

fn from_query(search: &str) -> Option<Candidate> {
    let (key, value) = url::form_urlencoded::parse(search.as_bytes()).next()?;
    if key.is_empty() {
        return None;
    }
    Some(Candidate::new(key.into_owned(), Some(value.into_owned())))
}

fn from_path(pathname: &str, config: &RoutingConfig) -> Option<Candidate> {
    let base_without_slash = config.base.trim_end_matches('/');
    let rest = if let Some(rest) = pathname.strip_prefix(config.base.as_str()) {
        rest
    } else if pathname == base_without_slash {
        ""
    } else {
        pathname
    };
    let rest = rest.trim_matches('/');
    if rest.is_empty() || rest == config.root_document {
        return None;
    }

    let segments: SmallVec<[Cow<'_, str>; 4]> = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
        .collect();

    match segments.split_first() {
        Some((first, tail)) if first.eq_ignore_ascii_case(API_KEYWORD) => {
            let name = tail.join("/");
            Some(Candidate::new(API_KEYWORD, Some(name)))
        }
        Some(_) => Some(Candidate::new(
            crate::route::CONTENT_KEYWORD,
            Some(segments.join("/")),
        )),
        None => None,
    }
}
