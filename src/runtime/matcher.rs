use super::resolver::Candidate;
use crate::config::RoutingConfig;
use crate::route::{parse_entrance, Route, RouteTable, RouteType, DEFAULT_API_NAME};

/// Find the route a candidate addresses.
///
/// The name goes through the same normalization the builder applied, so a
/// case-insensitive table matches `?content=README` against `readme`. An api
/// candidate without a name addresses the default group. Unknown type
/// keywords and unnamed content candidates match nothing.
#[must_use]
pub fn match_candidate<'t>(candidate: &Candidate, table: &'t RouteTable, config: &RoutingConfig) -> Option<&'t Route> {
    let route_type = RouteType::from_keyword(&candidate.route_type)?;
    let name = candidate
        .name
        .as_deref()
        .map(|n| config.normalize_name(n.trim_matches('/')))
        .filter(|n| !n.is_empty());
    match (route_type, name) {
        (RouteType::Api, None) => table.get(RouteType::Api, DEFAULT_API_NAME),
        (RouteType::Content, None) => None,
        (route_type, Some(name)) => table.get(route_type, &name),
    }
}

/// Candidate for the configured entrance identifier.
#[must_use]
pub fn entrance_candidate(config: &RoutingConfig) -> Candidate {
    let (route_type, name) = parse_entrance(&config.entrance);
    Candidate::new(route_type.as_str(), name)
}
