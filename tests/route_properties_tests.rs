mod common;

use common::fixtures::{artifact, record_renders, router};
use docsite::builder::{RouteTableBuilder, RouteTableError};
use docsite::config::{RoutingConfig, RoutingMethod, ServerType};
use docsite::route::{RouteType, SourceType};
use docsite::runtime::{match_candidate, resolve_candidate, Candidate, LocationSnapshot, RenderStatus};
use docsite::scaffold::{write_scaffold, REDIRECT_STORAGE_KEY};
use std::collections::HashSet;
use std::fs;

const UNITS: &[(&str, SourceType)] = &[
    ("", SourceType::Doc),
    ("web", SourceType::Doc),
    ("readme", SourceType::Text),
    ("my guide", SourceType::Text),
    ("guide/intro", SourceType::Markup),
    ("changes/v1.2", SourceType::Text),
];

fn path_config(server: ServerType, base: &str) -> RoutingConfig {
    RoutingConfig {
        method: RoutingMethod::Path,
        server,
        base: base.to_string(),
        ..RoutingConfig::default()
    }
}

fn location_of(config: &RoutingConfig, route_path: &str) -> LocationSnapshot {
    LocationSnapshot::parse(&format!("{}{}", config.base, route_path)).unwrap()
}

#[test]
fn test_route_identities_are_unique() {
    let config = RoutingConfig {
        case_sensitive: false,
        ..RoutingConfig::default()
    };
    let site = artifact(&config, UNITS);
    let ids: HashSet<_> = site.routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), site.routes.len());
}

#[test]
fn test_round_trip_query_routing() {
    let config = RoutingConfig::default();
    let site = artifact(&config, UNITS);
    for route in site.routes.iter() {
        let location = location_of(&config, &route.path);
        let candidate = resolve_candidate(&location, &config).unwrap();
        let matched = match_candidate(&candidate, &site.routes, &config);
        assert_eq!(matched, Some(route), "round trip of {}", route.path);
    }
}

#[test]
fn test_round_trip_path_routing_through_router() {
    let config = path_config(ServerType::Static, "/docs/");
    let mut router = router(artifact(&config, UNITS));
    let routes: Vec<_> = router.table().iter().cloned().collect();
    for route in routes {
        let location = location_of(&config, &route.path);
        assert_eq!(router.navigate(&location).unwrap(), RenderStatus::Rendered);
        assert_eq!(router.current_route(), Some(&route), "round trip of {}", route.path);
    }
}

#[test]
fn test_round_trip_path_routing_on_rewrite_hosts() {
    for server in [ServerType::Apache, ServerType::Windows, ServerType::Github] {
        let config = path_config(server, "/docs/");
        let mut router = router(artifact(&config, UNITS));
        let routes: Vec<_> = router.table().iter().cloned().collect();
        for route in routes {
            let location = location_of(&config, &route.path);
            assert_eq!(router.navigate(&location).unwrap(), RenderStatus::Rendered);
            assert_eq!(router.current_route(), Some(&route), "{server:?} round trip of {}", route.path);
        }
    }
}

#[test]
fn test_names_without_a_route_path_are_rejected() {
    for server in [ServerType::Apache, ServerType::Static] {
        let mut builder = RouteTableBuilder::new(path_config(server, "/"));
        for name in ["a//b", "a/./b", "../up", "index.html", "content/x", "js"] {
            assert!(builder.add_route(name, SourceType::Text).is_err(), "{server:?} accepted {name}");
        }
        assert!(builder.add_route("index", SourceType::Text).is_ok());
    }
}

#[test]
fn test_applying_same_route_renders_once() {
    let config = RoutingConfig::default();
    let mut router = router(artifact(&config, UNITS));
    let renders = record_renders(&mut router);
    let readme = router.table().get(RouteType::Content, "readme").unwrap().clone();

    router.render(Some(&readme), None).unwrap();
    router.render(Some(&readme), None).unwrap();
    assert_eq!(*renders.borrow(), vec![Some("content:readme".to_string())]);

    router.navigate(&location_of(&config, &readme.path)).unwrap();
    assert_eq!(renders.borrow().len(), 1);
}

#[test]
fn test_reserved_names_are_rejected() {
    for name in ["api", "API", "api/anything", "Api/x/y"] {
        let mut builder = RouteTableBuilder::new(RoutingConfig::default());
        let err = builder.add_route(name, SourceType::Text).unwrap_err();
        assert!(
            matches!(err, RouteTableError::ReservedName { .. }),
            "{name} should be reserved, got {err}"
        );
    }

    let mut builder = RouteTableBuilder::new(RoutingConfig::default());
    assert!(builder.add_route("apiary", SourceType::Text).is_ok());
}

#[test]
fn test_case_insensitive_names_match_any_case() {
    let query = RoutingConfig {
        case_sensitive: false,
        ..RoutingConfig::default()
    };
    let site = artifact(&query, &[("Guide", SourceType::Text)]);
    let guide = site.routes.get(RouteType::Content, "guide").unwrap();
    for href in ["/?content=guide", "/?content=GUIDE", "/?Content=Guide"] {
        let candidate = resolve_candidate(&LocationSnapshot::parse(href).unwrap(), &query).unwrap();
        assert_eq!(match_candidate(&candidate, &site.routes, &query), Some(guide), "{href}");
    }

    let path = RoutingConfig {
        case_sensitive: false,
        ..path_config(ServerType::Apache, "/")
    };
    let site = artifact(&path, &[("Guide", SourceType::Text)]);
    let guide = site.routes.get(RouteType::Content, "guide").unwrap();
    for href in ["/guide/", "/Guide/"] {
        let candidate = resolve_candidate(&LocationSnapshot::parse(href).unwrap(), &path).unwrap();
        assert_eq!(match_candidate(&candidate, &site.routes, &path), Some(guide), "{href}");
    }
}

#[test]
fn test_case_sensitive_names_keep_their_case() {
    let config = RoutingConfig::default();
    let site = artifact(&config, &[("Guide", SourceType::Text)]);
    assert!(site.routes.get(RouteType::Content, "Guide").is_some());
    let candidate = Candidate::new("content", Some("guide".to_string()));
    assert!(match_candidate(&candidate, &site.routes, &config).is_none());
}

#[test]
fn test_query_routing_scenario() {
    let config = RoutingConfig {
        method: RoutingMethod::Query,
        ..RoutingConfig::default()
    };
    let site = artifact(&config, &[("readme", SourceType::Text), ("", SourceType::Doc)]);
    let routes: Vec<_> = site.routes.iter().map(|r| (r.id.as_str(), r.path.as_str())).collect();
    assert_eq!(
        routes,
        vec![("content:readme", "?content=readme"), ("api:_def_", "?api")]
    );
}

#[test]
fn test_path_routing_static_host_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = path_config(ServerType::Static, "/");
    let site = artifact(&config, &[("web", SourceType::Doc)]);
    let web = site.routes.get(RouteType::Api, "web").unwrap();
    assert_eq!(web.path, "api/web/");

    write_scaffold(&site.routes, &config, dir.path()).unwrap();
    let redirect = fs::read_to_string(dir.path().join("api/web/index.html")).unwrap();
    assert!(redirect.contains(REDIRECT_STORAGE_KEY));
    assert!(redirect.contains("\"/index.html\""));
}

#[test]
fn test_not_found_scenario() {
    let config = RoutingConfig::default();
    let site = artifact(&config, UNITS);
    let candidate = Candidate::new("content", Some("missing".to_string()));
    assert!(match_candidate(&candidate, &site.routes, &config).is_none());

    let mut router = router(site);
    let renders = record_renders(&mut router);
    let status = router.navigate(&LocationSnapshot::parse("/?content=missing").unwrap()).unwrap();
    assert_eq!(status, RenderStatus::NotFound);
    assert_eq!(*renders.borrow(), vec![None]);
    assert!(router.current_route().is_none());
}

#[test]
fn test_duplicate_names_are_rejected() {
    let config = RoutingConfig {
        case_sensitive: false,
        ..RoutingConfig::default()
    };
    let mut builder = RouteTableBuilder::new(config);
    builder.add_route("changelog", SourceType::Text).unwrap();
    let err = builder.add_route("CHANGELOG", SourceType::Markup).unwrap_err();
    assert_eq!(
        err,
        RouteTableError::Duplicate {
            id: "content:changelog".to_string()
        }
    );
    assert!(err.to_string().contains("content:changelog"));
}
