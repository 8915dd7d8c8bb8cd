//! Route name rules.
//!
//! The disallowed character set, the reserved keyword and the relative
//! segment rules apply to every routing method; content fragments are written
//! to `content/{name}.html` whatever the method. Path routing reserves the
//! names of the generator's own output for content routes, and on a host
//! that serves files as-is adds the filesystem rules, because a directory is
//! created for every route.

use super::error::RouteTableError;
use crate::config::{RoutingConfig, RoutingMethod, ServerType};
use crate::route::{RouteType, API_KEYWORD, BOOTSTRAP_SCRIPT, CONTENT_DIR};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters never allowed in a route name.
pub const DISALLOWED_CHARS: &[char] = &['#', '~', '&', '^', '`', '\'', '"', '\\'];

/// Characters that may not appear in a directory name on common hosts.
const UNSAFE_PATH_CHARS: &[char] = &['<', '>', ':', '|', '?', '*'];

/// Separators that make `api<sep>...` collide with the api address space.
const KEYWORD_SEPARATORS: &[char] = &['/', ':'];

static DEVICE_NAME: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])(\..*)?$")
        .expect("device name regex is valid")
});

/// Run every rule that applies under `config` against an already-normalized name.
pub fn validate_name(name: &str, route_type: RouteType, config: &RoutingConfig) -> Result<(), RouteTableError> {
    check_reserved(name)?;
    check_characters(name)?;
    check_segments(name)?;
    if config.method == RoutingMethod::Path {
        if route_type == RouteType::Content {
            check_generated_output(name, config)?;
        }
        if !config.server.rewrites() {
            check_host_segments(name, config.server)?;
        }
    }
    Ok(())
}

/// Reject empty, `.` and `..` segments.
pub fn check_segments(name: &str) -> Result<(), RouteTableError> {
    let invalid = |reason: String| RouteTableError::InvalidSegment {
        name: name.to_string(),
        reason,
    };
    for segment in name.split('/') {
        if segment.is_empty() {
            return Err(invalid("empty path segment".to_string()));
        }
        if segment == "." || segment == ".." {
            return Err(invalid(format!("'{segment}' is a relative path segment")));
        }
    }
    Ok(())
}

/// Entries the build writes at the output root for `config`.
#[must_use]
pub fn generated_entries(config: &RoutingConfig) -> Vec<&str> {
    let mut entries = vec![CONTENT_DIR, config.root_document.as_str()];
    if let Some((dir, _)) = BOOTSTRAP_SCRIPT.split_once('/') {
        entries.push(dir);
    }
    match config.server {
        ServerType::Apache => entries.push(".htaccess"),
        ServerType::Windows => entries.push("web.config"),
        ServerType::Github => entries.push("404.html"),
        ServerType::Static => {}
    }
    entries
}

/// Reject content names whose directory would shadow generated output.
pub fn check_generated_output(name: &str, config: &RoutingConfig) -> Result<(), RouteTableError> {
    let first = name.split('/').next().unwrap_or_default();
    match generated_entries(config)
        .into_iter()
        .find(|entry| entry.eq_ignore_ascii_case(first))
    {
        Some(entry) => Err(RouteTableError::GeneratedPath {
            name: name.to_string(),
            path: entry.to_string(),
        }),
        None => Ok(()),
    }
}

/// Reject `api`, `API`, `api/...` and `api:...`.
pub fn check_reserved(name: &str) -> Result<(), RouteTableError> {
    let lower = name.to_ascii_lowercase();
    let reserved = match lower.strip_prefix(API_KEYWORD) {
        Some(rest) => rest.is_empty() || rest.starts_with(KEYWORD_SEPARATORS),
        None => false,
    };
    if reserved {
        return Err(RouteTableError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub fn check_characters(name: &str) -> Result<(), RouteTableError> {
    match name.chars().find(|c| DISALLOWED_CHARS.contains(c)) {
        Some(character) => Err(RouteTableError::DisallowedCharacter {
            name: name.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// Validate each `/`-separated segment as a directory name on `server`.
pub fn check_host_segments(name: &str, server: ServerType) -> Result<(), RouteTableError> {
    let unsafe_for = |reason: String| RouteTableError::UnsafeForHost {
        name: name.to_string(),
        server,
        reason,
    };

    for segment in name.split('/') {
        if segment.is_empty() {
            return Err(unsafe_for("empty path segment".to_string()));
        }
        if segment == "." || segment == ".." {
            return Err(unsafe_for(format!("'{segment}' is a relative path segment")));
        }
        if let Some(c) = segment
            .chars()
            .find(|c| c.is_control() || UNSAFE_PATH_CHARS.contains(c))
        {
            return Err(unsafe_for(format!(
                "segment '{segment}' contains '{}'",
                c.escape_default()
            )));
        }
        if segment.ends_with('.') || segment.ends_with(' ') {
            return Err(unsafe_for(format!(
                "segment '{segment}' ends with a dot or space"
            )));
        }
        if DEVICE_NAME.is_match(segment) {
            return Err(unsafe_for(format!(
                "segment '{segment}' is a reserved device name"
            )));
        }
        if server == ServerType::Github && segment.starts_with(['_', '.']) {
            return Err(unsafe_for(format!(
                "segment '{segment}' starts with '_' or '.' and would not be published"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keyword() {
        assert!(check_reserved("api").is_err());
        assert!(check_reserved("API").is_err());
        assert!(check_reserved("api/anything").is_err());
        assert!(check_reserved("api:x").is_err());
        assert!(check_reserved("apis").is_ok());
        assert!(check_reserved("guide/api").is_ok());
    }

    #[test]
    fn test_disallowed_characters() {
        for bad in ["a#b", "~home", "a&b", "x^2", "`tick`", "it's", "say\"hi\"", "a\\b"] {
            assert!(
                matches!(check_characters(bad), Err(RouteTableError::DisallowedCharacter { .. })),
                "{bad} should be rejected"
            );
        }
        assert!(check_characters("release-notes_v1.2").is_ok());
    }

    #[test]
    fn test_host_segments() {
        assert!(check_host_segments("guide/intro", ServerType::Static).is_ok());
        assert!(check_host_segments("con", ServerType::Static).is_err());
        assert!(check_host_segments("docs/LPT1.txt", ServerType::Static).is_err());
        assert!(check_host_segments("a//b", ServerType::Static).is_err());
        assert!(check_host_segments("../up", ServerType::Static).is_err());
        assert!(check_host_segments("what?", ServerType::Static).is_err());
        assert!(check_host_segments("trailing.", ServerType::Static).is_err());
        assert!(check_host_segments("_drafts", ServerType::Static).is_ok());
        assert!(check_host_segments("_drafts", ServerType::Github).is_err());
    }

    #[test]
    fn test_host_rules_only_for_path_without_rewrites() {
        let mut config = RoutingConfig {
            method: RoutingMethod::Path,
            server: ServerType::Static,
            ..RoutingConfig::default()
        };
        assert!(validate_name("nul", RouteType::Content, &config).is_err());
        config.server = ServerType::Apache;
        assert!(validate_name("nul", RouteType::Content, &config).is_ok());
        config.server = ServerType::Static;
        config.method = RoutingMethod::Query;
        assert!(validate_name("nul", RouteType::Content, &config).is_ok());
    }

    #[test]
    fn test_relative_segments_rejected_for_every_method() {
        for method in [RoutingMethod::Query, RoutingMethod::Path] {
            let config = RoutingConfig {
                method,
                server: ServerType::Apache,
                ..RoutingConfig::default()
            };
            for bad in ["../../escaped", "a//b", "guide/./intro", ".."] {
                assert!(
                    matches!(
                        validate_name(bad, RouteType::Content, &config),
                        Err(RouteTableError::InvalidSegment { .. })
                    ),
                    "{bad} should be rejected under {method}"
                );
            }
            assert!(validate_name("guide/intro", RouteType::Content, &config).is_ok());
        }
    }

    #[test]
    fn test_generated_output_reserved_in_path_mode() {
        let mut config = RoutingConfig {
            method: RoutingMethod::Path,
            server: ServerType::Github,
            ..RoutingConfig::default()
        };
        for bad in ["content", "Content/x", "js", "index.html", "404.html"] {
            assert!(
                matches!(
                    check_generated_output(bad, &config),
                    Err(RouteTableError::GeneratedPath { .. })
                ),
                "{bad} should be reserved"
            );
        }
        assert!(check_generated_output("guide/content", &config).is_ok());
        assert!(validate_name("content", RouteType::Api, &config).is_ok());

        config.server = ServerType::Apache;
        assert!(check_generated_output(".htaccess", &config).is_err());
        assert!(check_generated_output("404.html", &config).is_ok());

        config.method = RoutingMethod::Query;
        assert!(validate_name("content", RouteType::Content, &config).is_ok());
    }
}
