use crate::config::{RoutingConfig, RoutingMethod};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Reserved keyword that addresses api routes.
pub const API_KEYWORD: &str = "api";
/// Keyword that addresses content routes in query routing.
pub const CONTENT_KEYWORD: &str = "content";
/// Name of the default (unnamed) api group.
pub const DEFAULT_API_NAME: &str = "_def_";
/// Directory content fragments are written to, relative to the output root.
pub const CONTENT_DIR: &str = "content";

/// Route kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Api,
    Content,
}

impl RouteType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RouteType::Api => API_KEYWORD,
            RouteType::Content => CONTENT_KEYWORD,
        }
    }

    /// Parse a (case-insensitive) type keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            API_KEYWORD => Some(RouteType::Api),
            CONTENT_KEYWORD => Some(RouteType::Content),
            _ => None,
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which collaborator produced a documented unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Documentation-comment sources (api groups).
    Doc,
    /// Narrative text, e.g. markdown.
    Text,
    /// Ready-made HTML.
    Markup,
}

impl SourceType {
    /// Doc sources become api routes, everything else content routes.
    #[must_use]
    pub fn route_type(self) -> RouteType {
        match self {
            SourceType::Doc => RouteType::Api,
            SourceType::Text | SourceType::Markup => RouteType::Content,
        }
    }

    /// Classify a narrative file by extension.
    #[must_use]
    pub fn for_content_file(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" | "txt" => Some(SourceType::Text),
            "html" | "htm" => Some(SourceType::Markup),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceType::Doc => "doc",
            SourceType::Text => "text",
            SourceType::Markup => "markup",
        };
        f.write_str(s)
    }
}

/// One addressable unit of the generated application.
///
/// Routes are immutable once appended to a [`super::RouteTable`]; the flat
/// shape below is the serialized contract read by the runtime router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// `"{type}:{name}"`
    pub id: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub name: String,
    pub path: String,
    pub content_path: Option<String>,
    pub source_type: SourceType,
}

/// Typed view of a route for exhaustive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind<'a> {
    /// Rendered from the embedded documentation data of `group`.
    Api { group: &'a str },
    /// Rendered from the fragment at `content_path`.
    Content { content_path: &'a str },
}

impl Route {
    /// Build a route, computing its id, path and content path.
    #[must_use]
    pub fn new(route_type: RouteType, name: String, source_type: SourceType, config: &RoutingConfig) -> Self {
        let path = route_path(route_type, &name, config.method);
        let content_path = match route_type {
            RouteType::Api => None,
            RouteType::Content => Some(content_path(&name)),
        };
        Self {
            id: format!("{route_type}:{name}"),
            route_type,
            name,
            path,
            content_path,
            source_type,
        }
    }

    /// Typed view. A content route read from an artifact without a content
    /// path yields an empty one, which no fetcher resolves.
    #[must_use]
    pub fn kind(&self) -> RouteKind<'_> {
        match self.route_type {
            RouteType::Api => RouteKind::Api { group: &self.name },
            RouteType::Content => RouteKind::Content {
                content_path: self.content_path.as_deref().unwrap_or_default(),
            },
        }
    }

    #[must_use]
    pub fn is_default_api(&self) -> bool {
        self.route_type == RouteType::Api && self.name == DEFAULT_API_NAME
    }

    /// Two routes are the same navigation target when their paths match.
    #[must_use]
    pub fn is_equal_to(&self, other: &Route) -> bool {
        self.path == other.path
    }
}

/// Percent-encode each `/`-separated segment of a route name.
#[must_use]
pub fn encode_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Addressable path of a route under the given routing method.
#[must_use]
pub fn route_path(route_type: RouteType, name: &str, method: RoutingMethod) -> String {
    let is_default = route_type == RouteType::Api && name == DEFAULT_API_NAME;
    match method {
        RoutingMethod::Query => {
            if is_default {
                format!("?{route_type}")
            } else {
                format!("?{route_type}={}", encode_name(name))
            }
        }
        RoutingMethod::Path => match route_type {
            RouteType::Api if is_default => format!("{API_KEYWORD}/"),
            RouteType::Api => format!("{API_KEYWORD}/{}/", encode_name(name)),
            RouteType::Content => format!("{}/", encode_name(name)),
        },
    }
}

/// Location of a content route's rendered fragment.
#[must_use]
pub fn content_path(name: &str) -> String {
    format!("{CONTENT_DIR}/{name}.html")
}

/// Parse an entrance identifier into a route type and optional name.
///
/// `api` selects the default api group, `api:web` a named group,
/// `content:guide` (or plain `guide`) a content unit.
#[must_use]
pub fn parse_entrance(entrance: &str) -> (RouteType, Option<String>) {
    let entrance = entrance.trim();
    let (kind, name) = match entrance.split_once(':') {
        Some((kind, name)) => (kind.trim(), Some(name.trim())),
        None => (entrance, None),
    };
    match (RouteType::from_keyword(kind), name) {
        (Some(RouteType::Api), name) => (
            RouteType::Api,
            name.filter(|n| !n.is_empty()).map(str::to_string),
        ),
        (Some(RouteType::Content), name) => (
            RouteType::Content,
            name.filter(|n| !n.is_empty()).map(str::to_string),
        ),
        (None, _) => (RouteType::Content, Some(entrance.to_string())),
    }
}
