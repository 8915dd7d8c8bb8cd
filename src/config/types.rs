use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How routes are addressed in the generated application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMethod {
    /// `?api=web`, `?content=guide`
    #[default]
    Query,
    /// `api/web/`, `guide/`
    Path,
}

impl fmt::Display for RoutingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMethod::Query => write!(f, "query"),
            RoutingMethod::Path => write!(f, "path"),
        }
    }
}

impl FromStr for RoutingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(RoutingMethod::Query),
            "path" => Ok(RoutingMethod::Path),
            other => Err(format!("unknown routing method '{other}' (expected query or path)")),
        }
    }
}

/// The kind of host the generated site is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Apache httpd; deep links are rewritten through `.htaccess`.
    Apache,
    /// IIS; deep links are rewritten through `web.config`.
    Windows,
    /// GitHub Pages; files are served as-is and `_`-prefixed folders are dropped.
    Github,
    /// Any plain file server.
    #[default]
    Static,
}

impl ServerType {
    /// Whether the host can map arbitrary sub-paths back to the root document.
    #[must_use]
    pub fn rewrites(self) -> bool {
        matches!(self, ServerType::Apache | ServerType::Windows)
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerType::Apache => "apache",
            ServerType::Windows => "windows",
            ServerType::Github => "github",
            ServerType::Static => "static",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ServerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apache" => Ok(ServerType::Apache),
            "windows" | "iis" => Ok(ServerType::Windows),
            "github" => Ok(ServerType::Github),
            "static" => Ok(ServerType::Static),
            other => Err(format!(
                "unknown server type '{other}' (expected apache, windows, github or static)"
            )),
        }
    }
}

/// Normalized routing configuration.
///
/// Built once at the start of a build, never mutated afterwards, and embedded
/// verbatim in the site artifact so the runtime router applies the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    pub method: RoutingMethod,
    pub case_sensitive: bool,
    pub server: ServerType,
    /// Application base path, always of the form `/` or `/segment/.../`.
    pub base: String,
    /// Entrance identifier, e.g. `api`, `api:web`, `content:guide`.
    pub entrance: String,
    /// File name of the root document every route resolves on.
    pub root_document: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            method: RoutingMethod::Query,
            case_sensitive: true,
            server: ServerType::Static,
            base: "/".to_string(),
            entrance: "api".to_string(),
            root_document: "index.html".to_string(),
        }
    }
}

impl RoutingConfig {
    /// Applies the case-sensitivity policy to a route name.
    #[must_use]
    pub fn normalize_name(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// URL of the root document under the base path, e.g. `/docs/index.html`.
    #[must_use]
    pub fn root_url(&self) -> String {
        format!("{}{}", self.base, self.root_document)
    }
}

/// Normalizes a user supplied base path to `/` or `/a/b/`.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// `routing:` block of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutingSection {
    pub method: Option<RoutingMethod>,
    pub case_sensitive: Option<bool>,
}

/// `app:` block of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub title: Option<String>,
    pub base: Option<String>,
    pub entrance: Option<String>,
    pub root_document: Option<String>,
    pub server: Option<ServerType>,
    pub routing: RoutingSection,
}

/// One group of documented-symbol sources.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGroupConfig {
    /// Group name; unnamed groups form the default api group.
    #[serde(default)]
    pub name: Option<String>,
    pub sources: Vec<PathBuf>,
}

/// One narrative unit.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub path: PathBuf,
    /// Explicit route name; defaults to the file stem.
    #[serde(default)]
    pub name: Option<String>,
}

/// Raw configuration file, before CLI overrides are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub app: AppSection,
    pub api: Vec<ApiGroupConfig>,
    pub content: Vec<ContentConfig>,
    pub dest: Option<PathBuf>,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub method: Option<RoutingMethod>,
    pub case_sensitive: Option<bool>,
    pub server: Option<ServerType>,
    pub base: Option<String>,
    pub entrance: Option<String>,
    pub dest: Option<PathBuf>,
}

/// Fully resolved build configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub title: String,
    pub routing: RoutingConfig,
    pub api: Vec<ApiGroupConfig>,
    pub content: Vec<ContentConfig>,
    /// Directory relative paths in `api` and `content` are resolved against.
    pub root_dir: PathBuf,
    pub dest: PathBuf,
}
