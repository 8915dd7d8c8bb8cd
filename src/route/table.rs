use super::types::{Route, RouteType};
use crate::config::RoutingConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Version of the embedded artifact layout. Bump on any breaking change to
/// [`Route`], [`RoutingConfig`] or [`SiteArtifact`].
pub const SCHEMA_VERSION: u32 = 1;

/// Global the bootstrap script assigns the artifact to.
pub const BOOTSTRAP_GLOBAL: &str = "__DOCSITE__";

/// Location of the bootstrap script, relative to the output root.
pub const BOOTSTRAP_SCRIPT: &str = "js/docsite.bootstrap.js";

/// Ordered collection of routes with a `(type, name)` index.
///
/// Order is insertion order and only matters for enumeration; lookups always
/// go through the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Route>", into = "Vec<Route>")]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<(RouteType, String), usize>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Callers are responsible for uniqueness.
    pub(crate) fn push(&mut self, route: Route) -> &Route {
        let position = self.routes.len();
        self.index
            .insert((route.route_type, route.name.clone()), position);
        self.routes.push(route);
        &self.routes[position]
    }

    /// Look up a route by its already-normalized `(type, name)`.
    #[must_use]
    pub fn get(&self, route_type: RouteType, name: &str) -> Option<&Route> {
        self.index
            .get(&(route_type, name.to_string()))
            .and_then(|&i| self.routes.get(i))
    }

    #[must_use]
    pub fn contains_key(&self, route_type: RouteType, name: &str) -> bool {
        self.index.contains_key(&(route_type, name.to_string()))
    }

    /// Whether `route` is a member of this table (same identity and path).
    #[must_use]
    pub fn contains(&self, route: &Route) -> bool {
        self.get(route.route_type, &route.name)
            .is_some_and(|r| r.is_equal_to(route))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of routes of the given type.
    #[must_use]
    pub fn count(&self, route_type: RouteType) -> usize {
        self.routes
            .iter()
            .filter(|r| r.route_type == route_type)
            .count()
    }
}

impl From<Vec<Route>> for RouteTable {
    fn from(routes: Vec<Route>) -> Self {
        let index = routes
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.route_type, r.name.clone()), i))
            .collect();
        Self { routes, index }
    }
}

impl From<RouteTable> for Vec<Route> {
    fn from(table: RouteTable) -> Self {
        table.routes
    }
}

/// Error reading an embedded site artifact.
#[derive(Debug)]
pub enum ArtifactError {
    /// The bootstrap script does not contain the expected assignment.
    MissingAssignment,
    /// The payload has no `schemaVersion` field.
    MissingVersion,
    /// The payload was produced by an incompatible generator.
    UnsupportedVersion { found: u64, supported: u32 },
    /// The payload is not valid JSON or does not match the schema.
    Json(serde_json::Error),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::MissingAssignment => write!(
                f,
                "Bootstrap script does not assign window.{BOOTSTRAP_GLOBAL}"
            ),
            ArtifactError::MissingVersion => {
                write!(f, "Site artifact has no schemaVersion; regenerate the site")
            }
            ArtifactError::UnsupportedVersion { found, supported } => write!(
                f,
                "Site artifact schema version {found} is not supported (expected {supported}); \
                regenerate the site with a matching generator"
            ),
            ArtifactError::Json(e) => write!(f, "Malformed site artifact: {e}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(e: serde_json::Error) -> Self {
        ArtifactError::Json(e)
    }
}

/// Everything the runtime needs, embedded in the generated bootstrap script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteArtifact {
    pub schema_version: u32,
    pub title: String,
    pub routing: RoutingConfig,
    pub routes: RouteTable,
    /// Documentation data per api group name.
    #[serde(default)]
    pub docs: BTreeMap<String, Value>,
}

impl SiteArtifact {
    #[must_use]
    pub fn new(title: String, routing: RoutingConfig, routes: RouteTable, docs: BTreeMap<String, Value>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            title,
            routing,
            routes,
            docs,
        }
    }

    pub fn to_json(&self) -> Result<String, ArtifactError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON payload, checking the schema version before anything else.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let value: Value = serde_json::from_str(json)?;
        let found = value
            .get("schemaVersion")
            .and_then(Value::as_u64)
            .ok_or(ArtifactError::MissingVersion)?;
        if found != u64::from(SCHEMA_VERSION) {
            return Err(ArtifactError::UnsupportedVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Render the bootstrap script embedding this artifact.
    pub fn to_bootstrap_script(&self) -> Result<String, ArtifactError> {
        // Escaped so the payload can also be inlined into a <script> element.
        let json = self.to_json()?.replace("</", "<\\/");
        Ok(format!("window.{BOOTSTRAP_GLOBAL} = {json};\n"))
    }

    /// Extract the artifact from a bootstrap script written by
    /// [`Self::to_bootstrap_script`].
    pub fn from_bootstrap_script(script: &str) -> Result<Self, ArtifactError> {
        let prefix = format!("window.{BOOTSTRAP_GLOBAL} =");
        let start = script
            .find(&prefix)
            .ok_or(ArtifactError::MissingAssignment)?
            + prefix.len();
        let payload = script[start..].trim().trim_end_matches(';').trim_end();
        Self::from_json(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{SourceType, DEFAULT_API_NAME};
    use serde_json::json;

    fn sample_table(config: &RoutingConfig) -> RouteTable {
        let mut table = RouteTable::new();
        table.push(Route::new(RouteType::Content, "readme".to_string(), SourceType::Text, config));
        table.push(Route::new(RouteType::Api, DEFAULT_API_NAME.to_string(), SourceType::Doc, config));
        table
    }

    #[test]
    fn test_lookup_and_order() {
        let config = RoutingConfig::default();
        let table = sample_table(&config);
        assert_eq!(table.len(), 2);
        let ids: Vec<_> = table.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["content:readme", "api:_def_"]);
        assert!(table.get(RouteType::Content, "readme").is_some());
        assert!(table.get(RouteType::Api, "readme").is_none());
        assert_eq!(table.count(RouteType::Api), 1);
    }

    #[test]
    fn test_contains_requires_same_path() {
        let config = RoutingConfig::default();
        let table = sample_table(&config);
        let mut other = Route::new(RouteType::Content, "readme".to_string(), SourceType::Text, &config);
        assert!(table.contains(&other));
        other.path = "readme/".to_string();
        assert!(!table.contains(&other));
    }

    #[test]
    fn test_bootstrap_script_roundtrip_keeps_index() {
        let config = RoutingConfig::default();
        let mut docs = BTreeMap::new();
        docs.insert(DEFAULT_API_NAME.to_string(), json!([{"name": "</script>"}]));
        let artifact = SiteArtifact::new("Docs".to_string(), config, sample_table(&RoutingConfig::default()), docs);
        let script = artifact.to_bootstrap_script().unwrap();
        assert!(script.starts_with("window.__DOCSITE__ = {"));
        assert!(!script.contains("</script>"));
        let parsed = SiteArtifact::from_bootstrap_script(&script).unwrap();
        assert_eq!(parsed, artifact);
        assert!(parsed.routes.get(RouteType::Content, "readme").is_some());
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let err = SiteArtifact::from_json(r#"{"schemaVersion": 99, "routes": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::UnsupportedVersion { found: 99, supported: SCHEMA_VERSION }
        ));
        let err = SiteArtifact::from_json(r#"{"routes": []}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingVersion));
        let err = SiteArtifact::from_bootstrap_script("var x = 1;").unwrap_err();
        assert!(matches!(err, ArtifactError::MissingAssignment));
    }
}
