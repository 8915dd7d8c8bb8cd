use url::Url;

/// Origin used to anchor relative locations.
const LOCAL_ORIGIN: &str = "http://localhost/";

/// The parts of the browser location the resolver reads.
///
/// `stored_route` carries a route path saved by a redirect document before it
/// reloaded the root document; it takes precedence over the location itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSnapshot {
    /// Path component, always starting with `/`.
    pub pathname: String,
    /// Query string without the leading `?`.
    pub search: String,
    pub stored_route: Option<String>,
}

impl LocationSnapshot {
    #[must_use]
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let pathname = pathname.into();
        let search = search.into();
        Self {
            pathname: if pathname.starts_with('/') {
                pathname
            } else {
                format!("/{pathname}")
            },
            search: search.trim_start_matches('?').to_string(),
            stored_route: None,
        }
    }

    /// Parse an absolute URL or a location relative to the site origin, e.g.
    /// `https://host/docs/api/web/`, `/docs/?content=guide` or `?api`.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LOCAL_ORIGIN)?.join(href)?,
            Err(e) => return Err(e),
        };
        Ok(Self::new(url.path(), url.query().unwrap_or_default()))
    }

    #[must_use]
    pub fn with_stored_route(mut self, route_path: impl Into<String>) -> Self {
        self.stored_route = Some(route_path.into());
        self
    }

    /// Path plus query, as shown in the address bar.
    #[must_use]
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, self.search)
        }
    }
}
