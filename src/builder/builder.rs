use super::error::RouteTableError;
use super::validate::validate_name;
use crate::config::RoutingConfig;
use crate::route::{Route, RouteTable, RouteType, SourceType, DEFAULT_API_NAME};
use tracing::{debug, info};

/// Per-type counters for the build summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteCounts {
    pub api: usize,
    pub content: usize,
}

impl RouteCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.api + self.content
    }
}

/// Builds the route table one documented unit at a time.
///
/// Names are normalized and validated on registration; the first violation is
/// returned and the builder should be discarded.
#[derive(Debug)]
pub struct RouteTableBuilder {
    config: RoutingConfig,
    table: RouteTable,
    counts: RouteCounts,
}

impl RouteTableBuilder {
    #[must_use]
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            config,
            table: RouteTable::new(),
            counts: RouteCounts::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn counts(&self) -> RouteCounts {
        self.counts
    }

    /// Register one documented unit, in discovery order.
    ///
    /// `Doc` sources become api routes; an empty name (or the sentinel
    /// `_def_`) selects the default api group. Everything else becomes a
    /// content route.
    pub fn add_route(&mut self, name: &str, source_type: SourceType) -> Result<&Route, RouteTableError> {
        let route_type = source_type.route_type();
        let trimmed = name.trim().trim_matches('/').trim();
        let normalized = self.config.normalize_name(trimmed);

        let is_default_group =
            route_type == RouteType::Api && (normalized.is_empty() || normalized == DEFAULT_API_NAME);

        let name = if is_default_group {
            DEFAULT_API_NAME.to_string()
        } else {
            if normalized.is_empty() {
                return Err(RouteTableError::EmptyName { route_type });
            }
            validate_name(&normalized, route_type, &self.config)?;
            normalized
        };

        if self.table.contains_key(route_type, &name) {
            return Err(RouteTableError::Duplicate {
                id: format!("{route_type}:{name}"),
            });
        }

        match route_type {
            RouteType::Api => self.counts.api += 1,
            RouteType::Content => self.counts.content += 1,
        }

        let route = self
            .table
            .push(Route::new(route_type, name, source_type, &self.config));
        debug!(
            route_id = %route.id,
            path = %route.path,
            source_type = %source_type,
            "Route registered"
        );
        Ok(route)
    }

    /// Finish the build and hand out the immutable table.
    #[must_use]
    pub fn finish(self) -> (RouteTable, RouteCounts) {
        info!(
            routes_count = self.counts.total(),
            api_routes = self.counts.api,
            content_routes = self.counts.content,
            method = %self.config.method,
            server = %self.config.server,
            "Route table built"
        );
        (self.table, self.counts)
    }
}
