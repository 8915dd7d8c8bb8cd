use super::error::RouterError;
use super::events::{EventBus, EventKind, ListenerId, RouterEvent};
use super::fetch::{ContentFetcher, FetchError};
use super::location::LocationSnapshot;
use super::matcher::{entrance_candidate, match_candidate};
use super::render::{Container, PartialRenderer, Renderer, View};
use super::resolver::resolve_candidate;
use crate::config::RoutingConfig;
use crate::route::{Route, RouteKind, RouteTable, SiteArtifact};
use std::fmt;
use tracing::{debug, info, warn};

/// Router lifecycle. `Rendering` persists while a content fetch is pending;
/// every completed navigation returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Resolving,
    Rendering,
    NotFound,
}

/// Outcome reported to a render callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered,
    /// The route was already current; nothing was rendered.
    Unchanged,
    NotFound,
    /// A newer navigation started before this one's content arrived.
    Superseded,
}

/// Completion callback for [`Router::render`] and [`Router::apply_route`].
pub type RenderCallback = Box<dyn FnOnce(RenderStatus)>;

/// A content fetch the host must complete with [`Router::complete_fetch`].
pub struct PendingFetch {
    generation: u64,
    route: Route,
    callback: Option<RenderCallback>,
}

impl PendingFetch {
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn content_path(&self) -> &str {
        match self.route.kind() {
            RouteKind::Content { content_path } => content_path,
            RouteKind::Api { .. } => "",
        }
    }
}

impl fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFetch")
            .field("generation", &self.generation)
            .field("route", &self.route.id)
            .finish()
    }
}

/// Result of one navigation step.
#[derive(Debug)]
pub enum Navigation {
    Rendered(Route),
    Unchanged,
    NotFound,
    /// A content route was applied; its fragment must be fetched first.
    AwaitingContent(PendingFetch),
    /// The completed fetch belonged to a superseded navigation and was dropped.
    Stale,
}

/// Runtime router of a generated site.
///
/// Owns the embedded [`SiteArtifact`] and turns locations into rendered
/// views. Hosts with their own asynchronous fetch drive the two phases
/// directly with [`Self::apply_route`] and [`Self::complete_fetch`];
/// [`Self::render`] and [`Self::navigate`] run both phases with the owned
/// fetcher.
pub struct Router<P, C, F> {
    artifact: SiteArtifact,
    renderer: Renderer<P, C>,
    fetcher: F,
    events: EventBus,
    current: Option<Route>,
    entrance: Option<Route>,
    initial_load_pending: bool,
    state: RouterState,
    generation: u64,
}

impl<P: PartialRenderer, C: Container, F: ContentFetcher> Router<P, C, F> {
    pub fn new(artifact: SiteArtifact, partials: P, container: C, fetcher: F) -> Self {
        let entrance = match_candidate(
            &entrance_candidate(&artifact.routing),
            &artifact.routes,
            &artifact.routing,
        )
        .cloned();
        match &entrance {
            Some(route) => info!(entrance = %route.id, routes_count = artifact.routes.len(), "Router ready"),
            None => warn!(
                entrance = %artifact.routing.entrance,
                "Entrance does not match any route; the root document will show the not-found view"
            ),
        }
        let renderer = Renderer::new(partials, container, artifact.title.clone());
        Self {
            artifact,
            renderer,
            fetcher,
            events: EventBus::new(),
            current: None,
            entrance,
            initial_load_pending: true,
            state: RouterState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.artifact.routing
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.artifact.routes
    }

    #[must_use]
    pub fn artifact(&self) -> &SiteArtifact {
        &self.artifact
    }

    #[must_use]
    pub fn state(&self) -> RouterState {
        self.state
    }

    #[must_use]
    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn entrance_route(&self) -> Option<&Route> {
        self.entrance.as_ref()
    }

    pub fn renderer(&self) -> &Renderer<P, C> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<P, C> {
        &mut self.renderer
    }

    /// Whether `route` is part of this site's table.
    #[must_use]
    pub fn exists(&self, route: &Route) -> bool {
        self.artifact.routes.contains(route)
    }

    /// Whether `route` is the route currently shown.
    #[must_use]
    pub fn is_current(&self, route: &Route) -> bool {
        self.current.as_ref().is_some_and(|c| c.is_equal_to(route))
    }

    pub fn on<G>(&mut self, kind: EventKind, callback: G) -> ListenerId
    where
        G: FnMut(&RouterEvent) + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn once<G>(&mut self, kind: EventKind, callback: G) -> ListenerId
    where
        G: FnMut(&RouterEvent) + 'static,
    {
        self.events.once(kind, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Route a location addresses, falling back to the entrance when it
    /// carries no routing information.
    #[must_use]
    pub fn resolve(&self, location: &LocationSnapshot) -> Option<&Route> {
        match resolve_candidate(location, &self.artifact.routing) {
            Some(candidate) => match_candidate(&candidate, &self.artifact.routes, &self.artifact.routing),
            None => self.entrance.as_ref(),
        }
    }

    /// Handle a location change: resolve, match and render.
    ///
    /// Never fails on a missing route; the not-found view is shown instead.
    pub fn navigate(&mut self, location: &LocationSnapshot) -> Result<RenderStatus, RouterError> {
        self.events.emit(&RouterEvent::Navigate(location.href()));
        self.state = RouterState::Resolving;
        let route = self.resolve(location).cloned();
        let requested = route.is_none().then(|| location.href());
        debug!(href = %location.href(), matched = ?route.as_ref().map(|r| &r.id), "Navigation resolved");

        // A callback turns a miss into the not-found view instead of an error.
        let callback: RenderCallback = Box::new(|_| {});
        let navigation = match route {
            Some(route) => self.render(Some(&route), Some(callback))?,
            None => self.render_not_found(requested, Some(callback))?,
        };
        Ok(match navigation {
            Navigation::Rendered(_) | Navigation::AwaitingContent(_) => RenderStatus::Rendered,
            Navigation::Unchanged => RenderStatus::Unchanged,
            Navigation::NotFound => RenderStatus::NotFound,
            Navigation::Stale => RenderStatus::Superseded,
        })
    }

    /// Apply `route` and render it, fetching content with the owned fetcher.
    ///
    /// Without a callback a missing route is returned as
    /// [`RouterError::NotFound`]; with one, the callback is told
    /// [`RenderStatus::NotFound`] and the call succeeds.
    pub fn render(&mut self, route: Option<&Route>, callback: Option<RenderCallback>) -> Result<Navigation, RouterError> {
        match self.apply_route(route, callback)? {
            Navigation::AwaitingContent(pending) => {
                let outcome = self.fetcher.fetch(pending.content_path());
                self.complete_fetch(pending, outcome)
            }
            other => Ok(other),
        }
    }

    /// First phase of a navigation.
    ///
    /// Api routes render immediately. Content routes become current and
    /// return [`Navigation::AwaitingContent`]; the host fetches the fragment
    /// and passes the outcome to [`Self::complete_fetch`].
    pub fn apply_route(&mut self, route: Option<&Route>, callback: Option<RenderCallback>) -> Result<Navigation, RouterError> {
        let route = match route {
            Some(r) if self.exists(r) => r.clone(),
            Some(r) => return self.render_not_found(Some(r.id.clone()), callback),
            None => return self.render_not_found(None, callback),
        };

        if self.is_current(&route) {
            debug!(route_id = %route.id, "Route already current");
            self.state = RouterState::Idle;
            if let Some(cb) = callback {
                cb(RenderStatus::Unchanged);
            }
            return Ok(Navigation::Unchanged);
        }

        self.generation += 1;
        self.current = Some(route.clone());
        self.state = RouterState::Rendering;
        self.events.emit(&RouterEvent::Route(route.clone()));

        match route.kind() {
            RouteKind::Api { group } => {
                let docs = self.artifact.docs.get(group);
                if let Err(e) = self.renderer.render(View::Api { route: &route, docs }) {
                    return Err(self.abandon_render(&route, e));
                }
                Ok(self.finish_render(route, callback))
            }
            RouteKind::Content { .. } => Ok(Navigation::AwaitingContent(PendingFetch {
                generation: self.generation,
                route,
                callback,
            })),
        }
    }

    /// Second phase: render fetched content, unless a newer navigation
    /// superseded the fetch. A failed fetch shows the not-found view.
    pub fn complete_fetch(&mut self, pending: PendingFetch, outcome: Result<String, FetchError>) -> Result<Navigation, RouterError> {
        let PendingFetch {
            generation,
            route,
            callback,
        } = pending;

        if generation != self.generation || !self.is_current(&route) {
            debug!(route_id = %route.id, "Discarding superseded content");
            if let Some(cb) = callback {
                cb(RenderStatus::Superseded);
            }
            return Ok(Navigation::Stale);
        }

        match outcome {
            Ok(html) => {
                if let Err(e) = self.renderer.render(View::Content { route: &route, html: &html }) {
                    return Err(self.abandon_render(&route, e));
                }
                Ok(self.finish_render(route, callback))
            }
            Err(e) => {
                warn!(route_id = %route.id, status = e.status, error = %e, "Content fetch failed");
                self.render_not_found(Some(route.id), callback)
            }
        }
    }

    fn finish_render(&mut self, route: Route, callback: Option<RenderCallback>) -> Navigation {
        self.events.emit(&RouterEvent::Render(Some(route.clone())));
        if self.initial_load_pending {
            self.initial_load_pending = false;
            self.events.emit(&RouterEvent::Ready);
        }
        self.state = RouterState::Idle;
        debug!(route_id = %route.id, "Route rendered");
        if let Some(cb) = callback {
            cb(RenderStatus::Rendered);
        }
        Navigation::Rendered(route)
    }

    /// Forget a route whose view failed to render so the next navigation
    /// to it is not treated as a no-op.
    fn abandon_render(&mut self, route: &Route, error: RouterError) -> RouterError {
        warn!(route_id = %route.id, error = %error, "Render failed");
        self.current = None;
        self.generation += 1;
        self.state = RouterState::Idle;
        error
    }

    fn render_not_found(&mut self, requested: Option<String>, callback: Option<RenderCallback>) -> Result<Navigation, RouterError> {
        self.state = RouterState::NotFound;
        self.current = None;
        self.generation += 1;
        debug!(requested = ?requested, "No route matched");
        if let Err(e) = self.renderer.render(View::NotFound {
            requested: requested.as_deref(),
        }) {
            self.state = RouterState::Idle;
            return Err(e);
        }
        self.events.emit(&RouterEvent::Render(None));
        self.state = RouterState::Idle;
        match callback {
            Some(cb) => {
                cb(RenderStatus::NotFound);
                Ok(Navigation::NotFound)
            }
            None => Err(RouterError::NotFound { requested }),
        }
    }
}

impl<P, C, F> fmt::Debug for Router<P, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current.as_ref().map(|r| &r.id))
            .field("entrance", &self.entrance.as_ref().map(|r| &r.id))
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}
