use crate::route::Route;

/// Kinds of events the router emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// First successful render after startup; emitted once.
    Ready,
    /// A route was applied, before its view renders.
    Route,
    /// A view was rendered; carries `None` for the not-found view.
    Render,
    /// A location change was observed.
    Navigate,
}

/// Payload delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    Ready,
    Route(Route),
    Render(Option<Route>),
    Navigate(String),
}

impl RouterEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            RouterEvent::Ready => EventKind::Ready,
            RouterEvent::Route(_) => EventKind::Route,
            RouterEvent::Render(_) => EventKind::Render,
            RouterEvent::Navigate(_) => EventKind::Navigate,
        }
    }
}

/// Handle returned by [`EventBus::on`] and [`EventBus::once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&RouterEvent)>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    once: bool,
    callback: Callback,
}

/// Listener registry. Listeners run synchronously in subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: FnMut(&RouterEvent) + 'static,
    {
        self.add(kind, false, Box::new(callback))
    }

    /// Subscribe to the next event of `kind` only.
    pub fn once<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: FnMut(&RouterEvent) + 'static,
    {
        self.add(kind, true, Box::new(callback))
    }

    /// Remove a listener. Returns `false` when it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    pub fn emit(&mut self, event: &RouterEvent) {
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(event);
        }
        self.listeners.retain(|l| !(l.once && l.kind == kind));
    }

    fn add(&mut self, kind: EventKind, once: bool, callback: Callback) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            kind,
            once,
            callback,
        });
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
