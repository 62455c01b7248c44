/// Events emitted by input strategies and their delivery to subscribers.
use serde::Serialize;

/// Menu commands produced in navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuAction {
    Confirm,
    Back,
    Shortcut1,
    Shortcut2,
    Shortcut3,
    Up,
    Down,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavigationEvent {
    /// A command fired on a press edge.
    Fired(MenuAction),
    /// A holdable command began repeating.
    HoldStarted(MenuAction),
    /// A holdable command stopped repeating.
    HoldEnded(MenuAction),
    /// A repeat fire while a holdable command is held.
    Repeated(MenuAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum StrategyEvent {
    FretChanged { pressed: bool, fret: usize },
    Strummed,
    WhammyChanged { delta: f32 },
    StarPowerActivated,
    Navigation(NavigationEvent),
    Pause,
}

/// Destination for events produced during a tick.
pub trait EventSink {
    fn emit(&mut self, event: StrategyEvent);
}

impl EventSink for Vec<StrategyEvent> {
    fn emit(&mut self, event: StrategyEvent) {
        self.push(event);
    }
}

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StrategyEvent)>;

/// Listener list with synchronous, fire-and-forget delivery.
///
/// Listeners run in subscription order, inside the tick that produced the
/// event.
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StrategyEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventSink for Subscribers {
    fn emit(&mut self, event: StrategyEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
