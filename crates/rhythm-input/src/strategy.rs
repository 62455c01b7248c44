/// Shared contract and building blocks for per-instrument input strategies.
use serde::Serialize;

use crate::action_state::ActionStateTracker;
use crate::binding::BindingRegistry;
use crate::error::Result;
use crate::event::{StrategyEvent, SubscriptionId, Subscribers};
use crate::mode::{Mode, ModeDispatcher, ModeRoutines};
use crate::source::InputSource;

/// Instrument roles a strategy can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Instrument {
    Guitar,
    GuitarCoop,
    Rhythm,
    Bass,
    Keys,
    Drums,
    Vocals,
}

/// State every strategy owns: sampled action values, the active mode and
/// the listener list.
#[derive(Debug)]
pub struct StrategyCore {
    tracker: ActionStateTracker,
    dispatcher: ModeDispatcher,
    subscribers: Subscribers,
}

impl StrategyCore {
    pub fn new(registry: BindingRegistry, initial: Mode) -> Self {
        Self {
            tracker: ActionStateTracker::new(registry),
            dispatcher: ModeDispatcher::new(initial),
            subscribers: Subscribers::new(),
        }
    }

    pub fn tracker(&self) -> &ActionStateTracker {
        &self.tracker
    }

    pub fn dispatcher(&self) -> &ModeDispatcher {
        &self.dispatcher
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.dispatcher.select(mode);
    }

    pub fn subscribers_mut(&mut self) -> &mut Subscribers {
        &mut self.subscribers
    }

    /// Latch the mode and take this tick's single sampling pass.
    pub fn begin_tick(&mut self, source: &dyn InputSource) -> Mode {
        let mode = self.dispatcher.begin_tick();
        self.tracker.sample_all(source);
        mode
    }

    /// Read access to the samples alongside the event sink, for translators.
    pub fn split(&mut self) -> (&ActionStateTracker, &mut Subscribers) {
        (&self.tracker, &mut self.subscribers)
    }
}

/// Contract shared by instrument-specific strategies.
pub trait InputStrategy: ModeRoutines {
    /// Script type accepted by bot mode.
    type BotScript;

    fn core(&self) -> &StrategyCore;
    fn core_mut(&mut self) -> &mut StrategyCore;

    fn icon_name(&self) -> &'static str;
    fn allowed_instruments(&self) -> &'static [Instrument];
    fn track_path(&self) -> &'static str;

    /// Install the bot script and rewind playback.
    fn initialize_bot_mode(&mut self, script: Self::BotScript);

    fn registry(&self) -> &BindingRegistry {
        self.core().tracker().registry()
    }

    fn is_allowed_for(&self, instrument: Instrument) -> bool {
        self.allowed_instruments().contains(&instrument)
    }

    /// Request a mode; it applies from the next tick.
    fn select_mode(&mut self, mode: Mode) {
        self.core_mut().select_mode(mode);
    }

    /// Mode of the most recent tick.
    fn mode(&self) -> Mode {
        self.core().dispatcher().active()
    }

    fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StrategyEvent) + 'static,
        Self: Sized,
    {
        self.core_mut().subscribers_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core_mut().subscribers_mut().unsubscribe(id)
    }

    /// Run one tick: sample `source`, then run the routine of the active
    /// mode. Returns the mode that ran.
    fn tick(&mut self, source: &dyn InputSource, song_time: f64) -> Result<Mode> {
        let mode = self.core_mut().begin_tick(source);
        ModeDispatcher::dispatch(mode, self, song_time)?;
        Ok(mode)
    }
}
