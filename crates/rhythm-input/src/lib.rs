// Instrument input strategies: live input, scripted bot playback and menu navigation

pub mod action_state;
pub mod binding;
pub mod bot;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod mode;
pub mod navigation;
pub mod player;
pub mod script;
pub mod source;
pub mod strategy;

pub use action_state::{ActionState, ActionStateTracker, ActionValue};
pub use binding::{BindingDescriptor, BindingKind, BindingRegistry};
pub use bot::BotPlayback;
pub use clock::{ManualClock, SongClock, SystemSongClock};
pub use config::{NavigationConfig, StrategyConfig};
pub use error::InputError;
pub use event::{EventSink, MenuAction, NavigationEvent, StrategyEvent, SubscriptionId, Subscribers};
pub use keys::KeysStrategy;
pub use mode::{Mode, ModeDispatcher, ModeRoutines};
pub use navigation::{NavCommand, NavigationBinding, NavigationMap, NavigationRepeater};
pub use player::PlayerBindings;
pub use script::{NoteEvent, NoteFret, NoteScript};
pub use source::{InputSource, NoInput, VirtualInputSource};
pub use strategy::{InputStrategy, Instrument, StrategyCore};
