/// Five-fret instrument strategy (guitar, bass, keys).
use crate::binding::{BindingDescriptor, BindingRegistry};
use crate::bot::BotPlayback;
use crate::config::StrategyConfig;
use crate::error::Result;
use crate::event::MenuAction;
use crate::mode::{Mode, ModeRoutines};
use crate::navigation::{NavigationBinding, NavigationMap};
use crate::player::{PlayerBindings, translate_player};
use crate::script::NoteScript;
use crate::strategy::{InputStrategy, Instrument, StrategyCore};

pub const GREEN: &str = "green";
pub const RED: &str = "red";
pub const YELLOW: &str = "yellow";
pub const BLUE: &str = "blue";
pub const ORANGE: &str = "orange";

pub const WHAMMY: &str = "whammy";

pub const UP: &str = "up";
pub const DOWN: &str = "down";

pub const STAR_POWER: &str = "star_power";
pub const TILT: &str = "tilt";
pub const PAUSE: &str = "pause";

const BINDINGS: [BindingDescriptor; 11] = [
    BindingDescriptor::digital(GREEN, "Green"),
    BindingDescriptor::digital(RED, "Red"),
    BindingDescriptor::digital(YELLOW, "Yellow"),
    BindingDescriptor::digital(BLUE, "Blue"),
    BindingDescriptor::digital(ORANGE, "Orange"),
    BindingDescriptor::continuous(WHAMMY, "Whammy"),
    BindingDescriptor::digital(UP, "Up"),
    BindingDescriptor::digital(DOWN, "Down"),
    BindingDescriptor::digital(STAR_POWER, "Star Power"),
    // a button, since PS2-era guitars have no tilt axis
    BindingDescriptor::digital(TILT, "Tilt"),
    BindingDescriptor::digital(PAUSE, "Pause"),
];

const PLAYER: PlayerBindings = PlayerBindings {
    frets: [GREEN, RED, YELLOW, BLUE, ORANGE],
    whammy: WHAMMY,
    star_power: STAR_POWER,
    tilt: TILT,
};

const NAVIGATION: [NavigationBinding; 9] = [
    NavigationBinding::momentary(GREEN, MenuAction::Confirm),
    NavigationBinding::momentary(RED, MenuAction::Back),
    NavigationBinding::momentary(YELLOW, MenuAction::Shortcut1),
    NavigationBinding::momentary(BLUE, MenuAction::Shortcut2),
    NavigationBinding::holdable(ORANGE, MenuAction::Shortcut3),
    NavigationBinding::holdable(UP, MenuAction::Up),
    NavigationBinding::holdable(DOWN, MenuAction::Down),
    NavigationBinding::momentary(STAR_POWER, MenuAction::More),
    NavigationBinding::pause(PAUSE),
];

const ALLOWED_INSTRUMENTS: [Instrument; 5] = [
    Instrument::Guitar,
    Instrument::Bass,
    Instrument::Keys,
    Instrument::GuitarCoop,
    Instrument::Rhythm,
];

#[derive(Debug)]
pub struct KeysStrategy {
    core: StrategyCore,
    bot: BotPlayback,
    navigation: NavigationMap,
    config: StrategyConfig,
}

impl KeysStrategy {
    pub fn new(config: StrategyConfig) -> Result<Self> {
        let registry = BindingRegistry::new(BINDINGS.to_vec())?;
        let navigation = NavigationMap::new(NAVIGATION.to_vec())?;
        Ok(Self {
            core: StrategyCore::new(registry, Mode::Player),
            bot: BotPlayback::new(),
            navigation,
            config,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn bot(&self) -> &BotPlayback {
        &self.bot
    }

    pub fn navigation(&self) -> &NavigationMap {
        &self.navigation
    }
}

impl ModeRoutines for KeysStrategy {
    fn update_player_mode(&mut self) -> Result<()> {
        let (tracker, sink) = self.core.split();
        translate_player(&PLAYER, tracker, self.config.whammy_tolerance, sink)
    }

    fn update_bot_mode(&mut self, song_time: f64) -> Result<()> {
        let (_, sink) = self.core.split();
        self.bot.tick(song_time, sink);
        Ok(())
    }

    fn update_navigation_mode(&mut self) -> Result<()> {
        let (tracker, sink) = self.core.split();
        self.navigation.translate(tracker, sink)
    }
}

impl InputStrategy for KeysStrategy {
    type BotScript = NoteScript;

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn icon_name(&self) -> &'static str {
        "keys"
    }

    fn allowed_instruments(&self) -> &'static [Instrument] {
        &ALLOWED_INSTRUMENTS
    }

    fn track_path(&self) -> &'static str {
        "Tracks/Keys"
    }

    fn initialize_bot_mode(&mut self, script: NoteScript) {
        self.bot.initialize(script);
    }
}
