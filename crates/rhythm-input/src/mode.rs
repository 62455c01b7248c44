/// Mode selection and per-tick dispatch.
///
/// The host picks a mode at any time; the choice is latched at the next
/// tick boundary and exactly one update routine runs per tick.
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Live input drives instrument events.
    #[default]
    Player,
    /// A note script drives instrument events.
    Bot,
    /// Live input drives menu commands.
    Navigation,
}

/// One update routine per mode.
pub trait ModeRoutines {
    fn update_player_mode(&mut self) -> Result<()>;
    fn update_bot_mode(&mut self, song_time: f64) -> Result<()>;
    fn update_navigation_mode(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ModeDispatcher {
    active: Mode,
    requested: Mode,
    ticks: u64,
}

impl ModeDispatcher {
    pub fn new(initial: Mode) -> Self {
        Self {
            active: initial,
            requested: initial,
            ticks: 0,
        }
    }

    /// Request `mode`; takes effect at the next [`begin_tick`](Self::begin_tick).
    pub fn select(&mut self, mode: Mode) {
        self.requested = mode;
    }

    /// Mode of the current (or last) tick.
    pub fn active(&self) -> Mode {
        self.active
    }

    pub fn requested(&self) -> Mode {
        self.requested
    }

    /// Ticks started so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Latch the requested mode for the tick about to run.
    pub fn begin_tick(&mut self) -> Mode {
        if self.requested != self.active {
            log::debug!("Input mode {:?} -> {:?}", self.active, self.requested);
            self.active = self.requested;
        }
        self.ticks += 1;
        self.active
    }

    /// Run the single routine for `mode`.
    pub fn dispatch<R: ModeRoutines + ?Sized>(
        mode: Mode,
        routines: &mut R,
        song_time: f64,
    ) -> Result<()> {
        match mode {
            Mode::Player => routines.update_player_mode(),
            Mode::Bot => routines.update_bot_mode(song_time),
            Mode::Navigation => routines.update_navigation_mode(),
        }
    }
}

impl Default for ModeDispatcher {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        calls: Vec<(Mode, f64)>,
    }

    impl ModeRoutines for Counting {
        fn update_player_mode(&mut self) -> Result<()> {
            self.calls.push((Mode::Player, 0.0));
            Ok(())
        }

        fn update_bot_mode(&mut self, song_time: f64) -> Result<()> {
            self.calls.push((Mode::Bot, song_time));
            Ok(())
        }

        fn update_navigation_mode(&mut self) -> Result<()> {
            self.calls.push((Mode::Navigation, 0.0));
            Ok(())
        }
    }

    #[test]
    fn selection_latches_at_tick_boundary() {
        let mut d = ModeDispatcher::new(Mode::Player);
        d.select(Mode::Bot);
        assert_eq!(d.active(), Mode::Player);
        assert_eq!(d.requested(), Mode::Bot);
        assert_eq!(d.begin_tick(), Mode::Bot);
        assert_eq!(d.active(), Mode::Bot);
        assert_eq!(d.ticks(), 1);
    }

    #[test]
    fn exactly_one_routine_per_dispatch() {
        let mut routines = Counting::default();
        for mode in [Mode::Player, Mode::Bot, Mode::Navigation] {
            ModeDispatcher::dispatch(mode, &mut routines, 1.5).unwrap();
        }
        assert_eq!(
            routines.calls,
            vec![(Mode::Player, 0.0), (Mode::Bot, 1.5), (Mode::Navigation, 0.0)]
        );
    }

    #[test]
    fn mode_parses_lowercase() {
        let mode: Mode = serde_json::from_str(r#""navigation""#).unwrap();
        assert_eq!(mode, Mode::Navigation);
    }
}
