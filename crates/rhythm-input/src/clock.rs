/// Abstraction over the song time used by bot playback.
/// Implementations: SystemSongClock (wall clock), ManualClock (testing, offline playback).
pub trait SongClock {
    /// Current song time in seconds. Never decreases between calls.
    fn song_time(&self) -> f64;
}

/// Song clock driven by `std::time::Instant`.
pub struct SystemSongClock {
    start: std::time::Instant,
}

impl SystemSongClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemSongClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SongClock for SystemSongClock {
    fn song_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-advanced song clock for deterministic playback.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: std::cell::Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `time`. Earlier times are ignored so the clock
    /// stays monotonic.
    pub fn set_time(&self, time: f64) {
        if time > self.current.get() {
            self.current.set(time);
        }
    }

    pub fn advance(&self, delta: f64) {
        self.set_time(self.current.get() + delta);
    }
}

impl SongClock for ManualClock {
    fn song_time(&self) -> f64 {
        self.current.get()
    }
}
