/// Scripted playback for bot mode.
///
/// Replays a note script against song time, producing the same events live
/// input would. Notes that become due on the same tick form one chord: all
/// frets are released once, then each note presses its fret and strums.
use crate::event::{EventSink, StrategyEvent};
use crate::script::{FRET_COUNT, NoteFret, NoteScript};

#[derive(Debug, Clone, Default)]
pub struct BotPlayback {
    script: Option<NoteScript>,
    cursor: usize,
}

impl BotPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `script` and rewind the cursor.
    pub fn initialize(&mut self, script: NoteScript) {
        log::debug!("Bot playback initialized with {} notes", script.len());
        self.script = Some(script);
        self.cursor = 0;
    }

    /// Drop the script; later ticks are no-ops.
    pub fn clear(&mut self) {
        self.script = None;
        self.cursor = 0;
    }

    pub fn script(&self) -> Option<&NoteScript> {
        self.script.as_ref()
    }

    /// Index of the next note to play.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `true` once every note has been played (or no script is loaded).
    pub fn is_exhausted(&self) -> bool {
        self.script
            .as_ref()
            .is_none_or(|s| self.cursor >= s.len())
    }

    /// Play every note due at `song_time`. Returns the number of notes
    /// consumed.
    pub fn tick(&mut self, song_time: f64, sink: &mut dyn EventSink) -> usize {
        let Some(script) = &self.script else {
            return 0;
        };

        let start = self.cursor;
        while let Some(note) = script.get(self.cursor) {
            if note.time > song_time {
                break;
            }
            if self.cursor == start {
                for fret in 0..FRET_COUNT {
                    sink.emit(StrategyEvent::FretChanged {
                        pressed: false,
                        fret,
                    });
                }
            }
            self.cursor += 1;

            if let NoteFret::Lane(fret) = note.fret {
                sink.emit(StrategyEvent::FretChanged {
                    pressed: true,
                    fret,
                });
            }
            sink.emit(StrategyEvent::Strummed);
        }

        // Star power is held on for the whole run
        sink.emit(StrategyEvent::StarPowerActivated);

        let consumed = self.cursor - start;
        if consumed > 1 {
            log::trace!("Bot chord of {consumed} notes at {song_time:.3}s");
        }
        consumed
    }
}
