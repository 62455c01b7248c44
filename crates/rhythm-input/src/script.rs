/// Note scripts for bot playback.
///
/// A script is an ordered list of `(time, fret)` pairs, non-decreasing in
/// time. Ordering is checked once when the script is built; bot playback
/// relies on it without re-checking.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Number of fret lanes on the instrument.
pub const FRET_COUNT: usize = 5;
/// Serialized fret value of an open note.
pub const OPEN_FRET: i32 = 5;

/// Fret played by a script note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum NoteFret {
    /// Fret lane, `0..FRET_COUNT`.
    Lane(usize),
    /// Strum with no fret held.
    Open,
}

impl TryFrom<i32> for NoteFret {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            OPEN_FRET => Ok(NoteFret::Open),
            v if (0..FRET_COUNT as i32).contains(&v) => Ok(NoteFret::Lane(v as usize)),
            v => Err(InputError::InvalidFret(v)),
        }
    }
}

impl From<NoteFret> for i32 {
    fn from(fret: NoteFret) -> Self {
        match fret {
            NoteFret::Lane(i) => i as i32,
            NoteFret::Open => OPEN_FRET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Song time in seconds.
    pub time: f64,
    pub fret: NoteFret,
}

impl NoteEvent {
    pub fn new(time: f64, fret: NoteFret) -> Self {
        Self { time, fret }
    }

    pub fn lane(time: f64, lane: usize) -> Self {
        Self::new(time, NoteFret::Lane(lane))
    }

    pub fn open(time: f64) -> Self {
        Self::new(time, NoteFret::Open)
    }
}

/// Validated, time-ordered note script.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct NoteScript {
    notes: Vec<NoteEvent>,
}

impl NoteScript {
    /// Build a script, rejecting non-finite, negative or decreasing times
    /// and out-of-range lanes.
    pub fn new(notes: Vec<NoteEvent>) -> Result<Self, InputError> {
        let mut previous = 0.0;
        for (index, note) in notes.iter().enumerate() {
            if !note.time.is_finite() || note.time < 0.0 {
                return Err(InputError::InvalidNoteTime {
                    index,
                    time: note.time,
                });
            }
            if note.time < previous {
                return Err(InputError::UnsortedScript {
                    index,
                    time: note.time,
                    previous,
                });
            }
            match note.fret {
                NoteFret::Lane(lane) if lane >= FRET_COUNT => {
                    return Err(InputError::InvalidFret(lane as i32));
                }
                _ => {}
            }
            previous = note.time;
        }
        Ok(Self { notes })
    }

    /// Parse a script from JSON (`[{"time": 0.5, "fret": 2}, ...]`).
    pub fn from_json(json: &str) -> Result<Self> {
        let notes: Vec<NoteEvent> = serde_json::from_str(json).context("Invalid note script")?;
        Ok(Self::new(notes)?)
    }

    /// Load a script from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read note script: {}", path.display()))?;
        let script = Self::from_json(&content)
            .with_context(|| format!("Failed to load note script: {}", path.display()))?;
        log::debug!(
            "Loaded note script {} ({} notes)",
            path.display(),
            script.len()
        );
        Ok(script)
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&NoteEvent> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Time of the last note, if any.
    pub fn end_time(&self) -> Option<f64> {
        self.notes.last().map(|n| n.time)
    }
}
