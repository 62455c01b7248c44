// Recorded input frames for the `replay` command.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rhythm_input::{Mode, VirtualInputSource};
use serde::Deserialize;

/// Input held during one tick.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputFrame {
    /// Song time of the tick, in seconds.
    pub time: f64,
    pub mode: Mode,
    /// Digital actions held this tick.
    pub pressed: Vec<String>,
    /// Continuous action values this tick.
    pub axes: HashMap<String, f32>,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            time: 0.0,
            mode: Mode::Player,
            pressed: Vec::new(),
            axes: HashMap::new(),
        }
    }
}

impl InputFrame {
    /// Load the state of `source` for this frame.
    pub fn apply(&self, source: &mut VirtualInputSource) {
        source.clear();
        for name in &self.pressed {
            source.press(name);
        }
        for (name, value) in &self.axes {
            source.set_axis(name, *value);
        }
    }
}

pub fn parse_frames(json: &str) -> Result<Vec<InputFrame>> {
    let frames: Vec<InputFrame> = serde_json::from_str(json).context("Invalid input frames")?;
    for (i, pair) in frames.windows(2).enumerate() {
        if pair[1].time < pair[0].time {
            bail!(
                "Frame {} at {}s is earlier than frame {} at {}s",
                i + 1,
                pair[1].time,
                i,
                pair[0].time
            );
        }
    }
    Ok(frames)
}

pub fn load_frames(path: &Path) -> Result<Vec<InputFrame>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input frames: {}", path.display()))?;
    parse_frames(&content).with_context(|| format!("Failed to load input frames: {}", path.display()))
}
