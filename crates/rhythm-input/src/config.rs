use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_WHAMMY_TOLERANCE: f32 = 1e-5;
const DEFAULT_REPEAT_DELAY: f64 = 0.5;
const DEFAULT_REPEAT_INTERVAL: f64 = 0.1;
const MIN_REPEAT_INTERVAL: f64 = 0.01;

/// Hold-repeat cadence for holdable navigation commands (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct NavigationConfig {
    /// Delay between the initial fire and the first repeat.
    pub repeat_delay: f64,
    /// Delay between subsequent repeats.
    pub repeat_interval: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct StrategyConfig {
    /// Smallest whammy movement, in axis units, that produces a whammy event.
    pub whammy_tolerance: f32,
    pub navigation: NavigationConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            whammy_tolerance: DEFAULT_WHAMMY_TOLERANCE,
            navigation: NavigationConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No strategy config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate();
        Ok(config)
    }

    /// Save configuration as pretty JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Clamp out-of-range values.
    pub fn validate(&mut self) {
        let tolerance = if self.whammy_tolerance.is_finite() {
            self.whammy_tolerance.clamp(0.0, 1.0)
        } else {
            DEFAULT_WHAMMY_TOLERANCE
        };
        if tolerance != self.whammy_tolerance {
            log::warn!(
                "whammyTolerance {} out of range, using {}",
                self.whammy_tolerance,
                tolerance
            );
            self.whammy_tolerance = tolerance;
        }

        let nav = &mut self.navigation;
        if !nav.repeat_delay.is_finite() || nav.repeat_delay < 0.0 {
            log::warn!("repeatDelay {} out of range, using default", nav.repeat_delay);
            nav.repeat_delay = DEFAULT_REPEAT_DELAY;
        }
        if !nav.repeat_interval.is_finite() {
            nav.repeat_interval = DEFAULT_REPEAT_INTERVAL;
        } else if nav.repeat_interval < MIN_REPEAT_INTERVAL {
            log::warn!(
                "repeatInterval {} below minimum, using {}",
                nav.repeat_interval,
                MIN_REPEAT_INTERVAL
            );
            nav.repeat_interval = MIN_REPEAT_INTERVAL;
        }
    }
}
