/// Per-action sampled state and edge detection.
///
/// Each tick the tracker samples every binding once, moving the old
/// `current` into `previous` first, so edges and deltas always compare two
/// consecutive ticks.
use crate::binding::{BindingKind, BindingRegistry};
use crate::error::{InputError, Result};
use crate::source::InputSource;

/// Lower bound of a continuous binding.
pub const AXIS_MIN: f32 = -1.0;
/// Upper bound of a continuous binding.
pub const AXIS_MAX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionValue {
    Digital(bool),
    Continuous(f32),
}

impl ActionValue {
    fn rest(kind: BindingKind) -> Self {
        match kind {
            BindingKind::Digital => ActionValue::Digital(false),
            BindingKind::Continuous => ActionValue::Continuous(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionState {
    pub current: ActionValue,
    pub previous: ActionValue,
}

impl ActionState {
    fn new(kind: BindingKind) -> Self {
        let rest = ActionValue::rest(kind);
        Self {
            current: rest,
            previous: rest,
        }
    }

    fn push(&mut self, value: ActionValue) {
        self.previous = self.current;
        self.current = value;
    }
}

/// Current/previous value table, one slot per registered binding.
#[derive(Debug, Clone)]
pub struct ActionStateTracker {
    registry: BindingRegistry,
    states: Vec<ActionState>,
}

impl ActionStateTracker {
    pub fn new(registry: BindingRegistry) -> Self {
        let states = registry.iter().map(|b| ActionState::new(b.kind)).collect();
        Self { registry, states }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Sample `name` from `source` and store it as the current value.
    pub fn sample(&mut self, name: &str, source: &dyn InputSource) -> Result<ActionValue> {
        let i = self.registry.index_of(name)?;
        let value = read(self.registry.kind(name)?, name, source);
        self.states[i].push(value);
        Ok(value)
    }

    /// Sample every registered binding once.
    pub fn sample_all(&mut self, source: &dyn InputSource) {
        for (binding, state) in self.registry.iter().zip(self.states.iter_mut()) {
            state.push(read(binding.kind, binding.name, source));
        }
    }

    /// Put every binding back at rest on both sides, so no edge is reported
    /// on the next sample for inputs that were already held.
    pub fn reset(&mut self) {
        for (binding, state) in self.registry.iter().zip(self.states.iter_mut()) {
            *state = ActionState::new(binding.kind);
        }
    }

    pub fn state(&self, name: &str) -> Result<ActionState> {
        let i = self.registry.index_of(name)?;
        Ok(self.states[i])
    }

    /// `true` on the tick a digital binding goes from released to held.
    pub fn was_pressed(&self, name: &str) -> Result<bool> {
        let (current, previous) = self.digital(name)?;
        Ok(current && !previous)
    }

    /// `true` on the tick a digital binding goes from held to released.
    pub fn was_released(&self, name: &str) -> Result<bool> {
        let (current, previous) = self.digital(name)?;
        Ok(!current && previous)
    }

    pub fn is_held(&self, name: &str) -> Result<bool> {
        self.digital(name).map(|(current, _)| current)
    }

    pub fn value(&self, name: &str) -> Result<f32> {
        self.continuous(name).map(|(current, _)| current)
    }

    pub fn previous_value(&self, name: &str) -> Result<f32> {
        self.continuous(name).map(|(_, previous)| previous)
    }

    fn digital(&self, name: &str) -> Result<(bool, bool)> {
        match self.state(name)? {
            ActionState {
                current: ActionValue::Digital(current),
                previous: ActionValue::Digital(previous),
            } => Ok((current, previous)),
            _ => Err(mismatch(name, BindingKind::Digital)),
        }
    }

    fn continuous(&self, name: &str) -> Result<(f32, f32)> {
        match self.state(name)? {
            ActionState {
                current: ActionValue::Continuous(current),
                previous: ActionValue::Continuous(previous),
            } => Ok((current, previous)),
            _ => Err(mismatch(name, BindingKind::Continuous)),
        }
    }
}

fn read(kind: BindingKind, name: &str, source: &dyn InputSource) -> ActionValue {
    match kind {
        BindingKind::Digital => ActionValue::Digital(source.is_pressed(name)),
        BindingKind::Continuous => {
            let raw = source.axis(name);
            // NaN from a misbehaving backend reads as rest
            let value = if raw.is_nan() {
                0.0
            } else {
                raw.clamp(AXIS_MIN, AXIS_MAX)
            };
            ActionValue::Continuous(value)
        }
    }
}

fn mismatch(name: &str, expected: BindingKind) -> InputError {
    let actual = match expected {
        BindingKind::Digital => BindingKind::Continuous,
        BindingKind::Continuous => BindingKind::Digital,
    };
    InputError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual,
    }
}
