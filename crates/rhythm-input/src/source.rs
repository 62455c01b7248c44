/// Raw input sources queried once per tick by the action state tracker.
///
/// Device polling lives outside this crate; a backend only has to answer
/// "what is the value of this action right now".
use std::collections::{HashMap, HashSet};

/// Platform abstraction for per-action input queries.
pub trait InputSource {
    /// Returns `true` if the digital action `name` is currently held.
    fn is_pressed(&self, name: &str) -> bool;

    /// Current value of the continuous action `name`.
    fn axis(&self, name: &str) -> f32;
}

/// Source with nothing connected: every button released, every axis at rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn is_pressed(&self, _name: &str) -> bool {
        false
    }

    fn axis(&self, _name: &str) -> f32 {
        0.0
    }
}

/// Virtual input source for testing and recorded-input replay.
#[derive(Debug, Clone, Default)]
pub struct VirtualInputSource {
    pressed: HashSet<String>,
    axes: HashMap<String, f32>,
}

impl VirtualInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, name: &str) {
        self.pressed.insert(name.to_string());
    }

    pub fn release(&mut self, name: &str) {
        self.pressed.remove(name);
    }

    pub fn set_axis(&mut self, name: &str, value: f32) {
        self.axes.insert(name.to_string(), value);
    }

    /// Release every button and rest every axis.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.axes.clear();
    }
}

impl InputSource for VirtualInputSource {
    fn is_pressed(&self, name: &str) -> bool {
        self.pressed.contains(name)
    }

    fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }
}
