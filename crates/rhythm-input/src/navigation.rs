/// Menu navigation: action edges to menu commands, plus hold-repeat.
use std::collections::HashSet;

use crate::action_state::ActionStateTracker;
use crate::config::NavigationConfig;
use crate::error::{InputError, Result};
use crate::event::{EventSink, MenuAction, NavigationEvent, StrategyEvent};

/// What a navigation binding drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Fires once per press.
    Momentary(MenuAction),
    /// Fires on press, then repeats while held.
    Holdable(MenuAction),
    /// Global pause, fires once per press.
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationBinding {
    pub action: &'static str,
    pub command: NavCommand,
}

impl NavigationBinding {
    pub const fn momentary(action: &'static str, menu: MenuAction) -> Self {
        Self {
            action,
            command: NavCommand::Momentary(menu),
        }
    }

    pub const fn holdable(action: &'static str, menu: MenuAction) -> Self {
        Self {
            action,
            command: NavCommand::Holdable(menu),
        }
    }

    pub const fn pause(action: &'static str) -> Self {
        Self {
            action,
            command: NavCommand::Pause,
        }
    }
}

/// Action → command table. Each action drives exactly one command.
#[derive(Debug, Clone)]
pub struct NavigationMap {
    bindings: Vec<NavigationBinding>,
}

impl NavigationMap {
    pub fn new(bindings: Vec<NavigationBinding>) -> Result<Self> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if !seen.insert(binding.action) {
                return Err(InputError::DuplicateBinding(binding.action.to_string()));
            }
        }
        Ok(Self { bindings })
    }

    pub fn bindings(&self) -> &[NavigationBinding] {
        &self.bindings
    }

    /// Command driven by `action`, if any.
    pub fn command_for(&self, action: &str) -> Option<NavCommand> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.command)
    }

    /// Emit this tick's navigation events in table order.
    pub fn translate(&self, tracker: &ActionStateTracker, sink: &mut dyn EventSink) -> Result<()> {
        for binding in &self.bindings {
            let pressed = tracker.was_pressed(binding.action)?;
            match binding.command {
                NavCommand::Momentary(menu) => {
                    if pressed {
                        sink.emit(StrategyEvent::Navigation(NavigationEvent::Fired(menu)));
                    }
                }
                NavCommand::Holdable(menu) => {
                    if pressed {
                        sink.emit(StrategyEvent::Navigation(NavigationEvent::Fired(menu)));
                        sink.emit(StrategyEvent::Navigation(NavigationEvent::HoldStarted(
                            menu,
                        )));
                    } else if tracker.was_released(binding.action)? {
                        sink.emit(StrategyEvent::Navigation(NavigationEvent::HoldEnded(menu)));
                    }
                }
                NavCommand::Pause => {
                    if pressed {
                        sink.emit(StrategyEvent::Pause);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Host-side repeat timer for holdable commands.
///
/// Feed it the strategy's events with [`observe`](Self::observe) and call
/// [`poll`](Self::poll) once per frame to get repeat fires.
#[derive(Debug, Clone)]
pub struct NavigationRepeater {
    config: NavigationConfig,
    held: Vec<(MenuAction, f64)>,
}

impl NavigationRepeater {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            held: Vec::new(),
        }
    }

    pub fn observe(&mut self, event: &StrategyEvent, now: f64) {
        match event {
            StrategyEvent::Navigation(NavigationEvent::HoldStarted(menu)) => {
                self.held.retain(|(m, _)| m != menu);
                self.held.push((*menu, now + self.config.repeat_delay));
            }
            StrategyEvent::Navigation(NavigationEvent::HoldEnded(menu)) => {
                self.held.retain(|(m, _)| m != menu);
            }
            _ => {}
        }
    }

    /// Repeat fires due at `now`, at most one per held command.
    pub fn poll(&mut self, now: f64, sink: &mut dyn EventSink) {
        let interval = self.config.repeat_interval;
        for (menu, next) in &mut self.held {
            if *next <= now {
                sink.emit(StrategyEvent::Navigation(NavigationEvent::Repeated(*menu)));
                *next += interval;
                if *next <= now {
                    *next = now + interval;
                }
            }
        }
    }

    pub fn is_holding(&self, menu: MenuAction) -> bool {
        self.held.iter().any(|(m, _)| *m == menu)
    }

    /// Forget every held command.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{BindingDescriptor, BindingRegistry};
    use crate::source::VirtualInputSource;

    fn map() -> NavigationMap {
        NavigationMap::new(vec![
            NavigationBinding::momentary("a", MenuAction::Confirm),
            NavigationBinding::holdable("up", MenuAction::Up),
            NavigationBinding::pause("start"),
        ])
        .unwrap()
    }

    fn tracker() -> ActionStateTracker {
        ActionStateTracker::new(
            BindingRegistry::new(vec![
                BindingDescriptor::digital("a", "A"),
                BindingDescriptor::digital("up", "Up"),
                BindingDescriptor::digital("start", "Start"),
            ])
            .unwrap(),
        )
    }

    fn run(t: &mut ActionStateTracker, src: &VirtualInputSource) -> Vec<StrategyEvent> {
        t.sample_all(src);
        let mut events = Vec::new();
        map().translate(t, &mut events).unwrap();
        events
    }

    #[test]
    fn duplicate_action_rejected() {
        let err = NavigationMap::new(vec![
            NavigationBinding::momentary("a", MenuAction::Confirm),
            NavigationBinding::momentary("a", MenuAction::Back),
        ])
        .unwrap_err();
        assert_eq!(err, InputError::DuplicateBinding("a".to_string()));
    }

    #[test]
    fn command_lookup() {
        let m = map();
        assert_eq!(
            m.command_for("up"),
            Some(NavCommand::Holdable(MenuAction::Up))
        );
        assert_eq!(m.command_for("start"), Some(NavCommand::Pause));
        assert_eq!(m.command_for("b"), None);
    }

    #[test]
    fn momentary_fires_once_per_press() {
        let mut t = tracker();
        let mut src = VirtualInputSource::new();
        src.press("a");
        assert_eq!(
            run(&mut t, &src),
            vec![StrategyEvent::Navigation(NavigationEvent::Fired(
                MenuAction::Confirm
            ))]
        );
        assert!(run(&mut t, &src).is_empty());
        src.release("a");
        assert!(run(&mut t, &src).is_empty());
    }

    #[test]
    fn holdable_brackets_the_hold() {
        let mut t = tracker();
        let mut src = VirtualInputSource::new();
        src.press("up");
        assert_eq!(
            run(&mut t, &src),
            vec![
                StrategyEvent::Navigation(NavigationEvent::Fired(MenuAction::Up)),
                StrategyEvent::Navigation(NavigationEvent::HoldStarted(MenuAction::Up)),
            ]
        );
        assert!(run(&mut t, &src).is_empty());
        src.release("up");
        assert_eq!(
            run(&mut t, &src),
            vec![StrategyEvent::Navigation(NavigationEvent::HoldEnded(
                MenuAction::Up
            ))]
        );
    }

    #[test]
    fn pause_on_press() {
        let mut t = tracker();
        let mut src = VirtualInputSource::new();
        src.press("start");
        assert_eq!(run(&mut t, &src), vec![StrategyEvent::Pause]);
    }

    #[test]
    fn repeater_follows_cadence() {
        let mut rep = NavigationRepeater::new(NavigationConfig {
            repeat_delay: 0.5,
            repeat_interval: 0.1,
        });
        rep.observe(
            &StrategyEvent::Navigation(NavigationEvent::HoldStarted(MenuAction::Down)),
            0.0,
        );
        assert!(rep.is_holding(MenuAction::Down));

        let mut fires = Vec::new();
        rep.poll(0.4, &mut fires);
        assert!(fires.is_empty());
        rep.poll(0.5, &mut fires);
        rep.poll(0.55, &mut fires);
        rep.poll(0.65, &mut fires);
        assert_eq!(
            fires,
            vec![
                StrategyEvent::Navigation(NavigationEvent::Repeated(MenuAction::Down)),
                StrategyEvent::Navigation(NavigationEvent::Repeated(MenuAction::Down)),
            ]
        );

        rep.observe(
            &StrategyEvent::Navigation(NavigationEvent::HoldEnded(MenuAction::Down)),
            0.7,
        );
        fires.clear();
        rep.poll(2.0, &mut fires);
        assert!(fires.is_empty());
    }

    #[test]
    fn repeater_does_not_burst_after_a_stall() {
        let mut rep = NavigationRepeater::new(NavigationConfig {
            repeat_delay: 0.0,
            repeat_interval: 0.1,
        });
        rep.observe(
            &StrategyEvent::Navigation(NavigationEvent::HoldStarted(MenuAction::Up)),
            0.0,
        );
        let mut fires = Vec::new();
        rep.poll(5.0, &mut fires);
        assert_eq!(fires.len(), 1);
        rep.poll(5.05, &mut fires);
        assert_eq!(fires.len(), 1);
        rep.clear();
        assert!(!rep.is_holding(MenuAction::Up));
    }
}
