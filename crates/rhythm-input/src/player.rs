/// Live-input translation for player mode.
use crate::action_state::ActionStateTracker;
use crate::error::Result;
use crate::event::{EventSink, StrategyEvent};
use crate::script::FRET_COUNT;

/// Binding names read by the player translator.
#[derive(Debug, Clone, Copy)]
pub struct PlayerBindings {
    /// Fret buttons, lowest lane first.
    pub frets: [&'static str; FRET_COUNT],
    pub whammy: &'static str,
    pub star_power: &'static str,
    /// Alternate star power trigger for controllers without a tilt axis.
    pub tilt: &'static str,
}

/// Translate this tick's edges and whammy movement into instrument events.
///
/// Frets are handled independently in lane order; a press yields a fret
/// change followed by a strum, a release yields only the fret change.
pub fn translate_player(
    bindings: &PlayerBindings,
    tracker: &ActionStateTracker,
    whammy_tolerance: f32,
    sink: &mut dyn EventSink,
) -> Result<()> {
    for (fret, name) in bindings.frets.iter().enumerate() {
        if tracker.was_pressed(name)? {
            sink.emit(StrategyEvent::FretChanged {
                pressed: true,
                fret,
            });
            sink.emit(StrategyEvent::Strummed);
        } else if tracker.was_released(name)? {
            sink.emit(StrategyEvent::FretChanged {
                pressed: false,
                fret,
            });
        }
    }

    let delta = tracker.value(bindings.whammy)? - tracker.previous_value(bindings.whammy)?;
    if delta.abs() >= whammy_tolerance && delta != 0.0 {
        sink.emit(StrategyEvent::WhammyChanged { delta });
    }

    if tracker.was_pressed(bindings.star_power)? || tracker.was_pressed(bindings.tilt)? {
        sink.emit(StrategyEvent::StarPowerActivated);
    }

    Ok(())
}
