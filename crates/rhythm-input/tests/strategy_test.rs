// Tick-level behaviour of the five-fret strategy across all three modes.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use rhythm_input::keys::{BLUE, GREEN, ORANGE, PAUSE, RED, STAR_POWER, TILT, UP, WHAMMY, YELLOW};
use rhythm_input::{
    InputStrategy, KeysStrategy, ManualClock, MenuAction, Mode, NavigationEvent, NavigationRepeater,
    NoInput, NoteEvent, NoteScript, SongClock, StrategyConfig, StrategyEvent, VirtualInputSource,
};

type EventLog = Rc<RefCell<Vec<StrategyEvent>>>;

fn strategy() -> (KeysStrategy, EventLog) {
    let mut strategy = KeysStrategy::new(StrategyConfig::default()).unwrap();
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    strategy.subscribe(move |e| sink.borrow_mut().push(*e));
    (strategy, log)
}

fn take(log: &EventLog) -> Vec<StrategyEvent> {
    std::mem::take(&mut *log.borrow_mut())
}

fn release_pass() -> Vec<StrategyEvent> {
    (0..5)
        .map(|fret| StrategyEvent::FretChanged {
            pressed: false,
            fret,
        })
        .collect()
}

fn press(fret: usize) -> StrategyEvent {
    StrategyEvent::FretChanged {
        pressed: true,
        fret,
    }
}

fn is_navigation(event: &StrategyEvent) -> bool {
    matches!(event, StrategyEvent::Navigation(_) | StrategyEvent::Pause)
}

#[test]
fn chord_batching_in_bot_mode() {
    let (mut s, log) = strategy();
    s.initialize_bot_mode(
        NoteScript::new(vec![
            NoteEvent::lane(0.0, 0),
            NoteEvent::lane(0.0, 2),
            NoteEvent::lane(0.0, 4),
        ])
        .unwrap(),
    );
    s.select_mode(Mode::Bot);
    s.tick(&NoInput, 0.0).unwrap();

    let mut expected = release_pass();
    expected.extend([
        press(0),
        StrategyEvent::Strummed,
        press(2),
        StrategyEvent::Strummed,
        press(4),
        StrategyEvent::Strummed,
        StrategyEvent::StarPowerActivated,
    ]);
    assert_eq!(take(&log), expected);
}

#[test]
fn open_note_in_bot_mode() {
    let (mut s, log) = strategy();
    s.initialize_bot_mode(NoteScript::from_json(r#"[{"time": 1.0, "fret": 5}]"#).unwrap());
    s.select_mode(Mode::Bot);
    s.tick(&NoInput, 1.0).unwrap();

    let mut expected = release_pass();
    expected.extend([StrategyEvent::Strummed, StrategyEvent::StarPowerActivated]);
    assert_eq!(take(&log), expected);
}

#[test]
fn bot_without_script_is_silent() {
    let (mut s, log) = strategy();
    s.select_mode(Mode::Bot);
    for t in [0.0, 1.0, 2.0] {
        assert_eq!(s.tick(&NoInput, t).unwrap(), Mode::Bot);
    }
    assert!(take(&log).is_empty());
}

#[test]
fn bot_follows_a_song_clock() {
    let (mut s, log) = strategy();
    s.initialize_bot_mode(
        NoteScript::new(vec![
            NoteEvent::lane(0.1, 0),
            NoteEvent::lane(0.3, 1),
            NoteEvent::open(0.3),
        ])
        .unwrap(),
    );
    s.select_mode(Mode::Bot);

    let clock = ManualClock::new();
    let mut strums = 0;
    for _ in 0..10 {
        clock.advance(0.05);
        s.tick(&NoInput, clock.song_time()).unwrap();
        let events = take(&log);
        assert_eq!(events.last(), Some(&StrategyEvent::StarPowerActivated));
        strums += events
            .iter()
            .filter(|e| **e == StrategyEvent::Strummed)
            .count();
    }
    assert_eq!(strums, 3);
    assert!(s.bot().is_exhausted());
}

#[test]
fn mode_switch_keeps_cursor() {
    let (mut s, log) = strategy();
    s.initialize_bot_mode(
        NoteScript::new(vec![NoteEvent::lane(0.0, 0), NoteEvent::lane(1.0, 1)]).unwrap(),
    );
    s.select_mode(Mode::Bot);
    s.tick(&NoInput, 0.0).unwrap();
    assert_eq!(s.bot().cursor(), 1);

    s.select_mode(Mode::Navigation);
    s.tick(&NoInput, 0.5).unwrap();
    s.select_mode(Mode::Bot);
    s.tick(&NoInput, 1.0).unwrap();
    assert_eq!(s.bot().cursor(), 2);

    let events = take(&log);
    assert!(events.contains(&press(1)));
    assert!(!events.iter().any(is_navigation));
}

#[test]
fn selection_applies_from_next_tick() {
    let (mut s, _) = strategy();
    assert_eq!(s.tick(&NoInput, 0.0).unwrap(), Mode::Player);
    s.select_mode(Mode::Navigation);
    assert_eq!(s.mode(), Mode::Player);
    assert_eq!(s.tick(&NoInput, 0.0).unwrap(), Mode::Navigation);
    assert_eq!(s.mode(), Mode::Navigation);
}

#[test]
fn player_mode_full_tick() {
    let (mut s, log) = strategy();
    let mut src = VirtualInputSource::new();
    src.press(GREEN);
    src.press(ORANGE);
    src.press(TILT);
    src.set_axis(WHAMMY, 0.5);
    s.tick(&src, 0.0).unwrap();
    assert_eq!(
        take(&log),
        vec![
            press(0),
            StrategyEvent::Strummed,
            press(4),
            StrategyEvent::Strummed,
            StrategyEvent::WhammyChanged { delta: 0.5 },
            StrategyEvent::StarPowerActivated,
        ]
    );

    src.release(GREEN);
    src.set_axis(WHAMMY, 0.5);
    s.tick(&src, 0.0).unwrap();
    assert_eq!(
        take(&log),
        vec![StrategyEvent::FretChanged {
            pressed: false,
            fret: 0
        }]
    );
}

#[test]
fn input_held_across_mode_switch_does_not_edge() {
    let (mut s, log) = strategy();
    let mut src = VirtualInputSource::new();
    src.press(RED);
    s.select_mode(Mode::Navigation);
    s.tick(&src, 0.0).unwrap();
    assert_eq!(
        take(&log),
        vec![StrategyEvent::Navigation(NavigationEvent::Fired(
            MenuAction::Back
        ))]
    );

    // Still held when gameplay starts: sampling continued, so no new press
    s.select_mode(Mode::Player);
    s.tick(&src, 0.0).unwrap();
    assert!(take(&log).is_empty());
}

#[test]
fn navigation_full_table() {
    let (mut s, log) = strategy();
    s.select_mode(Mode::Navigation);
    let mut src = VirtualInputSource::new();
    for name in [GREEN, RED, YELLOW, BLUE, ORANGE, UP, STAR_POWER, PAUSE] {
        src.press(name);
    }
    s.tick(&src, 0.0).unwrap();
    use NavigationEvent::*;
    assert_eq!(
        take(&log),
        vec![
            StrategyEvent::Navigation(Fired(MenuAction::Confirm)),
            StrategyEvent::Navigation(Fired(MenuAction::Back)),
            StrategyEvent::Navigation(Fired(MenuAction::Shortcut1)),
            StrategyEvent::Navigation(Fired(MenuAction::Shortcut2)),
            StrategyEvent::Navigation(Fired(MenuAction::Shortcut3)),
            StrategyEvent::Navigation(HoldStarted(MenuAction::Shortcut3)),
            StrategyEvent::Navigation(Fired(MenuAction::Up)),
            StrategyEvent::Navigation(HoldStarted(MenuAction::Up)),
            StrategyEvent::Navigation(Fired(MenuAction::More)),
            StrategyEvent::Pause,
        ]
    );

    src.clear();
    s.tick(&src, 0.0).unwrap();
    assert_eq!(
        take(&log),
        vec![
            StrategyEvent::Navigation(HoldEnded(MenuAction::Shortcut3)),
            StrategyEvent::Navigation(HoldEnded(MenuAction::Up)),
        ]
    );
}

#[test]
fn navigation_repeat_driven_by_host() {
    let (mut s, log) = strategy();
    s.select_mode(Mode::Navigation);
    let mut repeater = NavigationRepeater::new(s.config().navigation);
    let mut src = VirtualInputSource::new();
    src.press(UP);

    let mut repeats = Vec::new();
    let mut now = 0.0;
    while now < 1.0 {
        s.tick(&src, 0.0).unwrap();
        for event in take(&log) {
            repeater.observe(&event, now);
        }
        repeater.poll(now, &mut repeats);
        now += 0.05;
    }
    // delay 0.5s then every 0.1s: fires near 0.5, 0.6, 0.7, 0.8, 0.9
    assert!((4..=5).contains(&repeats.len()), "got {}", repeats.len());
    assert!(
        repeats
            .iter()
            .all(|e| *e == StrategyEvent::Navigation(NavigationEvent::Repeated(MenuAction::Up)))
    );
}

#[test]
fn unsubscribed_listener_sees_nothing() {
    let (mut s, log) = strategy();
    let extra = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&extra);
    let id = s.subscribe(move |_| *counter.borrow_mut() += 1);
    assert!(s.unsubscribe(id));

    let mut src = VirtualInputSource::new();
    src.press(BLUE);
    s.tick(&src, 0.0).unwrap();
    assert_eq!(*extra.borrow(), 0);
    assert_eq!(take(&log).len(), 2);
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Player), Just(Mode::Bot), Just(Mode::Navigation)]
}

proptest! {
    #[test]
    fn modes_never_mix(
        steps in proptest::collection::vec(
            (mode_strategy(), proptest::collection::vec(any::<bool>(), 11), -1.0f32..=1.0),
            1..40,
        )
    ) {
        let (mut s, log) = strategy();
        s.initialize_bot_mode(
            NoteScript::new((0..20).map(|i| NoteEvent::lane(i as f64 * 0.1, i % 5)).collect())
                .unwrap(),
        );
        let names: Vec<&str> = s.registry().iter().map(|b| b.name).collect();
        let mut src = VirtualInputSource::new();
        let mut time = 0.0;

        for (mode, pressed, whammy) in steps {
            src.clear();
            for (name, down) in names.iter().zip(pressed) {
                if down {
                    src.press(name);
                }
            }
            src.set_axis(WHAMMY, whammy);
            s.select_mode(mode);
            time += 0.07;
            let ran = s.tick(&src, time).unwrap();
            prop_assert_eq!(ran, mode);

            let events = take(&log);
            match mode {
                Mode::Navigation => prop_assert!(events.iter().all(is_navigation)),
                Mode::Bot => {
                    prop_assert!(!events.iter().any(is_navigation));
                    prop_assert!(!events.iter().any(|e| matches!(e, StrategyEvent::WhammyChanged { .. })), "bot mode emitted WhammyChanged");
                    prop_assert_eq!(events.last(), Some(&StrategyEvent::StarPowerActivated));
                }
                Mode::Player => prop_assert!(!events.iter().any(is_navigation)),
            }
        }
    }

    #[test]
    fn cursor_is_monotonic(
        times in proptest::collection::vec(0.0f64..10.0, 0..30),
        deltas in proptest::collection::vec(0.0f64..1.0, 1..40),
    ) {
        let mut sorted = times;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let notes: Vec<_> = sorted.iter().enumerate().map(|(i, &t)| NoteEvent::lane(t, i % 5)).collect();
        let count = notes.len();

        let (mut s, log) = strategy();
        s.initialize_bot_mode(NoteScript::new(notes).unwrap());
        s.select_mode(Mode::Bot);

        let mut time = 0.0;
        let mut last_cursor = 0;
        let mut strums = 0;
        for d in deltas {
            time += d;
            s.tick(&NoInput, time).unwrap();
            let cursor = s.bot().cursor();
            prop_assert!(cursor >= last_cursor);
            prop_assert!(cursor <= count);
            let events = take(&log);
            let tick_strums = events.iter().filter(|e| **e == StrategyEvent::Strummed).count();
            prop_assert_eq!(tick_strums, cursor - last_cursor);
            strums += tick_strums;
            last_cursor = cursor;
        }
        // every note due by the final time played exactly once
        let due = sorted.iter().filter(|&&t| t <= time).count();
        prop_assert_eq!(strums, due);
    }
}
