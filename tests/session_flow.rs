// End-to-end session tests (native). These drive the pure game core the same
// way the browser frame loop does, without any wasm/browser APIs.

use morse_radio::morse;
use morse_radio::session::{OPENING_PROMPT, average};
use morse_radio::{GameConfig, Judgement, Outcome, ResultTier, Session, SessionEvent, SessionState, Symbol};

const WIDTH: f64 = 400.0;

/// Tap the first `keep` symbols of the current turn's message.
fn tap_prefix(session: &mut Session, keep: usize) {
    let send = session.current_turn().unwrap().turn().send;
    let canonical = morse::canonical(send);
    for c in canonical.chars().take(keep) {
        session.record_tap(Symbol::from_char(c).unwrap());
    }
}

fn canonical_len(session: &Session) -> usize {
    morse::canonical(session.current_turn().unwrap().turn().send).len()
}

/// Run frames until the reply finishes and the session moves on.
fn finish_reply(session: &mut Session, mut now: f64) -> (SessionEvent, f64) {
    loop {
        now += 16.0;
        if let Some(event) = session.frame(now).event {
            return (event, now);
        }
        assert!(now < 1e8, "reply never finished");
    }
}

#[test]
fn full_scenario_scores_and_tier() {
    let mut session = Session::new(GameConfig::default());
    session.start("daily", WIDTH).unwrap();
    assert_eq!(session.state(), SessionState::Running { turn: 0 });
    assert_eq!(session.opponent_prompt(), OPENING_PROMPT);

    let mut now = 0.0;

    // Turn 1: perfect
    let len = canonical_len(&session);
    tap_prefix(&mut session, len);
    assert_eq!(session.complete_turn(now).unwrap().score, 100);
    let (event, t) = finish_reply(&mut session, now);
    now = t;
    assert_eq!(event, SessionEvent::TurnStarted(1));
    assert!((session.progress() - 1.0 / 3.0).abs() < 1e-9);

    // Turn 2: half of the message
    let len = canonical_len(&session);
    assert_eq!(len % 2, 0, "turn 2 canonical length should be even for an exact 50");
    tap_prefix(&mut session, len / 2);
    assert_eq!(session.complete_turn(now).unwrap().score, 50);
    let (event, t) = finish_reply(&mut session, now);
    now = t;
    assert_eq!(event, SessionEvent::TurnStarted(2));

    // Turn 3: nothing tapped
    assert_eq!(session.complete_turn(now).unwrap().score, 0);
    let (event, _) = finish_reply(&mut session, now);

    match event {
        SessionEvent::Finished(summary) => {
            assert_eq!(summary.scores, vec![100, 50, 0]);
            assert_eq!(summary.average, 50);
            assert_eq!(summary.tier, ResultTier::Good);
            assert_eq!(summary.tier.message(), "Good pace! Keep practicing.");
        }
        other => panic!("expected finish, got {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(session.progress(), 1.0);
    assert!(session.current_turn().is_none());
}

#[test]
fn early_taps_do_not_touch_the_track() {
    let mut session = Session::new(GameConfig::default());
    session.start("titanic", WIDTH).unwrap();
    for _ in 0..10 {
        assert_eq!(session.record_tap(Symbol::Dash), Judgement::OutsideWindow);
    }
    let play = session.current_turn().unwrap();
    assert_eq!(play.track().next_index(), 0);
    assert!(play.track().notes().iter().all(|n| !n.is_resolved()));
    // the taps still count as raw input
    assert_eq!(play.input(), "----------");
}

#[test]
fn cursor_is_monotonic_and_bounded() {
    let mut session = Session::new(GameConfig::default());
    session.start("daily", WIDTH).unwrap();
    let total = session.current_turn().unwrap().track().len();
    let mut last = 0;
    let mut now = 0.0;
    // mix frames and taps until the whole sheet has scrolled past
    for i in 0..20_000 {
        now += 16.0;
        session.frame(now);
        if i % 7 == 0 {
            let sym = if i % 2 == 0 { Symbol::Dot } else { Symbol::Dash };
            if let Judgement::Resolved { index, .. } = session.record_tap(sym) {
                assert!(index >= last);
            }
        }
        let idx = session.current_turn().unwrap().track().next_index();
        assert!(idx >= last);
        assert!(idx <= total);
        last = idx;
    }
    let track = session.current_turn().unwrap().track();
    assert!(track.is_exhausted());
    assert!(track.notes().iter().all(|n| n.outcome() != Outcome::Pending));
}

#[test]
fn session_average_matches_helper() {
    assert_eq!(average(&[80, 100, 60]), 80);
}

#[test]
fn unknown_scenario_fails_fast() {
    let mut session = Session::new(GameConfig::default());
    assert!(session.start("", WIDTH).is_err());
    assert_eq!(session.state(), SessionState::Idle);
}
