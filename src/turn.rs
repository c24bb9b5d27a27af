//! One scripted exchange: the player's outgoing message as a note track, the raw
//! tap history, and the accuracy score.
//!
//! The per-note judgement only colours the sheet. The official score rescans the
//! raw tap history against the canonical message, so a mistimed but correct
//! sequence still scores.

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::judge::{self, HitWindow, Judgement};
use crate::morse::{self, Symbol};
use crate::scenario::Turn;
use crate::track::Track;

/// Accuracy of `input` against `canonical` in percent. Only the common prefix
/// length is compared, but the denominator is always the full message so
/// stopping early never helps.
pub fn score(canonical: &str, input: &str) -> u8 {
    let total = canonical.chars().count();
    if total == 0 {
        return 0;
    }
    let matches = canonical
        .chars()
        .zip(input.chars())
        .filter(|(a, b)| a == b)
        .count();
    (100.0 * matches as f64 / total as f64).round() as u8
}

/// Live state of the turn being played.
#[derive(Debug)]
pub struct TurnPlay {
    turn: &'static Turn,
    track: Track,
    window: HitWindow,
    tolerance_ratio: f64,
    input: String,
    scrolling: bool,
    completed: bool,
}

impl TurnPlay {
    pub fn start(turn: &'static Turn, track_width: f64, cfg: &GameConfig) -> Self {
        let encoded = morse::encode(turn.send);
        Self {
            turn,
            track: Track::build(&encoded, track_width, cfg.note_pitch),
            window: HitWindow::new(track_width, cfg.tolerance_ratio),
            tolerance_ratio: cfg.tolerance_ratio,
            input: String::new(),
            scrolling: true,
            completed: false,
        }
    }

    pub fn turn(&self) -> &'static Turn {
        self.turn
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn window(&self) -> HitWindow {
        self.window
    }

    /// Raw tap history, independent of judging.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Record the tap, then judge it against the cursor note.
    pub fn record_tap(&mut self, symbol: Symbol) -> Result<Judgement> {
        if self.completed {
            return Err(GameError::TurnAlreadyComplete);
        }
        self.input.push(symbol.as_char());
        Ok(judge::judge(&mut self.track, symbol, &self.window))
    }

    /// One animation frame: scroll, then retire whatever fell behind the window.
    pub fn advance_frame(&mut self, step: f64) -> usize {
        if !self.scrolling {
            return 0;
        }
        self.track.tick(step);
        self.track.retire_expired(self.window.start)
    }

    /// The hit window only depends on the width, so resizes are the only update.
    pub fn resize(&mut self, track_width: f64) {
        self.window = HitWindow::new(track_width, self.tolerance_ratio);
    }

    pub fn stop_scrolling(&mut self) {
        self.scrolling = false;
    }

    pub fn score(&self) -> u8 {
        score(&morse::canonical(self.turn.send), &self.input)
    }

    /// Close the turn: freeze the sheet and return its score. A turn is scored once.
    pub fn complete(&mut self) -> Result<u8> {
        if self.completed {
            return Err(GameError::TurnAlreadyComplete);
        }
        self.stop_scrolling();
        self.completed = true;
        Ok(self.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Outcome;

    static SHORT: Turn = Turn {
        send: "E T",
        translation: "e t",
        receive: "K",
        receive_translation: "k",
    };

    #[test]
    fn test_score_examples() {
        assert_eq!(score("....-", "...."), 80);
        assert_eq!(score("-.-.", "-.-."), 100);
        assert_eq!(score("-.-.", ""), 0);
        assert_eq!(score("", "...."), 0);
        // extra taps past the end are ignored
        assert_eq!(score("..", "...---"), 100);
        assert_eq!(score("-.", ".-"), 0);
    }

    #[test]
    fn test_record_tap_always_buffers() {
        let cfg = GameConfig::default();
        let mut play = TurnPlay::start(&SHORT, 200.0, &cfg);
        // notes still off screen: nothing judged, but the tap is kept
        assert_eq!(play.record_tap(Symbol::Dot).unwrap(), Judgement::OutsideWindow);
        assert_eq!(play.input(), ".");
        assert_eq!(play.track().next_index(), 0);
    }

    #[test]
    fn test_frames_bring_note_into_window() {
        let cfg = GameConfig::default();
        // width 200 -> window [90, 110]; first note at 200
        let mut play = TurnPlay::start(&SHORT, 200.0, &cfg);
        for _ in 0..200 {
            play.advance_frame(0.5);
        }
        assert!((play.track().notes()[0].position - 100.0).abs() < 1e-9);
        let j = play.record_tap(Symbol::Dot).unwrap();
        assert_eq!(j, Judgement::Resolved { index: 0, outcome: Outcome::Correct });
    }

    #[test]
    fn test_unhandled_notes_get_skipped() {
        let cfg = GameConfig::default();
        let mut play = TurnPlay::start(&SHORT, 200.0, &cfg);
        let mut retired = 0;
        for _ in 0..1000 {
            retired += play.advance_frame(0.5);
        }
        assert_eq!(retired, 2);
        assert!(play.track().is_exhausted());
        assert_eq!(play.score(), 0);
    }

    #[test]
    fn test_complete_once_and_freeze() {
        let cfg = GameConfig::default();
        let mut play = TurnPlay::start(&SHORT, 200.0, &cfg);
        play.record_tap(Symbol::Dot).unwrap();
        play.record_tap(Symbol::Dash).unwrap();
        assert_eq!(play.complete().unwrap(), 100);
        assert_eq!(play.complete(), Err(GameError::TurnAlreadyComplete));
        assert_eq!(play.record_tap(Symbol::Dot), Err(GameError::TurnAlreadyComplete));
        let before = play.track().notes()[0].position;
        assert_eq!(play.advance_frame(0.5), 0);
        assert_eq!(play.track().notes()[0].position, before);
    }

    #[test]
    fn test_resize_moves_window() {
        let cfg = GameConfig::default();
        let mut play = TurnPlay::start(&SHORT, 200.0, &cfg);
        play.resize(400.0);
        assert_eq!(play.window(), HitWindow::new(400.0, 0.05));
    }
}
