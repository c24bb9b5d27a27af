//! Hit judge: the stationary window in the middle of the track and tap
//! evaluation against the cursor note.
//!
//! Boundary policy: the window is inclusive at both ends, and retirement only
//! fires once a note is strictly left of `start`. A note is always either
//! judgeable or retirable, never both.

use crate::morse::Symbol;
use crate::track::{Outcome, Track};

/// Half-width of the window as a fraction of track width.
pub const DEFAULT_TOLERANCE_RATIO: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HitWindow {
    pub start: f64,
    pub end: f64,
}

impl HitWindow {
    /// Window centred on the track with `track_width * tolerance_ratio` on each side.
    pub fn new(track_width: f64, tolerance_ratio: f64) -> Self {
        let center = track_width / 2.0;
        let delta = track_width * tolerance_ratio;
        Self {
            start: center - delta,
            end: center + delta,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position <= self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// What a single tap did to the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Judgement {
    /// Track exhausted or never built.
    NoPendingNote,
    /// Cursor note not inside the window; tap discarded.
    OutsideWindow,
    /// Cursor note at `index` resolved as Correct or Wrong.
    Resolved { index: usize, outcome: Outcome },
}

/// Judge one tapped symbol against the cursor note. Resolves at most one note.
pub fn judge(track: &mut Track, tapped: Symbol, window: &HitWindow) -> Judgement {
    let (symbol, position) = match track.pending() {
        Some(note) if !note.is_resolved() => (note.symbol, note.position),
        _ => return Judgement::NoPendingNote,
    };
    if !window.contains(position) {
        return Judgement::OutsideWindow;
    }
    let outcome = if symbol == tapped {
        Outcome::Correct
    } else {
        Outcome::Wrong
    };
    match track.resolve_next(outcome) {
        Some(index) => Judgement::Resolved { index, outcome },
        None => Judgement::NoPendingNote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_default_ratio() {
        let w = HitWindow::new(800.0, DEFAULT_TOLERANCE_RATIO);
        assert!((w.start - 360.0).abs() < 1e-9);
        assert!((w.end - 440.0).abs() < 1e-9);
        assert!((w.width() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_inclusive_bounds() {
        let w = HitWindow { start: 10.0, end: 20.0 };
        assert!(w.contains(10.0));
        assert!(w.contains(20.0));
        assert!(!w.contains(9.999));
        assert!(!w.contains(20.001));
    }

    #[test]
    fn test_judge_correct_and_wrong() {
        let w = HitWindow::new(200.0, 0.05); // [90, 110]
        let mut track = Track::build(".-", 100.0, 5.0); // 100, 105
        assert_eq!(
            judge(&mut track, Symbol::Dot, &w),
            Judgement::Resolved { index: 0, outcome: Outcome::Correct }
        );
        assert_eq!(
            judge(&mut track, Symbol::Dot, &w),
            Judgement::Resolved { index: 1, outcome: Outcome::Wrong }
        );
        assert_eq!(judge(&mut track, Symbol::Dot, &w), Judgement::NoPendingNote);
        assert_eq!(track.next_index(), 2);
    }

    #[test]
    fn test_early_tap_is_discarded() {
        let w = HitWindow::new(200.0, 0.05);
        let mut track = Track::build("...", 200.0, 40.0);
        for _ in 0..5 {
            assert_eq!(judge(&mut track, Symbol::Dash, &w), Judgement::OutsideWindow);
        }
        assert_eq!(track.next_index(), 0);
        assert!(track.notes().iter().all(|n| !n.is_resolved()));
    }

    #[test]
    fn test_judge_at_boundary_counts() {
        let w = HitWindow { start: 50.0, end: 60.0 };
        let mut track = Track::build("-", 60.0, 40.0);
        assert!(matches!(
            judge(&mut track, Symbol::Dash, &w),
            Judgement::Resolved { outcome: Outcome::Correct, .. }
        ));
    }

    #[test]
    fn test_empty_track_no_pending() {
        let w = HitWindow::new(200.0, 0.05);
        let mut track = Track::default();
        assert_eq!(judge(&mut track, Symbol::Dot, &w), Judgement::NoPendingNote);
    }
}
