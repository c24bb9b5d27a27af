//! Note track: the scrolling queue of symbol notes for one turn.
//!
//! Positions live in track space (the same units as the canvas width). Notes
//! start just past the right edge and scroll left by a fixed step per frame.
//! `next_index` is the judging cursor: everything before it is resolved and it
//! never moves backwards.

use crate::morse::Symbol;

/// Default horizontal distance between consecutive notes.
pub const NOTE_PITCH: f64 = 40.0;

/// Judgement state of a note. Leaves `Pending` exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Pending,
    Correct,
    Wrong,
    Skipped,
}

#[derive(Clone, Debug)]
pub struct Note {
    pub symbol: Symbol,
    pub position: f64,
    outcome: Outcome,
}

impl Note {
    fn new(symbol: Symbol, position: f64) -> Self {
        Self {
            symbol,
            position,
            outcome: Outcome::Pending,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome != Outcome::Pending
    }
}

#[derive(Clone, Debug, Default)]
pub struct Track {
    notes: Vec<Note>,
    next_index: usize,
}

impl Track {
    /// One note per dot/dash of `morse`; separators and unknown characters add no
    /// note and no extra gap.
    pub fn build(morse: &str, track_width: f64, pitch: f64) -> Self {
        let notes = morse
            .chars()
            .filter_map(Symbol::from_char)
            .enumerate()
            .map(|(i, symbol)| Note::new(symbol, track_width + i as f64 * pitch))
            .collect();
        Self {
            notes,
            next_index: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// The note under the cursor, if any remain.
    pub fn pending(&self) -> Option<&Note> {
        self.notes.get(self.next_index)
    }

    /// True once every note has been judged or skipped.
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.notes.len()
    }

    /// Scroll every note, resolved ones included, so the whole sheet moves as one.
    pub fn tick(&mut self, delta: f64) {
        for note in &mut self.notes {
            note.position -= delta;
        }
    }

    /// Skip cursor notes that scrolled fully past the window without a tap.
    /// Returns how many notes were retired.
    pub fn retire_expired(&mut self, window_start: f64) -> usize {
        let mut retired = 0;
        while let Some(note) = self.notes.get(self.next_index) {
            if note.is_resolved() || note.position >= window_start {
                break;
            }
            self.resolve_next(Outcome::Skipped);
            retired += 1;
        }
        retired
    }

    /// Resolve the cursor note and advance. Only the judge and retirement call this.
    pub(crate) fn resolve_next(&mut self, outcome: Outcome) -> Option<usize> {
        debug_assert!(outcome != Outcome::Pending);
        let idx = self.next_index;
        let note = self.notes.get_mut(idx)?;
        if note.is_resolved() {
            return None;
        }
        note.outcome = outcome;
        self.next_index += 1;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_spacing_and_order() {
        let track = Track::build("-.-.   --.-", 400.0, NOTE_PITCH);
        assert_eq!(track.len(), 8);
        assert_eq!(track.next_index(), 0);
        let symbols: String = track.notes().iter().map(|n| n.symbol.as_char()).collect();
        assert_eq!(symbols, "-.-.--.-");
        for (i, n) in track.notes().iter().enumerate() {
            assert!((n.position - (400.0 + 40.0 * i as f64)).abs() < 1e-9);
            assert_eq!(n.outcome(), Outcome::Pending);
        }
    }

    #[test]
    fn test_build_empty() {
        let track = Track::build("   ", 300.0, NOTE_PITCH);
        assert!(track.is_empty());
        assert!(track.is_exhausted());
        assert!(track.pending().is_none());
    }

    #[test]
    fn test_tick_moves_all_notes() {
        let mut track = Track::build("..", 100.0, 10.0);
        track.resolve_next(Outcome::Correct);
        track.tick(2.5);
        assert!((track.notes()[0].position - 97.5).abs() < 1e-9);
        assert!((track.notes()[1].position - 107.5).abs() < 1e-9);
    }

    #[test]
    fn test_retire_expired_only_past_start() {
        let mut track = Track::build("...", 100.0, 10.0);
        // positions 100,110,120 -> move to 40,50,60
        track.tick(60.0);
        assert_eq!(track.retire_expired(50.0), 1);
        assert_eq!(track.next_index(), 1);
        assert_eq!(track.notes()[0].outcome(), Outcome::Skipped);
        // note exactly at the start stays live
        assert_eq!(track.notes()[1].position, 50.0);
        assert_eq!(track.retire_expired(50.0), 0);
    }

    #[test]
    fn test_retire_stops_at_resolved_cursor_target() {
        let mut track = Track::build("..", 0.0, 10.0);
        track.tick(100.0);
        assert_eq!(track.retire_expired(50.0), 2);
        assert!(track.is_exhausted());
        assert_eq!(track.retire_expired(50.0), 0);
        assert!(track.notes().iter().all(|n| n.outcome() == Outcome::Skipped));
    }
}
