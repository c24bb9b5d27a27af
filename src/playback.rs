//! Reply sequencing: the narrative pause after sending, the "receiving" status,
//! the reply tones and the hand-over to the next turn.
//!
//! Everything is a timestamped cue polled from the frame loop, so dropping or
//! cancelling the sequence is all it takes to stop it. Nothing fires later
//! against a session that has moved on.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::morse::Symbol;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    /// Show the "receiving reply" status line for the given time.
    ReceivingStatus { duration_ms: f64 },
    Tone { symbol: Symbol, duration_ms: f64 },
    /// Reply finished and the closing pause elapsed: advance the session.
    ReplyDone,
}

#[derive(Clone, Debug, Default)]
pub struct ReplySequence {
    schedule: VecDeque<(f64, Cue)>,
    cancelled: bool,
}

impl ReplySequence {
    /// Schedule the reply to `reply_morse` (encoded, separators included) for a
    /// turn sent at `sent_ms`.
    pub fn new(reply_morse: &str, sent_ms: f64, cfg: &GameConfig) -> Self {
        let status_at = sent_ms + cfg.reply_delay_ms;
        let mut schedule = VecDeque::new();
        schedule.push_back((
            status_at,
            Cue::ReceivingStatus {
                duration_ms: cfg.status_ms,
            },
        ));
        let (tones, length_ms) = tone_plan(reply_morse, cfg);
        let play_at = status_at + cfg.status_ms;
        for (offset, cue) in tones {
            schedule.push_back((play_at + offset, cue));
        }
        schedule.push_back((play_at + length_ms + cfg.after_reply_ms, Cue::ReplyDone));
        Self {
            schedule,
            cancelled: false,
        }
    }

    /// Pop every cue due at `now_ms`, in schedule order.
    pub fn poll(&mut self, now_ms: f64) -> Vec<Cue> {
        let mut due = Vec::new();
        while let Some(&(at, cue)) = self.schedule.front() {
            if at > now_ms {
                break;
            }
            self.schedule.pop_front();
            due.push(cue);
        }
        due
    }

    /// Drop everything not yet fired. Idempotent.
    pub fn cancel(&mut self) {
        self.schedule.clear();
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Tone cues at offsets from playback start, plus the total playback length.
/// Each tone is followed by the symbol gap; a single space is a letter gap and a
/// run of spaces (an encoded word break) is one word gap.
pub fn tone_plan(morse: &str, cfg: &GameConfig) -> (Vec<(f64, Cue)>, f64) {
    let mut cues = Vec::new();
    let mut t = 0.0;
    let mut chars = morse.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(symbol) = Symbol::from_char(c) {
            let duration_ms = cfg.tone_ms(symbol);
            cues.push((t, Cue::Tone { symbol, duration_ms }));
            t += duration_ms + cfg.symbol_gap_ms;
        } else if c == ' ' {
            let mut run = 1;
            while chars.peek() == Some(&' ') {
                chars.next();
                run += 1;
            }
            t += if run > 1 {
                cfg.word_gap_ms
            } else {
                cfg.letter_gap_ms
            };
        }
    }
    (cues, t)
}
