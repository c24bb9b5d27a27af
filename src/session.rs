//! Session controller: sequences the turns of a scenario, keeps the per-turn
//! scores and owns the reply sequencer between turns.
//!
//! State machine: `Idle -> Running(turn) -> Finished`. `restart` re-enters
//! `Running(0)`; `exit` drops back to `Idle` from anywhere and discards any
//! pending reply cues.

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::judge::Judgement;
use crate::morse::{self, Symbol};
use crate::playback::{Cue, ReplySequence};
use crate::scenario::{self, Scenario};
use crate::turn::TurnPlay;

/// Prompt shown before the other station has said anything.
pub const OPENING_PROMPT: &str = "Opening contact...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running { turn: usize },
    Finished,
}

/// Final message band for the session average.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResultTier {
    Master,
    Great,
    Good,
    KeepAtIt,
}

impl ResultTier {
    pub fn from_average(average: u8) -> Self {
        match average {
            90..=u8::MAX => ResultTier::Master,
            70..=89 => ResultTier::Great,
            50..=69 => ResultTier::Good,
            _ => ResultTier::KeepAtIt,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::Master => "Superb! You are a true Morse operator!",
            ResultTier::Great => "Great work! Almost perfect.",
            ResultTier::Good => "Good pace! Keep practicing.",
            ResultTier::KeepAtIt => "Well done! Morse runs deep, keep at it.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub average: u8,
    pub tier: ResultTier,
    pub scores: Vec<u8>,
}

/// What the page shows right after a turn is sent.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub score: u8,
    pub average: u8,
    pub translation: &'static str,
    pub reply_morse: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    TurnStarted(usize),
    Finished(Summary),
}

/// Everything a single frame produced, for the rendering and audio side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub retired: usize,
    pub cues: Vec<Cue>,
    pub event: Option<SessionEvent>,
}

/// Rounded mean, 0 for no scores.
pub fn average(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|&s| s as u32).sum();
    (sum as f64 / scores.len() as f64).round() as u8
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    scenario: Option<&'static Scenario>,
    state: SessionState,
    turn_index: usize,
    scores: Vec<u8>,
    current: Option<TurnPlay>,
    reply: Option<ReplySequence>,
    track_width: f64,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            scenario: None,
            state: SessionState::Idle,
            turn_index: 0,
            scores: Vec::new(),
            current: None,
            reply: None,
            track_width: 0.0,
        }
    }

    /// Begin `scenario_id` from its first turn. Unknown ids fail before any state
    /// changes.
    pub fn start(&mut self, scenario_id: &str, track_width: f64) -> Result<()> {
        let scenario = scenario::find(scenario_id)?;
        self.discard_pending();
        self.scenario = Some(scenario);
        self.track_width = track_width;
        self.turn_index = 0;
        self.scores.clear();
        log::info!("session start: {} ({} turns)", scenario.id, scenario.turns.len());
        if self.begin_turn().is_none() {
            self.state = SessionState::Finished;
        }
        Ok(())
    }

    /// Start the current scenario over.
    pub fn restart(&mut self) -> Result<()> {
        let id = self.scenario.ok_or(GameError::NotStarted)?.id;
        self.start(id, self.track_width)
    }

    /// Back to the start screen: everything in flight is dropped.
    pub fn exit(&mut self) {
        self.discard_pending();
        self.scenario = None;
        self.turn_index = 0;
        self.scores.clear();
        self.state = SessionState::Idle;
    }

    fn discard_pending(&mut self) {
        if let Some(reply) = self.reply.as_mut() {
            reply.cancel();
        }
        self.reply = None;
        self.current = None;
    }

    fn begin_turn(&mut self) -> Option<SessionEvent> {
        let scenario = self.scenario?;
        let turn = scenario.turns.get(self.turn_index)?;
        self.current = Some(TurnPlay::start(turn, self.track_width, &self.config));
        self.state = SessionState::Running {
            turn: self.turn_index,
        };
        Some(SessionEvent::TurnStarted(self.turn_index))
    }

    /// Tap during the current turn. Always a no-op outside a live turn.
    pub fn record_tap(&mut self, symbol: Symbol) -> Judgement {
        let Some(play) = self.current.as_mut() else {
            log::warn!("tap {:?} with no active turn", symbol);
            return Judgement::NoPendingNote;
        };
        match play.record_tap(symbol) {
            Ok(Judgement::NoPendingNote) => {
                log::warn!("tap {:?}: no pending note", symbol);
                Judgement::NoPendingNote
            }
            Ok(j) => {
                log::debug!("tap {:?}: {:?}", symbol, j);
                j
            }
            Err(e) => {
                log::debug!("tap {:?} ignored: {}", symbol, e);
                Judgement::NoPendingNote
            }
        }
    }

    /// Send the current turn: score it, record the score and schedule the reply.
    /// The session advances on its own once the reply sequence finishes.
    pub fn complete_turn(&mut self, now_ms: f64) -> Result<TurnReport> {
        if !matches!(self.state, SessionState::Running { .. }) {
            return Err(GameError::NoActiveTurn);
        }
        let play = self.current.as_mut().ok_or(GameError::NoActiveTurn)?;
        let score = play.complete()?;
        let turn = play.turn();
        self.scores.push(score);
        let reply_morse = morse::encode(turn.receive);
        self.reply = Some(ReplySequence::new(&reply_morse, now_ms, &self.config));
        log::info!("turn {} sent, accuracy {}%", self.turn_index, score);
        Ok(TurnReport {
            score,
            average: self.average_score(),
            translation: turn.translation,
            reply_morse,
        })
    }

    /// Move to the next turn, or finish when the scenario has no turns left.
    /// Only a sent (scored) turn can be left; an unsent one keeps the session put.
    pub fn advance(&mut self) -> Option<SessionEvent> {
        let scenario = self.scenario?;
        if !matches!(self.state, SessionState::Running { .. }) {
            return None;
        }
        if !self.current.as_ref().is_some_and(|play| play.is_completed()) {
            log::debug!("advance ignored: turn {} not sent", self.turn_index);
            return None;
        }
        self.discard_pending();
        self.turn_index += 1;
        if self.turn_index >= scenario.turns.len() {
            self.state = SessionState::Finished;
            let summary = self.summary();
            log::info!("session finished: average {}%", summary.average);
            return Some(SessionEvent::Finished(summary));
        }
        self.begin_turn()
    }

    /// One animation frame at `now_ms`: scroll the live track and fire due cues.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        let mut out = FrameOutput::default();
        if let Some(play) = self.current.as_mut() {
            out.retired = play.advance_frame(self.config.scroll_step);
        }
        if let Some(reply) = self.reply.as_mut() {
            out.cues = reply.poll(now_ms);
            if out.cues.contains(&Cue::ReplyDone) {
                out.event = self.advance();
            }
        }
        out
    }

    pub fn resize(&mut self, track_width: f64) {
        self.track_width = track_width;
        if let Some(play) = self.current.as_mut() {
            play.resize(track_width);
        }
    }

    pub fn summary(&self) -> Summary {
        let average = self.average_score();
        Summary {
            average,
            tier: ResultTier::from_average(average),
            scores: self.scores.clone(),
        }
    }

    pub fn average_score(&self) -> u8 {
        average(&self.scores)
    }

    /// Fraction of turns already behind the player, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        match self.scenario {
            Some(s) if !s.turns.is_empty() => self.turn_index as f64 / s.turns.len() as f64,
            _ => 0.0,
        }
    }

    /// Line shown for the other station: the previous reply, or the opening prompt.
    pub fn opponent_prompt(&self) -> &'static str {
        match (self.scenario, self.turn_index) {
            (Some(s), i) if i > 0 => s
                .turns
                .get(i - 1)
                .map(|t| t.receive_translation)
                .unwrap_or(OPENING_PROMPT),
            _ => OPENING_PROMPT,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn scenario(&self) -> Option<&'static Scenario> {
        self.scenario
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    pub fn current_turn(&self) -> Option<&TurnPlay> {
        self.current.as_ref()
    }

    pub fn is_replying(&self) -> bool {
        self.reply.is_some()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// New tuning applies from the next turn on.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }
}
