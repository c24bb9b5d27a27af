//! Game tuning constants gathered in one place.
//!
//! With the `serde_json` feature the page can override any subset of fields via
//! `configure(json)`; missing fields keep their defaults.

use crate::error::{GameError, Result};
use crate::judge::DEFAULT_TOLERANCE_RATIO;
use crate::track::NOTE_PITCH;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Hit window half-width as a fraction of track width.
    pub tolerance_ratio: f64,
    /// Distance between consecutive notes, in track units.
    pub note_pitch: f64,
    /// Scroll distance per animation frame.
    pub scroll_step: f64,
    /// Presses up to and including this long are dots.
    pub dash_threshold_ms: f64,
    pub dot_ms: f64,
    pub dash_ms: f64,
    /// Silence after every tone.
    pub symbol_gap_ms: f64,
    pub letter_gap_ms: f64,
    pub word_gap_ms: f64,
    /// Delay between sending and the "receiving" status.
    pub reply_delay_ms: f64,
    /// How long the "receiving" status shows before the reply plays.
    pub status_ms: f64,
    /// Pause after the reply before the next turn starts.
    pub after_reply_ms: f64,
    pub tone_hz: f32,
    pub tone_gain: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tolerance_ratio: DEFAULT_TOLERANCE_RATIO,
            note_pitch: NOTE_PITCH,
            scroll_step: 0.5,
            dash_threshold_ms: 150.0,
            dot_ms: 100.0,
            dash_ms: 300.0,
            symbol_gap_ms: 100.0,
            letter_gap_ms: 300.0,
            word_gap_ms: 700.0,
            reply_delay_ms: 3000.0,
            status_ms: 2000.0,
            after_reply_ms: 1000.0,
            tone_hz: 600.0,
            tone_gain: 0.1,
        }
    }
}

impl GameConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance_ratio > 0.0 && self.tolerance_ratio <= 0.5) {
            return Err(GameError::InvalidConfig(format!(
                "tolerance_ratio must be in (0, 0.5], got {}",
                self.tolerance_ratio
            )));
        }
        let positive = [
            ("note_pitch", self.note_pitch),
            ("scroll_step", self.scroll_step),
            ("dash_threshold_ms", self.dash_threshold_ms),
            ("dot_ms", self.dot_ms),
            ("dash_ms", self.dash_ms),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        let non_negative = [
            ("symbol_gap_ms", self.symbol_gap_ms),
            ("letter_gap_ms", self.letter_gap_ms),
            ("word_gap_ms", self.word_gap_ms),
            ("reply_delay_ms", self.reply_delay_ms),
            ("status_ms", self.status_ms),
            ("after_reply_ms", self.after_reply_ms),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Tone length for a symbol, in milliseconds.
    pub fn tone_ms(&self, symbol: crate::morse::Symbol) -> f64 {
        match symbol {
            crate::morse::Symbol::Dot => self.dot_ms,
            crate::morse::Symbol::Dash => self.dash_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tolerance_ratio, 0.05);
        assert_eq!(cfg.note_pitch, 40.0);
        assert_eq!(cfg.dash_threshold_ms, 150.0);
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let cfg = GameConfig {
            tolerance_ratio: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
        let cfg = GameConfig {
            scroll_step: -1.0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
