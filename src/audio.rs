//! Web Audio tone output. Fire-and-forget: nothing here feeds back into the game.

use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};

use crate::config::GameConfig;
use crate::error::Result;

/// Attack / release ramp so tones start and stop without clicks.
const RAMP_S: f64 = 0.01;

pub struct ToneOutput {
    ctx: AudioContext,
    hz: f32,
    gain: f32,
}

impl ToneOutput {
    /// Must be created from a user gesture or browsers keep the context suspended.
    pub fn new(cfg: &GameConfig) -> Result<Self> {
        let ctx = AudioContext::new()?;
        Ok(Self {
            ctx,
            hz: cfg.tone_hz,
            gain: cfg.tone_gain,
        })
    }

    /// Sine beep of `duration_ms`, starting now.
    pub fn tone(&self, duration_ms: f64) -> Result<()> {
        let now = self.ctx.current_time();
        let dur = (duration_ms / 1000.0).max(RAMP_S * 2.0);
        let osc = self.ctx.create_oscillator()?;
        let amp = self.ctx.create_gain()?;
        osc.connect_with_audio_node(&amp)?;
        amp.connect_with_audio_node(&self.ctx.destination())?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value_at_time(self.hz, now)?;

        let g = amp.gain();
        g.set_value_at_time(0.0, now)?;
        g.linear_ramp_to_value_at_time(self.gain, now + RAMP_S)?;
        g.linear_ramp_to_value_at_time(self.gain, now + dur - RAMP_S)?;
        g.linear_ramp_to_value_at_time(0.0, now + dur)?;

        let src: &AudioScheduledSourceNode = &osc;
        src.start_with_when(now)?;
        src.stop_with_when(now + dur)?;
        Ok(())
    }
}
