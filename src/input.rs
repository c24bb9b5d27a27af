//! Tap key timing: turns press/release timestamps into a symbol.

use crate::morse::Symbol;

#[derive(Clone, Debug, Default)]
pub struct TapKey {
    pressed_at: Option<f64>,
}

impl TapKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, now_ms: f64) {
        self.pressed_at = Some(now_ms);
    }

    /// Classify the press that just ended. A release with no matching press
    /// (e.g. the pointer entered the button already held) yields nothing.
    pub fn release(&mut self, now_ms: f64, dash_threshold_ms: f64) -> Option<Symbol> {
        let start = self.pressed_at.take()?;
        Some(classify(now_ms - start, dash_threshold_ms))
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }
}

/// Presses up to and including the threshold are dots.
pub fn classify(duration_ms: f64, dash_threshold_ms: f64) -> Symbol {
    if duration_ms > dash_threshold_ms {
        Symbol::Dash
    } else {
        Symbol::Dot
    }
}
