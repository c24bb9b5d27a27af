//! Crate error type. Converted to `JsValue` at the wasm boundary.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Scenario id not present in the scenario table.
    UnknownScenario(String),
    /// No scenario has been started yet.
    NotStarted,
    /// Operation needs a running turn but none is active.
    NoActiveTurn,
    /// The current turn was already sent and scored.
    TurnAlreadyComplete,
    InvalidConfig(String),
    /// Browser API missing or failing (window, canvas, audio ...).
    Dom(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownScenario(id) => write!(f, "unknown scenario '{}'", id),
            GameError::NotStarted => write!(f, "no session started"),
            GameError::NoActiveTurn => write!(f, "no active turn"),
            GameError::TurnAlreadyComplete => write!(f, "turn already complete"),
            GameError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            GameError::Dom(msg) => write!(f, "browser error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
