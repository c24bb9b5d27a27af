//! Scripted radio dialogues. Each scenario is a fixed list of turns; the player
//! sends `send` in Morse and the other station answers with `receive`.
//!
//! Scenario bodies live in their own files (one per scenario), mirrored by the
//! lookup table below.

use crate::error::{GameError, Result};

mod daily;
mod titanic;

pub use daily::DAILY;
pub use titanic::TITANIC;

/// One exchange. Immutable once defined.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Turn {
    pub send: &'static str,
    pub translation: &'static str,
    pub receive: &'static str,
    pub receive_translation: &'static str,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub turns: &'static [Turn],
}

pub static SCENARIOS: [&Scenario; 2] = [&DAILY, &TITANIC];

/// Look up a scenario by id. A miss is a configuration error, not an empty game.
pub fn find(id: &str) -> Result<&'static Scenario> {
    SCENARIOS
        .iter()
        .copied()
        .find(|s| s.id == id)
        .ok_or_else(|| GameError::UnknownScenario(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_and_unknown() {
        assert_eq!(find("daily").unwrap().turns.len(), 3);
        assert_eq!(find("titanic").unwrap().id, "titanic");
        assert_eq!(
            find("atlantis").unwrap_err(),
            GameError::UnknownScenario("atlantis".into())
        );
    }
}
