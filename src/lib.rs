//! Morse Radio core crate.
//!
//! A tap-along rhythm game that teaches Morse code through scripted radio
//! contacts. The player's outgoing message scrolls past as dot/dash notes; taps
//! landing in the hit window colour the notes, and the raw tap sequence is scored
//! against the message once the turn is sent. The other station then answers in
//! Morse before the next turn begins.
//!
//! Everything except `web`, `audio`, `render` and `logging` is plain Rust and runs
//! under `cargo test` on the host.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod input;
pub mod judge;
pub mod morse;
pub mod playback;
pub mod scenario;
pub mod session;
pub mod track;
pub mod turn;

mod audio;
mod logging;
mod render;
mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use judge::{HitWindow, Judgement};
pub use morse::Symbol;
pub use session::{ResultTier, Session, SessionEvent, SessionState, Summary};
pub use track::{Note, Outcome, Track};
pub use turn::TurnPlay;
pub use web::{restart_game, resize_track, send_message, show_start_screen, start_game, tap_end, tap_start};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Codec helpers for the page (e.g. a free-practice text box)
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn encode_morse(text: &str) -> String {
    morse::encode(text)
}

#[wasm_bindgen]
pub fn decode_morse(code: &str) -> String {
    morse::decode(code)
}

/// Ids of the built-in scenarios, in menu order.
pub fn scenario_ids() -> Vec<&'static str> {
    scenario::SCENARIOS.iter().map(|s| s.id).collect()
}
