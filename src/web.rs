//! Browser entry points: canvas/overlay setup, input listeners, the
//! `requestAnimationFrame` loop and the glue that feeds session output to the
//! renderer and the tone generator.
//!
//! All game state sits in one `thread_local` slot so taps, frames and button
//! presses are serialised through the same `RefCell`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::audio::ToneOutput;
use crate::config::GameConfig;
use crate::input::TapKey;
use crate::playback::Cue;
use crate::render;
use crate::session::{Session, SessionEvent, SessionState, Summary};

const SHEET_ID: &str = "mr-sheet";
const SCORE_ID: &str = "mr-score";
const PROGRESS_ID: &str = "mr-progress";
const PROGRESS_FILL_ID: &str = "mr-progress-fill";
const OPPONENT_ID: &str = "mr-opponent";
const PLAYER_MORSE_ID: &str = "mr-player-morse";
const PLAYER_MESSAGE_ID: &str = "mr-player-message";
const STATUS_ID: &str = "mr-status";
const RESULT_ID: &str = "mr-result";
const TAP_ID: &str = "mr-tap";
const SEND_ID: &str = "mr-send";

const RECEIVING_STATUS: &str = "Receiving reply...";
const STATUS_STYLE: &str = "position:fixed; top:45%; left:50%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:18px; padding:8px 14px; background:rgba(0,0,0,0.7); border:1px solid #444; border-radius:8px; color:#ffd166; z-index:50;";
const RESULT_STYLE: &str = "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:22px; padding:18px 24px; background:rgba(0,0,0,0.85); border:2px solid #ffd166; border-radius:12px; color:#fff; z-index:60; text-align:center; white-space:pre-line;";

/// Runtime state for a started game.
struct GameState {
    session: Session,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    tones: Option<ToneOutput>,
    key: TapKey,
    /// When the "receiving" status should disappear; 0 when not shown.
    status_until: f64,
}

thread_local! {
    static GAME: RefCell<Option<GameState>> = const { RefCell::new(None) };
    static CONFIG: RefCell<GameConfig> = RefCell::new(GameConfig::default());
    static FRAME_LOOP: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
    static LISTENERS: Cell<bool> = const { Cell::new(false) };
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn document() -> Result<Document, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

// --- Entry points -------------------------------------------------------------

/// Start `scenario_id` ("daily", "titanic"). Replaces any game already running.
#[wasm_bindgen]
pub fn start_game(scenario_id: &str) -> Result<(), JsValue> {
    let doc = document()?;
    let canvas = ensure_sheet(&doc)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let config = CONFIG.with(|c| c.borrow().clone());
    let mut session = Session::new(config.clone());
    session.start(scenario_id, canvas.width() as f64)?;

    let tones = match ToneOutput::new(&config) {
        Ok(t) => Some(t),
        Err(e) => {
            log::error!("audio unavailable: {}", e);
            None
        }
    };

    ensure_overlays(&doc)?;
    install_listeners(&doc)?;

    let state = GameState {
        session,
        canvas,
        ctx,
        tones,
        key: TapKey::new(),
        status_until: 0.0,
    };
    refresh_turn(&doc, &state);
    render::set_visible(&doc, STATUS_ID, false, STATUS_STYLE);
    render::set_visible(&doc, RESULT_ID, false, RESULT_STYLE);
    GAME.with(|g| g.replace(Some(state)));
    start_frame_loop();
    Ok(())
}

/// Same scenario again from the first turn.
#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    let doc = document()?;
    GAME.with(|g| -> Result<(), JsValue> {
        let mut slot = g.borrow_mut();
        let state = slot.as_mut().ok_or_else(|| JsValue::from_str("game not started"))?;
        state.session.restart()?;
        state.status_until = 0.0;
        render::set_text(&doc, STATUS_ID, "");
        render::set_visible(&doc, STATUS_ID, false, STATUS_STYLE);
        render::set_visible(&doc, RESULT_ID, false, RESULT_STYLE);
        refresh_turn(&doc, state);
        Ok(())
    })?;
    start_frame_loop();
    Ok(())
}

/// Leave to the start screen: stop the loop and drop the session.
#[wasm_bindgen]
pub fn show_start_screen() {
    stop_frame_loop();
    if let Some(mut state) = GAME.with(|g| g.borrow_mut().take()) {
        state.session.exit();
        if let Ok(doc) = document() {
            render::set_visible(&doc, STATUS_ID, false, STATUS_STYLE);
        }
        render::draw_sheet(
            &state.ctx,
            state.canvas.width() as f64,
            state.canvas.height() as f64,
            None,
        );
    }
}

/// Send the current turn: score it and let the reply play out.
#[wasm_bindgen]
pub fn send_message() -> Result<(), JsValue> {
    let doc = document()?;
    let now = performance_now();
    GAME.with(|g| -> Result<(), JsValue> {
        let mut slot = g.borrow_mut();
        let state = slot.as_mut().ok_or_else(|| JsValue::from_str("game not started"))?;
        let report = state.session.complete_turn(now)?;
        render::set_text(&doc, PLAYER_MESSAGE_ID, report.translation);
        render::set_text(&doc, SCORE_ID, &format!("Score: {}", report.average));
        Ok(())
    })
}

#[wasm_bindgen]
pub fn tap_start() {
    let now = performance_now();
    GAME.with(|g| {
        if let Some(state) = g.borrow_mut().as_mut() {
            state.key.press(now);
        }
    });
}

#[wasm_bindgen]
pub fn tap_end() {
    let now = performance_now();
    GAME.with(|g| {
        let mut slot = g.borrow_mut();
        let Some(state) = slot.as_mut() else {
            return;
        };
        let threshold = state.session.config().dash_threshold_ms;
        let Some(symbol) = state.key.release(now, threshold) else {
            return;
        };
        state.session.record_tap(symbol);
        if let Some(tones) = &state.tones {
            if let Err(e) = tones.tone(state.session.config().tone_ms(symbol)) {
                log::error!("tone failed: {}", e);
            }
        }
        if let (Ok(doc), Some(play)) = (document(), state.session.current_turn()) {
            render::set_text(&doc, PLAYER_MORSE_ID, play.input());
        }
    });
}

/// Re-read the sheet's layout width and move the hit window with it.
#[wasm_bindgen]
pub fn resize_track() {
    GAME.with(|g| {
        if let Some(state) = g.borrow_mut().as_mut() {
            let css_width = state.canvas.client_width();
            if css_width > 0 {
                state.canvas.set_width(css_width as u32);
            }
            state.session.resize(state.canvas.width() as f64);
        }
    });
}

/// Override tuning from JSON; applies to games started afterwards and to the
/// next turn of a running one.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let cfg = GameConfig::from_json(json)?;
    GAME.with(|g| {
        if let Some(state) = g.borrow_mut().as_mut() {
            state.session.set_config(cfg.clone());
        }
    });
    CONFIG.with(|c| c.replace(cfg));
    Ok(())
}

/// Current session summary as JSON, `None` before a game starts.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn session_summary() -> Option<String> {
    GAME.with(|g| {
        g.borrow()
            .as_ref()
            .and_then(|state| serde_json::to_string(&state.session.summary()).ok())
    })
}

// --- DOM setup ----------------------------------------------------------------

fn ensure_sheet(doc: &Document) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(SHEET_ID) {
        return el.dyn_into().map_err(|_| JsValue::from_str("mr-sheet is not a canvas"));
    }
    let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    c.set_id(SHEET_ID);
    c.set_width(800);
    c.set_height(120);
    c.set_attribute("style", "position:fixed; left:50%; top:30%; transform:translate(-50%,-50%); border-radius:12px; border:2px solid #222; background:#181818; z-index:20;").ok();
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&c)?;
    Ok(c)
}

fn ensure_overlays(doc: &Document) -> Result<(), JsValue> {
    render::ensure_overlay(doc, SCORE_ID, "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;")?;
    let bar = render::ensure_overlay(doc, PROGRESS_ID, "position:fixed; top:14px; left:50%; transform:translateX(-50%); width:240px; height:8px; background:#333; border-radius:4px; overflow:hidden; z-index:45;")?;
    if doc.get_element_by_id(PROGRESS_FILL_ID).is_none() {
        let fill = doc.create_element("div")?;
        fill.set_id(PROGRESS_FILL_ID);
        bar.append_child(&fill)?;
    }
    render::ensure_overlay(doc, OPPONENT_ID, "position:fixed; top:10%; left:50%; transform:translateX(-50%); font-family:sans-serif; font-size:16px; color:#9ad1ff; z-index:30;")?;
    render::ensure_overlay(doc, PLAYER_MORSE_ID, "position:fixed; top:45%; left:50%; transform:translateX(-50%); font-family:'Fira Code', monospace; font-size:20px; color:#ffd166; letter-spacing:2px; z-index:30;")?;
    render::ensure_overlay(doc, PLAYER_MESSAGE_ID, "position:fixed; top:52%; left:50%; transform:translateX(-50%); font-family:sans-serif; font-size:16px; color:#ddd; z-index:30;")?;
    render::ensure_overlay(doc, STATUS_ID, STATUS_STYLE)?;
    render::ensure_overlay(doc, RESULT_ID, RESULT_STYLE)?;
    if doc.get_element_by_id(TAP_ID).is_none() {
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        for (id, label, bottom) in [(TAP_ID, "TAP", "60px"), (SEND_ID, "SEND", "16px")] {
            let button = doc.create_element("button")?;
            button.set_id(id);
            button.set_text_content(Some(label));
            button.set_attribute("style", &format!("position:fixed; bottom:{}; left:50%; transform:translateX(-50%); min-width:140px; padding:8px; font-family:'Fira Code', monospace; z-index:40;", bottom)).ok();
            body.append_child(&button)?;
        }
    }
    Ok(())
}

/// Reset per-turn text after a turn starts.
fn refresh_turn(doc: &Document, state: &GameState) {
    let session = &state.session;
    render::set_text(doc, SCORE_ID, &format!("Score: {}", session.average_score()));
    render::set_progress(doc, PROGRESS_FILL_ID, session.progress());
    render::set_text(doc, OPPONENT_ID, session.opponent_prompt());
    render::set_text(doc, PLAYER_MORSE_ID, "");
    render::set_text(doc, PLAYER_MESSAGE_ID, "");
}

fn show_result(doc: &Document, summary: &Summary) {
    render::set_text(
        doc,
        RESULT_ID,
        &format!("Final score: {}\n{}", summary.average, summary.tier.message()),
    );
    render::set_visible(doc, RESULT_ID, true, RESULT_STYLE);
    render::set_progress(doc, PROGRESS_FILL_ID, 1.0);
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    if LISTENERS.with(|l| l.replace(true)) {
        return Ok(());
    }
    let press = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        evt.prevent_default();
        tap_start();
    }) as Box<dyn FnMut(_)>);
    let release = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        evt.prevent_default();
        tap_end();
    }) as Box<dyn FnMut(_)>);
    if let Some(tap) = doc.get_element_by_id(TAP_ID) {
        for kind in ["mousedown", "touchstart"] {
            tap.add_event_listener_with_callback(kind, press.as_ref().unchecked_ref())?;
        }
        for kind in ["mouseup", "touchend"] {
            tap.add_event_listener_with_callback(kind, release.as_ref().unchecked_ref())?;
        }
    }
    press.forget();
    release.forget();

    // Space bar doubles as the key
    let key_down = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.key() == " " && !evt.repeat() {
            evt.prevent_default();
            tap_start();
        }
    }) as Box<dyn FnMut(_)>);
    let key_up = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.key() == " " {
            evt.prevent_default();
            tap_end();
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())?;
    doc.add_event_listener_with_callback("keyup", key_up.as_ref().unchecked_ref())?;
    key_down.forget();
    key_up.forget();

    if let Some(send) = doc.get_element_by_id(SEND_ID) {
        let click = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Err(e) = send_message() {
                log::warn!("send ignored: {:?}", e.as_string());
            }
        }) as Box<dyn FnMut(_)>);
        send.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }

    if let Some(win) = window() {
        let resize = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            resize_track();
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        resize.forget();
    }
    Ok(())
}

// --- Frame loop -----------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling rAF callback with an explicit run flag. Start and stop are
/// both idempotent; stop also cancels the pending frame.
struct FrameLoop {
    callback: FrameCallback,
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
}

fn new_frame_loop() -> FrameLoop {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let running = Rc::new(Cell::new(false));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let cb = callback.clone();
    let run = running.clone();
    let h = handle.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        h.set(None);
        if !run.get() {
            return;
        }
        let keep_going = GAME.with(|g| {
            g.borrow_mut()
                .as_mut()
                .map(|state| game_frame(state, ts))
                .unwrap_or(false)
        });
        if keep_going && run.get() {
            request_frame(&cb, &h);
        } else {
            run.set(false);
        }
    }) as Box<dyn FnMut(f64)>));

    FrameLoop {
        callback,
        running,
        handle,
    }
}

fn request_frame(callback: &FrameCallback, handle: &Rc<Cell<Option<i32>>>) {
    let Some(win) = window() else {
        return;
    };
    if let Some(cb) = callback.borrow().as_ref() {
        match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e.as_string()),
        }
    }
}

fn start_frame_loop() {
    FRAME_LOOP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let frame_loop = slot.get_or_insert_with(new_frame_loop);
        if frame_loop.running.replace(true) {
            return;
        }
        request_frame(&frame_loop.callback, &frame_loop.handle);
    });
}

fn stop_frame_loop() {
    FRAME_LOOP.with(|cell| {
        if let Some(frame_loop) = cell.borrow().as_ref() {
            frame_loop.running.set(false);
            if let Some(id) = frame_loop.handle.take() {
                if let Some(win) = window() {
                    win.cancel_animation_frame(id).ok();
                }
            }
        }
    });
}

/// One frame of game + presentation. Returns false once the loop should stop.
fn game_frame(state: &mut GameState, now: f64) -> bool {
    let out = state.session.frame(now);
    let doc = document().ok();

    for cue in &out.cues {
        match *cue {
            Cue::ReceivingStatus { duration_ms } => {
                if let Some(doc) = &doc {
                    render::set_text(doc, STATUS_ID, RECEIVING_STATUS);
                    render::set_visible(doc, STATUS_ID, true, STATUS_STYLE);
                }
                state.status_until = now + duration_ms;
            }
            Cue::Tone { duration_ms, .. } => {
                if let Some(tones) = &state.tones {
                    tones.tone(duration_ms).ok();
                }
            }
            Cue::ReplyDone => {}
        }
    }
    if state.status_until > 0.0 && now >= state.status_until {
        state.status_until = 0.0;
        if let Some(doc) = &doc {
            render::set_text(doc, STATUS_ID, "");
            render::set_visible(doc, STATUS_ID, false, STATUS_STYLE);
        }
    }

    match (&out.event, &doc) {
        (Some(SessionEvent::TurnStarted(_)), Some(doc)) => refresh_turn(doc, state),
        (Some(SessionEvent::Finished(summary)), Some(doc)) => show_result(doc, summary),
        _ => {}
    }

    render::draw_sheet(
        &state.ctx,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
        state.session.current_turn(),
    );
    state.session.state() != SessionState::Finished
}
