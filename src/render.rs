//! Presentation side: the Morse sheet canvas and the DOM text overlays.
//! Reads game state, never writes it.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element};

use crate::track::Outcome;
use crate::turn::TurnPlay;

/// Notes further left than this are drawn faded.
const FADE_X: f64 = -30.0;

// --- Sheet --------------------------------------------------------------------

pub fn draw_sheet(ctx: &CanvasRenderingContext2d, width: f64, height: f64, play: Option<&TurnPlay>) {
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str("#181818");
    ctx.fill_rect(0.0, 0.0, width, height);

    let mid = height / 2.0;
    ctx.set_stroke_style_str("#333");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(0.0, mid);
    ctx.line_to(width, mid);
    ctx.stroke();

    let Some(play) = play else {
        return;
    };

    // Hit area
    let window = play.window();
    ctx.set_fill_style_str("rgba(255,209,102,0.18)");
    ctx.fill_rect(window.start, 0.0, window.width(), height);
    ctx.set_stroke_style_str("rgba(255,209,102,0.7)");
    ctx.stroke_rect(window.start, 1.0, window.width(), height - 2.0);

    ctx.set_font("bold 36px 'Fira Code', monospace");
    ctx.set_text_align("center");
    for note in play.track().notes() {
        if note.position > width + 40.0 {
            continue;
        }
        let color = match note.outcome() {
            Outcome::Pending => "#f5f5f5",
            Outcome::Correct => "#4cd97b",
            Outcome::Wrong => "#ff4d4d",
            Outcome::Skipped => "#7a7a7a",
        };
        ctx.set_global_alpha(if note.position < FADE_X { 0.3 } else { 1.0 });
        ctx.set_fill_style_str(color);
        ctx.fill_text(&note.symbol.as_char().to_string(), note.position, mid + 12.0)
            .ok();
    }
    ctx.set_global_alpha(1.0);
}

// --- Overlays -----------------------------------------------------------------

/// Fetch the element with `id`, creating a fixed-position div when the page does
/// not provide one.
pub fn ensure_overlay(doc: &Document, id: &str, style: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_attribute("style", style).ok();
    body.append_child(&div)?;
    Ok(div)
}

pub fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Progress bar fill, `fraction` in 0.0..=1.0.
pub fn set_progress(doc: &Document, id: &str, fraction: f64) {
    if let Some(el) = doc.get_element_by_id(id) {
        let pct = (fraction * 100.0).clamp(0.0, 100.0);
        el.set_attribute(
            "style",
            &format!("height:100%; width:{:.1}%; background:#ffd166; transition:width 0.3s;", pct),
        )
        .ok();
    }
}

pub fn set_visible(doc: &Document, id: &str, visible: bool, style: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        let display = if visible { "" } else { "display:none;" };
        el.set_attribute("style", &format!("{}{}", style, display)).ok();
    }
}
