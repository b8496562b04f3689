//! Rendering: surface configuration and all stroke drawing.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of
//! document state and produces pixels — it does not mutate any engine
//! state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine`]) handles the result by
//! degrading to "nothing drawn" rather than crashing the host screen.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::doc::{DocState, Point};

/// Configure the surface's backing store and default paint style.
///
/// The backing store is sized in physical pixels (`logical × dpr`) while
/// the element's layout size stays logical, and a uniform `dpr` scale
/// transform lets all subsequent drawing be expressed in logical
/// coordinates. The whole surface is filled with `background`, destroying
/// prior content — callers replay persisted strokes afterwards when
/// resuming a document.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn configure_surface(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
    background: &str,
) -> Result<(), JsValue> {
    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);

    let style = canvas.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{height}px"))?;

    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    // Rounded caps and joins keep continuous lines smooth at sample
    // boundaries.
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    fill_background(ctx, width, height, background);
    Ok(())
}

/// Fill the whole surface with `color` in logical coordinates.
pub fn fill_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, width, height);
}

/// Draw a filled disk of radius `width / 2` so a single tap still leaves a
/// visible mark.
///
/// # Errors
///
/// Returns `Err` if the arc call fails.
pub fn draw_dab(
    ctx: &CanvasRenderingContext2d,
    at: Point,
    width: f64,
    color: &str,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.arc(at.x, at.y, width / 2.0, 0.0, 2.0 * PI)?;
    ctx.fill();
    Ok(())
}

/// Draw a live segment between two consecutive samples.
///
/// After the straight segment, a second half-length pass from `from`
/// toward the midpoint softens sharp angles at the sampling resolution — a
/// cheap heuristic, not a spline fit.
pub fn draw_segment(
    ctx: &CanvasRenderingContext2d,
    from: Point,
    to: Point,
    width: f64,
    color: &str,
) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);

    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();

    let mid = Point::new(from.x.midpoint(to.x), from.y.midpoint(to.y));
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(mid.x, mid.y);
    ctx.stroke();
}

/// Rebuild the surface's visual content from the document state.
///
/// Fills the background, then draws every sealed stroke in drawing order
/// using the stroke's own recorded width and color — a document renders
/// identically regardless of the current pen settings. Single-point
/// strokes render as dabs, matching what the live session showed.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn replay(ctx: &CanvasRenderingContext2d, state: &DocState) -> Result<(), JsValue> {
    fill_background(ctx, state.width(), state.height(), state.background_color());
    for stroke in state.strokes() {
        match stroke.points.as_slice() {
            [] => {}
            [only] => draw_dab(ctx, *only, stroke.line_width, &stroke.line_color)?,
            points => draw_polyline(ctx, points, stroke.line_width, &stroke.line_color),
        }
    }
    Ok(())
}

/// One connected polyline through all of a stroke's points.
fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], width: f64, color: &str) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
}
