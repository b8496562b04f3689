//! Top-level engine: the testable [`EngineCore`] and the canvas-bound
//! [`Engine`].
//!
//! `EngineCore` owns the document state, the stroke-builder state machine,
//! the move-coalescing slot, and the current pen style. Every mutating
//! entry point returns [`Action`]s describing the paint and notification
//! effects for the wrapper (or a test) to process.
//!
//! `Engine` wraps the core and owns the browser canvas element: it
//! resolves DOM event coordinates into surface-local points, executes
//! paint actions through [`crate::render`], exports the PNG raster, and
//! dispatches change notifications to the host's observers. The host owns
//! the paint loop: when a move entry point returns `true`, it must call
//! [`Engine::on_frame`] at the next animation frame.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, TouchEvent};

use crate::consts::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_HEIGHT, DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH,
    DEFAULT_WIDTH,
};
use crate::doc::{DocState, Point, SignatureDocument};
use crate::input::{MoveSlot, StrokeBuilder};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Paint and notification effects returned from [`EngineCore`] operations
/// for the canvas-bound wrapper to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Repaint the surface background, destroying prior content.
    ClearSurface,
    /// Draw a filled disk at the first sample of a stroke.
    Dab { at: Point, width: f64, color: String },
    /// Draw a live segment between two consecutive samples.
    Segment { from: Point, to: Point, width: f64, color: String },
    /// Redraw every sealed stroke from the document state.
    Replay,
    /// The host must invoke `on_frame` at the next paint opportunity.
    FrameRequested,
    /// Notify the raster and document observers.
    Changed,
}

/// Pen style applied to newly begun strokes. Sealed strokes carry their
/// own copy and are unaffected by later changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PenStyle {
    pub line_width: f64,
    pub line_color: String,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            line_color: DEFAULT_LINE_COLOR.to_owned(),
        }
    }
}

/// Engine configuration at construction time.
#[derive(Debug, Clone)]
pub struct PadConfig {
    /// Logical surface width in device-independent pixels.
    pub width: f64,
    /// Logical surface height in device-independent pixels.
    pub height: f64,
    /// Pen width in logical pixels.
    pub line_width: f64,
    /// Pen color as a CSS color string.
    pub line_color: String,
    /// Surface background color as a CSS color string.
    pub background_color: String,
    /// Document to hydrate from when reopening a signed form.
    pub initial_data: Option<SignatureDocument>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            line_color: DEFAULT_LINE_COLOR.to_owned(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            initial_data: None,
        }
    }
}

/// Core engine state — all logic that doesn't depend on the canvas
/// element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub doc: DocState,
    pub pen: PenStyle,
    builder: StrokeBuilder,
    slot: MoveSlot,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(&PadConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: &PadConfig) -> Self {
        Self {
            doc: DocState::new(config.width, config.height, config.background_color.clone()),
            pen: PenStyle {
                line_width: config.line_width,
                line_color: config.line_color.clone(),
            },
            builder: StrokeBuilder::new(),
            slot: MoveSlot::new(),
        }
    }

    // --- Pointer lifecycle ---

    /// Begin a new stroke at `at`. Ignored while a stroke is in progress,
    /// so overlapping contacts collapse into the first gesture.
    pub fn begin_stroke(&mut self, at: Point, timestamp_ms: i64) -> Vec<Action> {
        if self.builder.is_drawing() {
            return Vec::new();
        }
        self.builder.begin(at, self.pen.line_width, &self.pen.line_color, timestamp_ms);
        vec![Action::Dab {
            at,
            width: self.pen.line_width,
            color: self.pen.line_color.clone(),
        }]
    }

    /// Coalesce a move sample onto the next paint frame. At most one
    /// frame request is outstanding; later samples within the same frame
    /// interval overwrite the pending one.
    pub fn move_to(&mut self, at: Point) -> Vec<Action> {
        if !self.builder.is_drawing() {
            return Vec::new();
        }
        if self.slot.offer(at) {
            vec![Action::FrameRequested]
        } else {
            Vec::new()
        }
    }

    /// Paint-frame tick: append the pending sample, if any. A stale frame
    /// (nothing pending, or the stroke already sealed) emits nothing.
    pub fn on_frame(&mut self) -> Vec<Action> {
        let Some(at) = self.slot.take() else {
            return Vec::new();
        };
        let Some(prev) = self.builder.append(at) else {
            return Vec::new();
        };
        let Some(stroke) = self.builder.current() else {
            return Vec::new();
        };
        vec![Action::Segment {
            from: prev,
            to: at,
            width: stroke.line_width,
            color: stroke.line_color.clone(),
        }]
    }

    /// Seal the in-progress stroke and append it to the document. Covers
    /// pointer up, leave, and cancel. Idempotent when idle.
    pub fn end_stroke(&mut self) -> Vec<Action> {
        self.slot.reset();
        let Some(stroke) = self.builder.finish() else {
            return Vec::new();
        };
        self.doc.push_stroke(stroke);
        vec![Action::Changed]
    }

    // --- Data inputs ---

    /// Empty the document and repaint the background.
    pub fn clear(&mut self) -> Vec<Action> {
        self.slot.reset();
        self.builder.cancel();
        self.doc.clear();
        vec![Action::ClearSurface, Action::Changed]
    }

    /// Wholesale-replace the document. `None` and a strokeless document
    /// are the empty state. The loaded document's own geometry governs
    /// the replay, not the instance's configured size.
    pub fn load(&mut self, doc: Option<SignatureDocument>) -> Vec<Action> {
        self.slot.reset();
        self.builder.cancel();
        match doc {
            Some(doc) if !doc.strokes.is_empty() => {
                self.doc.load(doc);
                vec![Action::Replay, Action::Changed]
            }
            _ => {
                self.doc.clear();
                vec![Action::ClearSurface, Action::Changed]
            }
        }
    }

    // --- Configuration ---

    /// Update the pen style used for subsequently begun strokes.
    pub fn set_pen(&mut self, line_width: f64, line_color: &str) {
        self.pen.line_width = line_width;
        self.pen.line_color = line_color.to_owned();
    }

    /// Update surface geometry. Sealed strokes survive the repaint via
    /// replay.
    pub fn resize(&mut self, width: f64, height: f64, background_color: &str) -> Vec<Action> {
        self.doc.set_geometry(width, height, background_color.to_owned());
        vec![Action::Replay]
    }

    // --- Queries ---

    /// Deep-copy snapshot of the current document, `None` when empty.
    #[must_use]
    pub fn snapshot(&self) -> Option<SignatureDocument> {
        self.doc.snapshot()
    }

    /// `true` iff at least one stroke has been sealed.
    #[must_use]
    pub fn has_signature(&self) -> bool {
        self.doc.has_signature()
    }

    /// `true` while a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.builder.is_drawing()
    }
}

/// Observer invoked with the PNG data URI after every change, `None` when
/// the pad is empty.
pub type RasterObserver = Box<dyn FnMut(Option<String>)>;

/// Observer invoked with the document snapshot after every change, `None`
/// when the pad is empty.
pub type DocumentObserver = Box<dyn FnMut(Option<SignatureDocument>)>;

/// The full signature pad engine. Wraps [`EngineCore`] and owns the
/// browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    dpr: f64,
    pub core: EngineCore,
    on_raster: Option<RasterObserver>,
    on_document: Option<DocumentObserver>,
}

impl Engine {
    /// Create an engine bound to `canvas` and hydrate from
    /// `config.initial_data` when present.
    ///
    /// A canvas without an obtainable 2D context leaves the engine in a
    /// degraded state where every drawing operation silently no-ops; the
    /// host screen keeps working, nothing is drawn.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, mut config: PadConfig) -> Self {
        let initial = config.initial_data.take();
        let ctx = context_2d(&canvas);
        if ctx.is_none() {
            log::warn!("signature pad canvas has no 2d context; drawing disabled");
        }
        let mut engine = Self {
            canvas,
            ctx,
            dpr: device_pixel_ratio(),
            core: EngineCore::new(&config),
            on_raster: None,
            on_document: None,
        };
        engine.configure_surface();
        if initial.is_some() {
            engine.set_data(initial);
        }
        engine
    }

    /// Register the raster observer.
    pub fn set_on_raster(&mut self, observer: RasterObserver) {
        self.on_raster = Some(observer);
    }

    /// Register the document observer.
    pub fn set_on_document(&mut self, observer: DocumentObserver) {
        self.on_document = Some(observer);
    }

    // --- DOM input events ---

    /// Pointer contact: begins a stroke at the event's surface-local
    /// position.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        event.prevent_default();
        let at = self.local_point(event.client_x(), event.client_y());
        let actions = self.core.begin_stroke(at, now_ms());
        self.handle(actions);
    }

    /// Pointer drag. Returns `true` when the host must call
    /// [`Self::on_frame`] at the next animation frame.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        event.prevent_default();
        let at = self.local_point(event.client_x(), event.client_y());
        let actions = self.core.move_to(at);
        self.handle(actions)
    }

    /// Pointer release. Also the entry point for leave and cancel — all
    /// three seal the in-progress stroke.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        event.prevent_default();
        let actions = self.core.end_stroke();
        self.handle(actions);
    }

    /// Touch contact: begins a stroke at the primary touch position. An
    /// event with no resolvable contact point is ignored.
    pub fn touch_start(&mut self, event: &TouchEvent) {
        event.prevent_default();
        let Some(at) = self.touch_point(event) else {
            return;
        };
        let actions = self.core.begin_stroke(at, now_ms());
        self.handle(actions);
    }

    /// Touch drag. Returns `true` when the host must call
    /// [`Self::on_frame`] at the next animation frame.
    pub fn touch_move(&mut self, event: &TouchEvent) -> bool {
        event.prevent_default();
        let Some(at) = self.touch_point(event) else {
            return false;
        };
        let actions = self.core.move_to(at);
        self.handle(actions)
    }

    /// Touch release or cancel: seals the in-progress stroke.
    pub fn touch_end(&mut self, event: &TouchEvent) {
        event.prevent_default();
        let actions = self.core.end_stroke();
        self.handle(actions);
    }

    /// Paint-frame tick; the host calls this once per requested frame.
    /// Harmless when the frame arrives after the stroke already ended.
    pub fn on_frame(&mut self) {
        let actions = self.core.on_frame();
        self.handle(actions);
    }

    // --- Imperative surface for the hosting screen ---

    /// Deep-copy snapshot of the current document, `None` when empty.
    #[must_use]
    pub fn data(&self) -> Option<SignatureDocument> {
        self.core.snapshot()
    }

    /// Replace the document wholesale; `None` clears. The loaded
    /// document's own geometry and background govern the replay.
    pub fn set_data(&mut self, doc: Option<SignatureDocument>) {
        let actions = self.core.load(doc);
        self.handle(actions);
    }

    /// Empty the pad and notify observers.
    pub fn clear(&mut self) {
        let actions = self.core.clear();
        self.handle(actions);
    }

    /// `true` iff at least one stroke has been sealed.
    #[must_use]
    pub fn has_signature(&self) -> bool {
        self.core.has_signature()
    }

    /// PNG data URI of the current surface, `None` when the pad is empty
    /// or the canvas cannot produce one. Fallback representation only;
    /// the JSON document is the source of truth.
    #[must_use]
    pub fn export_png(&self) -> Option<String> {
        if !self.core.has_signature() {
            return None;
        }
        match self.canvas.to_data_url() {
            Ok(uri) => Some(uri),
            Err(err) => {
                log::warn!("raster export failed: {err:?}");
                None
            }
        }
    }

    /// Update the pen style for subsequently begun strokes.
    pub fn set_pen(&mut self, line_width: f64, line_color: &str) {
        self.core.set_pen(line_width, line_color);
    }

    /// Update viewport geometry and device pixel ratio. Sealed strokes
    /// survive the reconfiguration repaint.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        self.dpr = dpr;
        let background = self.core.doc.background_color().to_owned();
        let actions = self.core.resize(width, height, &background);
        self.handle(actions);
    }

    /// Change the surface background. Repaints and replays sealed
    /// strokes.
    pub fn set_background(&mut self, color: &str) {
        let width = self.core.doc.width();
        let height = self.core.doc.height();
        let actions = self.core.resize(width, height, color);
        self.handle(actions);
    }

    // --- Action processing ---

    /// Execute paint and notification actions. Returns `true` when a
    /// paint frame was requested.
    fn handle(&mut self, actions: Vec<Action>) -> bool {
        let mut frame_requested = false;
        for action in actions {
            if matches!(action, Action::FrameRequested) {
                frame_requested = true;
            } else {
                self.apply(action);
            }
        }
        frame_requested
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::ClearSurface => {
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                render::fill_background(
                    ctx,
                    self.core.doc.width(),
                    self.core.doc.height(),
                    self.core.doc.background_color(),
                );
            }
            Action::Dab { at, width, color } => {
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                if let Err(err) = render::draw_dab(ctx, at, width, &color) {
                    log::warn!("dab draw failed: {err:?}");
                }
            }
            Action::Segment { from, to, width, color } => {
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                render::draw_segment(ctx, from, to, width, &color);
            }
            Action::Replay => self.replay(),
            Action::FrameRequested => {}
            Action::Changed => self.notify(),
        }
    }

    /// Reconfigure the surface to the document's current geometry and
    /// redraw every sealed stroke.
    fn replay(&mut self) {
        self.configure_surface();
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };
        if let Err(err) = render::replay(ctx, &self.core.doc) {
            log::warn!("signature replay failed: {err:?}");
        }
    }

    fn configure_surface(&mut self) {
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };
        if let Err(err) = render::configure_surface(
            &self.canvas,
            ctx,
            self.core.doc.width(),
            self.core.doc.height(),
            self.dpr,
            self.core.doc.background_color(),
        ) {
            log::warn!("failed to configure signature surface: {err:?}");
        }
    }

    /// Emit both projections of the model — raster and document — to any
    /// registered observers. Both are `None` when the pad is empty.
    fn notify(&mut self) {
        let raster = self.export_png();
        let doc = self.core.snapshot();
        if let Some(observer) = self.on_raster.as_mut() {
            observer(raster);
        }
        if let Some(observer) = self.on_document.as_mut() {
            observer(doc);
        }
    }

    // --- Coordinate resolution ---

    /// Client coordinates to surface-local logical coordinates.
    fn local_point(&self, client_x: i32, client_y: i32) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
    }

    /// Primary contact point of a touch event: the first active touch,
    /// falling back to the last changed touch for touch-end style events.
    fn touch_point(&self, event: &TouchEvent) -> Option<Point> {
        let touches = event.touches();
        let touch = if touches.length() > 0 {
            touches.get(0)
        } else {
            let changed = event.changed_touches();
            let len = changed.length();
            if len == 0 { None } else { changed.get(len - 1) }
        }?;
        Some(self.local_point(touch.client_x(), touch.client_y()))
    }
}

/// Milliseconds since the Unix epoch, from the host clock.
#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    let obj = match canvas.get_context("2d") {
        Ok(Some(obj)) => obj,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("2d context request failed: {err:?}");
            return None;
        }
    };
    match obj.dyn_into::<CanvasRenderingContext2d>() {
        Ok(ctx) => Some(ctx),
        Err(_) => None,
    }
}
