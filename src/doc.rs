//! Document model: points, strokes, and the in-memory signature state.
//!
//! This module defines the vector representation of a signature — the
//! ordered stroke list that is the source of truth, superior to any pixel
//! export because it is resolution-independent and re-editable — plus the
//! runtime state that owns the sealed strokes (`DocState`) and the
//! minimum-content predicate used by consent screens (`is_valid`).
//!
//! Data flows into this layer from the wire (JSON deserialization via
//! [`crate::codec`]) and from the input engine (sealed strokes). The
//! renderer reads from `DocState` via `strokes` to reproduce draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_HEIGHT, DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH,
    DEFAULT_WIDTH, WIRE_VERSION,
};

/// A point on the drawing surface in device-independent pixels, relative
/// to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One continuous pointer-down-to-pointer-up gesture.
///
/// Strokes are self-describing: replay uses the recorded width and color,
/// never the pen settings of the instance doing the replaying. A sealed
/// stroke always holds at least one point; a single-point stroke is a dab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// Sampled points in capture order.
    pub points: Vec<Point>,
    /// Pen width in logical pixels.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Pen color as a CSS color string.
    #[serde(default = "default_line_color")]
    pub line_color: String,
    /// Milliseconds since the Unix epoch at capture start.
    #[serde(default)]
    pub timestamp: i64,
}

impl Stroke {
    /// Whether this stroke reconstructs as a connected polyline.
    #[must_use]
    pub fn is_polyline(&self) -> bool {
        self.points.len() >= 2
    }
}

/// The canonical, resolution-independent serialization of a signature.
///
/// Stroke order is drawing order. Geometry is fixed for the lifetime of a
/// document; a wholesale load starts a new lifetime and may carry its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDocument {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

fn default_line_color() -> String {
    DEFAULT_LINE_COLOR.to_owned()
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_background() -> String {
    DEFAULT_BACKGROUND_COLOR.to_owned()
}

fn default_version() -> String {
    WIRE_VERSION.to_owned()
}

/// Minimum-content check: `true` iff the document is present and holds at
/// least `min_strokes` strokes. Pure predicate, no side effects.
#[must_use]
pub fn is_valid(doc: Option<&SignatureDocument>, min_strokes: usize) -> bool {
    doc.is_some_and(|d| d.strokes.len() >= min_strokes)
}

/// In-memory state of the signature being edited: the sealed stroke list
/// plus the geometry of the document it belongs to.
///
/// The stroke list is append-only during a live session; wholesale
/// replacement happens only through [`DocState::load`] or
/// [`DocState::clear`].
pub struct DocState {
    strokes: Vec<Stroke>,
    width: f64,
    height: f64,
    background_color: String,
}

impl DocState {
    /// Create an empty state with the given surface geometry.
    #[must_use]
    pub fn new(width: f64, height: f64, background_color: String) -> Self {
        Self { strokes: Vec::new(), width, height, background_color }
    }

    /// Append a sealed stroke.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Discard every stroke. Geometry is unchanged.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Wholesale replacement from a loaded document. The document's own
    /// geometry governs subsequent replay, not the previous state's.
    pub fn load(&mut self, doc: SignatureDocument) {
        self.strokes = doc.strokes;
        self.width = doc.width;
        self.height = doc.height;
        self.background_color = doc.background_color;
    }

    /// Update surface geometry, keeping the stroke list.
    pub fn set_geometry(&mut self, width: f64, height: f64, background_color: String) {
        self.width = width;
        self.height = height;
        self.background_color = background_color;
    }

    /// Deep-copy snapshot of the current document, or `None` when empty.
    ///
    /// The copy keeps sealed strokes immutable: external holders cannot
    /// mutate engine state through it.
    #[must_use]
    pub fn snapshot(&self) -> Option<SignatureDocument> {
        if self.strokes.is_empty() {
            return None;
        }
        Some(SignatureDocument {
            strokes: self.strokes.clone(),
            width: self.width,
            height: self.height,
            background_color: self.background_color.clone(),
            version: WIRE_VERSION.to_owned(),
        })
    }

    /// `true` iff at least one stroke has been sealed.
    #[must_use]
    pub fn has_signature(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Sealed strokes in drawing order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of sealed strokes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Returns `true` if no stroke has been sealed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Logical surface width in device-independent pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical surface height in device-independent pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Surface background color.
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }
}

impl Default for DocState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_BACKGROUND_COLOR.to_owned())
    }
}
